use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub config_dir: PathBuf,
    pub port: u16,
    pub credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.fatsecret.com.br".to_string(),
            output_dir: PathBuf::from("output"),
            config_dir: PathBuf::from("config"),
            port: 8080,
            credentials: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let credentials = match (env::var("FATSECRET_LOGIN"), env::var("FATSECRET_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        Self {
            base_url: env::var("FATSECRET_BASE_URL").unwrap_or(defaults.base_url),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            config_dir: env::var("CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            credentials,
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/Auth.aspx?pa=s", self.base_url)
    }

    pub fn diary_url(&self, user_id: &str, day_id: i64) -> String {
        format!(
            "{}/Diary.aspx?pa=fj&id={}&dt={}",
            self.base_url, user_id, day_id
        )
    }
}
