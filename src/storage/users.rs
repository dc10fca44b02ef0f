use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::ScrapeError;
use crate::scraper::models::User;

const USERS_FILE: &str = "users.json";

fn registry_path(cfg: &Config) -> PathBuf {
    cfg.config_dir.join(USERS_FILE)
}

fn seed_users() -> Vec<User> {
    vec![User {
        username: "alissoncorsair".to_string(),
        id: "77829510".to_string(),
    }]
}

pub fn validate_user(user: &User) -> Result<(), ScrapeError> {
    if user.username.is_empty() || user.id.is_empty() {
        return Err(ScrapeError::Validation(
            "username and id are required".to_string(),
        ));
    }
    Ok(())
}

/// Read the user registry, creating it with one seed record on first use.
pub async fn load_users(cfg: &Config) -> Result<Vec<User>, ScrapeError> {
    tokio::fs::create_dir_all(&cfg.config_dir).await?;

    let path = registry_path(cfg);
    if !path.exists() {
        info!(path = %path.display(), "seeding user registry");
        write_registry(&path, &seed_users()).await?;
    }

    let raw = tokio::fs::read_to_string(&path).await?;
    serde_json::from_str(&raw).map_err(|e| ScrapeError::Parse(format!("user registry: {e}")))
}

pub async fn save_users(cfg: &Config, users: &[User]) -> Result<(), ScrapeError> {
    tokio::fs::create_dir_all(&cfg.config_dir).await?;

    let path = registry_path(cfg);
    write_registry(&path, users).await?;
    info!(path = %path.display(), count = users.len(), "user registry updated");
    Ok(())
}

async fn write_registry(path: &Path, users: &[User]) -> Result<(), ScrapeError> {
    let json = serde_json::to_string_pretty(users).map_err(std::io::Error::other)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
