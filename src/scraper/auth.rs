use std::sync::Arc;

use reqwest::{cookie::Jar, header, redirect, Client, StatusCode};
use scraper::Html;
use tracing::{debug, info};

use crate::config::{Config, Credentials};
use crate::error::ScrapeError;
use crate::scraper::parser;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// Historically stable control names of the WebForms login form.
const DEFAULT_LOGIN_BUTTON_ID: &str = "ctl00$ctl12$Logincontrol1$LoginButton";
const USERNAME_FIELD: &str = "ctl00$ctl12$Logincontrol1$Name";
const PASSWORD_FIELD: &str = "ctl00$ctl12$Logincontrol1$Password";
const PERSIST_FIELD: &str = "ctl00$ctl12$Logincontrol1$CreatePersistentCookie";

/// An authenticated, cookie-bearing client. Valid for diary fetches until
/// dropped; redirects are followed automatically.
#[derive(Debug)]
pub struct Session {
    client: Client,
}

impl Session {
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let res = self.client.get(url).send().await?;
        Ok(res.text().await?)
    }
}

/// Perform the login handshake and return a session for page fetches.
///
/// The login POST runs on a redirect-disabled client because success is
/// recognized only as a 302 with a Location header; any other status is a
/// failed login. The returned session shares the cookie jar but follows
/// redirects.
pub async fn login(cfg: &Config, credentials: &Credentials) -> Result<Session, ScrapeError> {
    let jar = Arc::new(Jar::default());
    let login_client = Client::builder()
        .cookie_provider(jar.clone())
        .redirect(redirect::Policy::none())
        .user_agent(USER_AGENT)
        .build()?;

    let login_url = cfg.login_url();
    let body = login_client.get(&login_url).send().await?.text().await?;

    let (mut form, button_id) = {
        let doc = Html::parse_document(&body);
        (
            parser::extract_form_fields(&doc),
            parser::find_login_button_id(&doc),
        )
    };
    let button_id = button_id.unwrap_or_else(|| DEFAULT_LOGIN_BUTTON_ID.to_string());
    debug!(%button_id, fields = form.len(), "login form collected");

    form.push((USERNAME_FIELD.to_string(), credentials.username.clone()));
    form.push((PASSWORD_FIELD.to_string(), credentials.password.clone()));
    form.push((PERSIST_FIELD.to_string(), "on".to_string()));
    set_field(&mut form, "__EVENTTARGET", &button_id);
    set_field(&mut form, "__EVENTARGUMENT", "");

    let res = login_client
        .post(&login_url)
        .header(header::REFERER, login_url.as_str())
        .header(header::ORIGIN, cfg.base_url.as_str())
        .header(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
        .header(header::CACHE_CONTROL, "max-age=0")
        .header("Upgrade-Insecure-Requests", "1")
        .form(&form)
        .send()
        .await?;

    let status = res.status();
    if status != StatusCode::FOUND {
        return Err(ScrapeError::AuthenticationFailed(format!(
            "expected a redirect after login, got {status}"
        )));
    }

    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ScrapeError::AuthenticationFailed("redirect without a Location header".to_string())
        })?;

    let redirect_url = if location.starts_with("http") {
        location.to_string()
    } else {
        format!("{}{}", cfg.base_url, location)
    };
    info!(%redirect_url, "login accepted, finalizing session");

    // One explicit follow so the site can set its post-login cookies.
    login_client.get(&redirect_url).send().await?;

    let client = Client::builder()
        .cookie_provider(jar)
        .user_agent(USER_AGENT)
        .build()?;

    Ok(Session { client })
}

// Replaces the field if the login page already rendered it as a hidden
// input, so postback parameters are never duplicated.
fn set_field(form: &mut Vec<(String, String)>, name: &str, value: &str) {
    match form.iter_mut().find(|(n, _)| n == name) {
        Some(slot) => slot.1 = value.to_string(),
        None => form.push((name.to_string(), value.to_string())),
    }
}
