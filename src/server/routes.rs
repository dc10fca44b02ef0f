use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use crate::error::ScrapeError;
use crate::scraper::models::User;
use crate::server::AppState;
use crate::storage::users;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/scrape", get(run_scrape))
        .route("/api/users", get(list_users).post(add_user))
        .route("/api/diary/:username", get(latest_diary))
        .route("/api/diary/:username/:date", get(diary_for_date))
}

#[derive(Serialize)]
struct ScrapeSummary {
    success: bool,
    message: String,
    count: usize,
}

async fn run_scrape(
    State(state): State<AppState>,
) -> Result<Json<ScrapeSummary>, (StatusCode, String)> {
    let cfg = state.service.config();
    let credentials = cfg.credentials.clone().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "FatSecret credentials not configured".to_string(),
    ))?;

    let users = users::load_users(cfg).await.map_err(internal)?;
    let entries = state
        .service
        .scrape(&credentials, &users, None)
        .await
        .map_err(internal)?;

    Ok(Json(ScrapeSummary {
        success: true,
        message: format!("Scraped data for {} users", entries.len()),
        count: entries.len(),
    }))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    let users = users::load_users(state.service.config())
        .await
        .map_err(internal)?;
    Ok(Json(users))
}

async fn add_user(
    State(state): State<AppState>,
    Json(new_user): Json<User>,
) -> Result<(StatusCode, Json<User>), (StatusCode, String)> {
    users::validate_user(&new_user).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let cfg = state.service.config();
    let mut users = users::load_users(cfg).await.map_err(internal)?;

    if users.iter().any(|u| u.username == new_user.username) {
        return Err((
            StatusCode::CONFLICT,
            "user with this username already exists".to_string(),
        ));
    }

    users.push(new_user.clone());
    users::save_users(cfg, &users).await.map_err(internal)?;

    Ok((StatusCode::CREATED, Json(new_user)))
}

async fn latest_diary(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let Some(path) = state.service.cache().latest_path(&username).await else {
        return Err((
            StatusCode::NOT_FOUND,
            "no diary entries found for this user".to_string(),
        ));
    };
    serve_cache_file(path).await
}

async fn diary_for_date(
    State(state): State<AppState>,
    Path((username, date)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "date must be YYYY-MM-DD".to_string(),
        )
    })?;

    let path = state.service.cache().entry_path(&username, date);
    if !path.exists() {
        return Err((StatusCode::NOT_FOUND, "diary entry not found".to_string()));
    }
    serve_cache_file(path).await
}

// Cache files are already the response payload; serve them verbatim.
async fn serve_cache_file(path: PathBuf) -> Result<impl IntoResponse, (StatusCode, String)> {
    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to read cache file");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "error reading diary".to_string(),
        )
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}

fn internal(e: ScrapeError) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
