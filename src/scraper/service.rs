use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::{Config, Credentials};
use crate::error::ScrapeError;
use crate::scraper::models::{DiaryEntry, User};
use crate::scraper::{auth, day_identifier, parser, Session};
use crate::storage::cache::DiaryCache;

const DISPLAY_DATE: &str = "%d/%m/%Y";
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct ScrapeService {
    cfg: Config,
    cache: DiaryCache,
}

impl ScrapeService {
    /// Opens the cache directory up front; a directory that cannot be
    /// created is fatal here rather than on the first write.
    pub fn new(cfg: Config) -> Result<Self, ScrapeError> {
        let cache = DiaryCache::open(&cfg.output_dir)?;
        Ok(Self { cfg, cache })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn cache(&self) -> &DiaryCache {
        &self.cache
    }

    /// Authenticate once, then resolve one entry per user for the given
    /// date, or the last 30 days per user when no date is supplied.
    ///
    /// A failed login aborts the whole call. Per-day failures are logged
    /// and skipped; days without extractable data are dropped from the
    /// result.
    pub async fn scrape(
        &self,
        credentials: &Credentials,
        users: &[User],
        date: Option<NaiveDate>,
    ) -> Result<HashMap<String, Vec<DiaryEntry>>, ScrapeError> {
        let session = auth::login(&self.cfg, credentials).await?;

        let dates: Vec<NaiveDate> = match date {
            Some(d) => vec![d],
            None => {
                let today = Local::now().date_naive();
                (0..DEFAULT_WINDOW_DAYS)
                    .map(|back| today - Duration::days(back))
                    .collect()
            }
        };

        let mut results: HashMap<String, Vec<DiaryEntry>> = HashMap::new();

        for user in users {
            info!(user = %user.username, days = dates.len(), "resolving diary entries");
            let mut entries = Vec::new();

            for &day in &dates {
                match self.resolve_entry(&session, user, day).await {
                    Ok(entry) if !entry.date.is_empty() => entries.push(entry),
                    Ok(_) => debug!(user = %user.username, date = %day, "no diary data"),
                    Err(e) => {
                        warn!(user = %user.username, date = %day, error = %e, "day skipped")
                    }
                }
            }

            if !entries.is_empty() {
                results.insert(user.username.clone(), entries);
            }
        }

        info!(users = results.len(), "scrape finished");
        Ok(results)
    }

    /// Return the cached entry for (user, date) if one exists, otherwise
    /// fetch and extract the diary page and persist the result.
    ///
    /// The page's own rendered date is not trusted: a non-empty extraction
    /// gets the requested date stamped over it. An entry that extracted
    /// nothing keeps its empty date as the no-data marker and is returned
    /// uncached.
    pub async fn resolve_entry(
        &self,
        session: &Session,
        user: &User,
        date: NaiveDate,
    ) -> Result<DiaryEntry, ScrapeError> {
        if let Some(cached) = self.cache.load(&user.username, date).await {
            debug!(user = %user.username, date = %date, "cache hit");
            return Ok(cached.entry);
        }

        let url = self.cfg.diary_url(&user.id, day_identifier(date));
        let html = session.fetch_html(&url).await?;

        let mut entry = {
            let doc = Html::parse_document(&html);
            parser::extract_diary_entry(&doc)
        };

        if entry.date.is_empty() {
            return Ok(entry);
        }

        entry.date = date.format(DISPLAY_DATE).to_string();
        entry.timestamp = Local::now().format(DISPLAY_DATE).to_string();

        // Best effort: a failed write still returns the fresh entry.
        if let Err(e) = self.cache.store(user, &entry, date).await {
            warn!(user = %user.username, date = %date, error = %e, "cache write failed");
        }

        Ok(entry)
    }
}
