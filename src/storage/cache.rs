use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ScrapeError;
use crate::scraper::models::{CachedEntry, DiaryEntry, User};

const FILE_DATE: &str = "%Y-%m-%d";

/// One JSON file per (username, date). Unbounded, never evicted; a
/// present and parseable file is the sole hit condition.
#[derive(Debug, Clone)]
pub struct DiaryCache {
    dir: PathBuf,
}

impl DiaryCache {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn entry_path(&self, username: &str, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", username, date.format(FILE_DATE)))
    }

    /// An unreadable or malformed file counts as a miss; the caller falls
    /// through to a live fetch.
    pub async fn load(&self, username: &str, date: NaiveDate) -> Option<CachedEntry> {
        let path = self.entry_path(username, date);
        let raw = tokio::fs::read_to_string(&path).await.ok()?;

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed cache file");
                None
            }
        }
    }

    pub async fn store(
        &self,
        user: &User,
        entry: &DiaryEntry,
        date: NaiveDate,
    ) -> Result<(), ScrapeError> {
        let record = CachedEntry {
            user: user.clone(),
            entry: entry.clone(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;

        tokio::fs::write(self.entry_path(&user.username, date), json).await?;
        Ok(())
    }

    /// Newest cache file for a user. Only names of the exact
    /// `<username>_<YYYY-MM-DD>.json` shape count, so `ana` never picks
    /// up `ana_maria`'s files.
    pub async fn latest_path(&self, username: &str) -> Option<PathBuf> {
        let prefix = format!("{username}_");
        let mut dir = tokio::fs::read_dir(&self.dir).await.ok()?;
        let mut latest: Option<(NaiveDate, PathBuf)> = None;

        while let Ok(Some(item)) = dir.next_entry().await {
            let name = item.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(date) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|rest| NaiveDate::parse_from_str(rest, FILE_DATE).ok())
            else {
                continue;
            };

            if latest.as_ref().map_or(true, |(newest, _)| date > *newest) {
                latest = Some((date, item.path()));
            }
        }

        latest.map(|(_, path)| path)
    }
}
