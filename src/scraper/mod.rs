use chrono::NaiveDate;

pub mod auth;
pub mod models;
pub mod parser;
pub mod service;

pub use auth::{login, Session};
pub use service::ScrapeService;

// The site numbers diary days sequentially; day 20173 is 2025-03-26,
// which pins the scheme to days since 1970-01-01.
const DAY_ID_ANCHOR: i64 = 20173;

fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 26).unwrap()
}

/// Internal identifier the site uses to address the diary page of a
/// calendar day. Exact on both sides of the anchor.
pub fn day_identifier(date: NaiveDate) -> i64 {
    DAY_ID_ANCHOR + date.signed_duration_since(anchor_date()).num_days()
}
