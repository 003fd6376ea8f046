//! The closed set of named payload shapes producers publish.
//!
//! Each shape pins the event name it publishes under; the field layouts
//! match what downstream consumers of the log already expect (camelCase
//! keys throughout).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::EventPayload;

/// A newly published article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePublished {
    pub source: String,
    pub site_name: String,
    pub byline: String,
    pub title: String,
    pub url: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl EventPayload for ArticlePublished {
    const NAME: &'static str = "news";
}

/// An article URL discovered by a scanner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleScanned {
    pub url: String,
    pub tags: Vec<String>,
}

impl EventPayload for ArticleScanned {
    const NAME: &'static str = "article.scanned";
}

/// The extracted content of a scraped article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleScraped {
    pub url: String,
    pub title: String,
    pub byline: String,
    pub length: i64,
    pub excerpt: String,
    pub site_name: String,
    pub image: String,
    pub favicon: String,
    pub content: String,
    pub markdown: String,
    pub fetched: String,
}

impl EventPayload for ArticleScraped {
    const NAME: &'static str = "article.scraped";
}

/// A reported trade by a member of congress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CongressionalTrade {
    pub body: String,
    pub transaction_date: DateTime<Utc>,
    pub disclosure_date: Option<DateTime<Utc>>,
    pub url: String,
    pub name: String,
    pub owner: String,
    pub ticker: String,
    pub asset_type: String,
    #[serde(rename = "type")]
    pub trade_type: String,
    pub comment: String,
    pub amount: String,
}

impl EventPayload for CongressionalTrade {
    const NAME: &'static str = "congressional_trade";
}

/// A dividend announcement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub name: String,
    pub ticker: String,
    pub ex_date: Option<DateTime<Utc>>,
    pub dividend_rate: f32,
    pub record_date: Option<DateTime<Utc>>,
    pub payment_date: Option<DateTime<Utc>>,
    pub announcement_date: Option<DateTime<Utc>>,
}

impl EventPayload for Dividend {
    const NAME: &'static str = "dividend";
}

/// An earnings report date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Earnings {
    pub date: DateTime<Utc>,
    pub ticker: String,
}

impl EventPayload for Earnings {
    const NAME: &'static str = "earnings";
}

/// An observed tweet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub name: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
}

impl EventPayload for Tweet {
    const NAME: &'static str = "tweet";
}

/// An invitation extended to a new user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub invited_by: String,
    pub email: String,
}

impl EventPayload for Invite {
    const NAME: &'static str = "user.invite";
}

/// A request for access to the platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequested {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EventPayload for AccessRequested {
    const NAME: &'static str = "access.requested";
}

/// A solicitation sent to a prospective user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitation {
    pub id: String,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
}

impl EventPayload for Solicitation {
    const NAME: &'static str = "user.solicitation";
}
