use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::calendar::CalendarDay;
use crate::locale::Language;
use crate::parser::RawDocument;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    ConnectionFailed,
    DecodeFailed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("failed to decode response: {0}")]
    DecodeFailed(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::ConnectionFailed(_) => FetchErrorKind::ConnectionFailed,
            FetchError::DecodeFailed(_) => FetchErrorKind::DecodeFailed,
        }
    }
}

/// Anything that can produce the raw wikitext of a day page.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, lang: Language, day: CalendarDay) -> Result<RawDocument, FetchError>;
}

// ── MediaWiki parse API ──

#[derive(Deserialize)]
struct ParseEnvelope {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ParsedPage {
    title: String,
    pageid: u64,
    wikitext: WikitextBody,
}

#[derive(Deserialize)]
struct WikitextBody {
    #[serde(rename = "*")]
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

/// Pull the wikitext out of an `action=parse` response body.
fn decode_envelope(body: &str) -> Result<String, FetchError> {
    let envelope: ParseEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::DecodeFailed(e.to_string()))?;
    match (envelope.parse, envelope.error) {
        (Some(page), _) => {
            debug!("Decoded '{}' (pageid {})", page.title, page.pageid);
            Ok(page.wikitext.content)
        }
        (None, Some(err)) => Err(FetchError::DecodeFailed(format!("{}: {}", err.code, err.info))),
        (None, None) => Err(FetchError::DecodeFailed(
            "response has no parse section".to_string(),
        )),
    }
}

/// Single-shot client for the Wikipedia parse API. No retries.
pub struct WikiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(http, &settings.endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    fn endpoint_for(&self, lang: Language) -> String {
        self.endpoint.replace("{lang}", lang.code())
    }
}

#[async_trait]
impl DocumentSource for WikiClient {
    async fn fetch(&self, lang: Language, day: CalendarDay) -> Result<RawDocument, FetchError> {
        let title = lang.locale().page_title(day);
        let url = self.endpoint_for(lang);
        info!("Fetching {} page {}", lang, title);

        let start = Instant::now();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("action", "parse"),
                ("page", title.as_str()),
                ("prop", "wikitext"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;
        debug!(
            "{} {} answered {} in {}ms",
            lang,
            title,
            response.status(),
            start.elapsed().as_millis()
        );

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::DecodeFailed(e.to_string()))?;
        let wikitext = decode_envelope(&body)?;

        Ok(RawDocument {
            language: lang,
            day,
            wikitext,
        })
    }
}

// ── Tests ──
