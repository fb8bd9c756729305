//! Remote exam schedule endpoint
//!
//! The endpoint answers with a JSON envelope whose `html` field holds the schedule
//! fragment for one department, or for all of them when asked for index 0.

use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Department index that selects the schedule of every department
pub const ALL_DEPARTMENTS: u32 = 0;

const DEFAULT_BASE_URL: &str = "https://ugla.hi.is/Proftafla/View/ajax.php";
const DEFAULT_SID: u32 = 2027;
const DEFAULT_PROFTAFLA_ID: u32 = 37;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when fetching a schedule fragment
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed or returned an error status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Response envelope from the schedule endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    html: String,
}

/// Anything that can supply schedule HTML for a department index
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Returns the HTML fragment for `department_index` ([`ALL_DEPARTMENTS`] for every department)
    async fn fetch_fragment(&self, department_index: u32) -> Result<String, SourceError>;
}

/// Location and identifiers of the schedule endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    /// Service id (`sid`)
    pub sid: u32,
    /// Schedule id (`proftaflaID`)
    pub proftafla_id: u32,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sid: DEFAULT_SID,
            proftafla_id: DEFAULT_PROFTAFLA_ID,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches schedule fragments over HTTP
#[derive(Debug, Clone)]
pub struct HttpScheduleSource {
    /// HTTP client for making requests
    http_client: Client,
    config: SourceConfig,
}

impl HttpScheduleSource {
    /// Creates a source for the given endpoint configuration
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Builds the GET request for a department index
    fn build_request(&self, department_index: u32) -> Result<Request, SourceError> {
        let query = [
            ("sid", self.config.sid.to_string()),
            ("a", "getProfSvids".to_string()),
            ("proftaflaID", self.config.proftafla_id.to_string()),
            ("svidID", department_index.to_string()),
            ("notaVinnuToflu", "0".to_string()),
        ];

        Ok(self
            .http_client
            .get(&self.config.base_url)
            .query(&query)
            .build()?)
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch_fragment(&self, department_index: u32) -> Result<String, SourceError> {
        let request = self.build_request(department_index)?;
        tracing::info!(url = %request.url(), "fetching exam schedule");

        let body = self
            .http_client
            .execute(request)
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_envelope(&body)
    }
}

/// Extracts the HTML fragment from a response body
fn parse_envelope(body: &str) -> Result<String, SourceError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    Ok(envelope.html)
}
