use crate::config::Config;
use log::debug;
use reqwest;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cmp::min;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the CSV/weather server or PokeAPI.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("request to {url} did not complete: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned 404")]
    NotFound { url: String },

    #[error("{url} returned status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("could not decode reply from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("cannot build a request URL from {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// `{"result": ..., "message": ...}` as returned by `weather`, `loadcsv` and `statscsv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub result: String,
    #[serde(default)]
    pub message: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}

/// Reply of `getcsv`: the rows of the currently loaded CSV.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CsvReply {
    pub result: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PokemonReply {
    pub types: Vec<PokemonTypeSlot>,
    pub stats: Vec<PokemonStat>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PokemonTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PokemonStat {
    pub base_stat: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NamedResource {
    pub name: String,
}

fn build_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    // Only fails when the TLS backend cannot initialise; fall back to defaults.
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Append `segment` to the path of `base` as a single percent-encoded segment.
fn resource_url(base: &str, segment: &str) -> Result<reqwest::Url, BackendError> {
    let invalid = |reason: String| BackendError::InvalidUrl { url: base.to_string(), reason };

    let mut url = reqwest::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot have path segments".to_string()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: String,
) -> Result<T, BackendError> {
    debug!("GET {}", url);

    let raw_response = request
        .send()
        .await
        .map_err(|source| BackendError::Unreachable { url: url.clone(), source })?;

    let status = raw_response.status();
    let response_text = raw_response
        .text()
        .await
        .map_err(|source| BackendError::Unreachable { url: url.clone(), source })?;

    let max_len = min(80, response_text.len());
    debug!(
        "{} -> {} {}",
        url,
        status.as_u16(),
        response_text.get(..max_len).unwrap_or(&response_text)
    );

    // The CSV server reports failures in the body whatever the status; only
    // fall back to the status when the body is not the JSON we expect.
    serde_json::from_str(&response_text).map_err(|e| {
        if status == reqwest::StatusCode::NOT_FOUND {
            BackendError::NotFound { url: url.clone() }
        } else if status.is_success() {
            BackendError::Decode { url: url.clone(), reason: e.to_string() }
        } else {
            BackendError::UnexpectedStatus { url: url.clone(), status: status.as_u16() }
        }
    })
}

/// Client for the CSV / weather server.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            client: build_client(timeout_secs),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend.base_url.clone(), config.backend.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn weather(&self, lat: &str, lon: &str) -> Result<ApiReply, BackendError> {
        let url = join_url(&self.base_url, "weather");
        let request = self.client.get(&url).query(&[("lat", lat), ("lon", lon)]);
        fetch_json(request, url).await
    }

    pub async fn load_csv(&self, filepath: &str) -> Result<ApiReply, BackendError> {
        let url = join_url(&self.base_url, "loadcsv");
        let request = self.client.get(&url).query(&[("filepath", filepath)]);
        fetch_json(request, url).await
    }

    pub async fn get_csv(&self) -> Result<CsvReply, BackendError> {
        let url = join_url(&self.base_url, "getcsv");
        fetch_json(self.client.get(&url), url).await
    }

    pub async fn stats_csv(&self) -> Result<ApiReply, BackendError> {
        let url = join_url(&self.base_url, "statscsv");
        fetch_json(self.client.get(&url), url).await
    }
}

/// Client for PokeAPI's `pokemon/{name}` resource.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            client: build_client(timeout_secs),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pokeapi.base_url.clone(), config.backend.timeout_secs)
    }

    pub async fn pokemon(&self, name: &str) -> Result<PokemonReply, BackendError> {
        let name = name.to_lowercase();
        // Dot segments would resolve to a different resource.
        if name == "." || name == ".." {
            return Err(BackendError::NotFound { url: join_url(&self.base_url, &name) });
        }

        let url = resource_url(&self.base_url, &name)?;
        fetch_json(self.client.get(url.clone()), url.to_string()).await
    }
}
