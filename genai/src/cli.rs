use crate::error::Error;
use crate::model::{candidate_text, GenaiCommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// settings of the generative model endpoint
#[derive(Debug, Clone)]
pub struct GenaiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GenaiConfig {
    pub fn new(api_key: &str) -> Self {
        GenaiConfig {
            api_key: api_key.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout_secs: 60,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_owned();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

pub struct GenaiClient {
    config: GenaiConfig,
    http: reqwest::blocking::Client,
}

impl GenaiClient {
    pub fn new(config: GenaiConfig) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Client("empty api key".to_owned()));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(GenaiClient { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn execute<C: GenaiCommand>(&self, command: C) -> Result<C::Output, Error> {
        let req_body = command.request_body()?;
        let api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|e| Error::Client(format!("invalid api key: {}", e)))?;
        log::debug!("generateContent on model {}", self.config.model);
        let response = self
            .http
            .post(&self.config.endpoint())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(API_KEY_HEADER, api_key)
            .body(req_body)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            log::warn!("generateContent failed with status {}", status);
            return Err(Error::Server(format!("{}: {}", status, body)));
        }
        let text = candidate_text(&body)?;
        if text.is_none() {
            log::warn!("model {} returned no candidate text", self.config.model);
        }
        command.response_body(text)
    }
}
