use anyhow::Context;
use reqwest::{Request, StatusCode, header};

use crate::{config::Config, reading::Reading};

#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub fn insert_request(&self, data: &Reading) -> Result<Request, anyhow::Error> {
        self.authorized(self.http.post(&self.endpoint))
            .header("Prefer", "return=minimal")
            .json(data)
            .build()
            .context("Failed to build insert request")
    }

    pub fn probe_request(&self) -> Result<Request, anyhow::Error> {
        self.authorized(self.http.get(&self.endpoint))
            .header(header::ACCEPT, "application/json")
            .query(&[("select", "*"), ("limit", "1")])
            .build()
            .context("Failed to build probe request")
    }

    /// Posts one reading. Anything other than `201 Created` is an error.
    pub async fn insert(&self, data: &Reading) -> Result<(), anyhow::Error> {
        let request = self.insert_request(data)?;
        let response = self
            .http
            .execute(request)
            .await
            .context("Failed to send reading")?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(anyhow::anyhow!("Error {}: {}", status.as_u16(), body));
        }

        Ok(())
    }

    /// Checks that the table answers a one-row select.
    pub async fn probe(&self) -> Result<(), anyhow::Error> {
        let request = self.probe_request()?;
        let response = self
            .http
            .execute(request)
            .await
            .context("Failed to reach endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(anyhow::anyhow!("Probe failed with {}: {}", status.as_u16(), body));
        }

        Ok(())
    }
}

/// True only for failures where the request never reached the server.
/// Timeouts and rejected inserts may already have stored the row.
pub fn is_retryable(e: &anyhow::Error) -> bool {
    e.downcast_ref::<reqwest::Error>()
        .is_some_and(|e| e.is_connect())
}
