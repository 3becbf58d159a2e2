use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;

use crate::{
    domain::error::{ExportError, ExportResult},
    ports::{ForgeClientPort, REACTIONS_PREVIEW_ACCEPT},
};

#[derive(Debug, Clone)]
pub struct ReqwestForgeClient {
    http: reqwest::Client,
}

impl ReqwestForgeClient {
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(REACTIONS_PREVIEW_ACCEPT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ForgeClientPort for ReqwestForgeClient {
    async fn fetch_json(&self, url: &str) -> ExportResult<Value> {
        let network = |source: reqwest::Error| ExportError::Network {
            url: url.to_string(),
            source: source.into(),
        };

        let response = self.http.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(network)?;
        serde_json::from_slice(&body).map_err(|source| ExportError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
