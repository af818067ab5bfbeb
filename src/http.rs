use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::PanelError;
use crate::panel::{HttpMethod, Transport};

/// Native transport against a configured backend origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, PanelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PanelError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, PanelError> {
        let url = self.config.endpoint(path);
        let mut request = self.client.request(to_reqwest(method), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PanelError::Transport(e.to_string()))?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        let text = response
            .text()
            .await
            .map_err(|e| PanelError::Transport(e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| PanelError::Decode(format!("{} ({}): {}", url, status, e)))
    }
}
