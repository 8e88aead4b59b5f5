use std::sync::Arc;

use anyhow::Context;
use folio_extern_contracts::relay::{FormRelayApiService, RelayPayload, RelayResponse};
use folio_utils::{trace_instrument, Apply};
use reqwest::{header, multipart::Form};
use serde::Deserialize;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

/// https://docs.web3forms.com/getting-started/api-reference
const SUBMIT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceImpl {
    config: FormRelayApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceConfig {
    submit_endpoint: Arc<Url>,
}

impl FormRelayApiServiceConfig {
    pub fn new(submit_endpoint_override: Option<Url>) -> Self {
        Self {
            submit_endpoint: submit_endpoint_override
                .unwrap_or_else(|| SUBMIT_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn submit_endpoint(&self) -> &Url {
        &self.submit_endpoint
    }
}

impl FormRelayApiServiceImpl {
    pub fn new(config: FormRelayApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl FormRelayApiService for FormRelayApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn submit(&self, payload: RelayPayload) -> anyhow::Result<RelayResponse> {
        let form = Form::new()
            .text("name", payload.name)
            .text("email", payload.email)
            .text("message", payload.message)
            .text("subject", payload.subject)
            .text("access_key", payload.access_key.0)
            .apply_map(payload.from_name, |form, from_name| {
                form.text("from_name", from_name)
            });

        trace!("send submission");
        let response = self
            .http
            .post((*self.config.submit_endpoint).clone())
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .context("Failed to send relay submit request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read relay submit response")?;

        trace!(%status, "parse response");
        let SubmitResponse { success, message } = serde_json::from_str(&body)
            .with_context(|| format!("Failed to deserialize relay submit response ({status})"))?;

        Ok(RelayResponse {
            success: success && status.is_success(),
            status: status.as_u16(),
            message,
            body,
        })
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let config = FormRelayApiServiceConfig::new(None);
        assert_eq!(config.submit_endpoint().as_str(), SUBMIT_ENDPOINT);
    }

    #[test]
    fn endpoint_override() {
        let url = "http://127.0.0.1:8001/submit".parse::<Url>().unwrap();
        let config = FormRelayApiServiceConfig::new(Some(url.clone()));
        assert_eq!(*config.submit_endpoint(), url);
    }
}
