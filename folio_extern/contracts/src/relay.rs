use std::future::Future;

use folio_models::Sensitive;

/// Client for the hosted form relay that forwards contact messages by email.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormRelayApiService: Send + Sync + 'static {
    /// Submit one form to the relay.
    ///
    /// Returns an error if the request could not be sent or the response body
    /// is not valid JSON. A relay that answers but rejects the submission
    /// yields `Ok` with `success == false`.
    fn submit(
        &self,
        payload: RelayPayload,
    ) -> impl Future<Output = anyhow::Result<RelayResponse>> + Send;
}

/// The multipart body sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
    pub from_name: Option<String>,
    pub access_key: Sensitive<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    /// `true` only if the relay accepted the submission with a 2xx status.
    pub success: bool,
    pub status: u16,
    pub message: Option<String>,
    /// Raw response body, kept for diagnostics.
    pub body: String,
}

#[cfg(feature = "mock")]
impl MockFormRelayApiService {
    pub fn with_submit(mut self, payload: RelayPayload, result: RelayResponse) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(mut self, payload: RelayPayload, error: &'static str) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
