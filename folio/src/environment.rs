use anyhow::Context;
use folio_config::ContactConfig;
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_extern_impl::{
    http::HttpClient,
    relay::{FormRelayApiServiceConfig, FormRelayApiServiceImpl},
};
use tracing::{info, warn};

pub type ContactService = ContactServiceImpl<FormRelayApiServiceImpl>;

/// Build the contact form controller. The access key is read here once and
/// stays fixed for the lifetime of the returned service.
pub fn contact_service(config: &ContactConfig) -> anyhow::Result<ContactService> {
    let http = HttpClient::new().context("Failed to build HTTP client")?;
    let relay_config = FormRelayApiServiceConfig::new(config.relay_endpoint_override.clone());
    info!(endpoint = %relay_config.submit_endpoint(), "using form relay");
    let relay = FormRelayApiServiceImpl::new(relay_config, http);

    let contact_config = contact_service_config(config);
    if contact_config.is_local_preview() {
        warn!("No form relay access key configured, messages will not be sent (local preview)");
    }

    Ok(ContactServiceImpl::new(relay, contact_config))
}

pub fn contact_service_config(config: &ContactConfig) -> ContactServiceConfig {
    ContactServiceConfig::new(
        config.access_key.as_ref().map(|key| key.0.clone()),
        config.subject.clone(),
        config.from_name.clone(),
    )
}

#[cfg(test)]
mod tests {
    use folio_core_contact_contracts::{ContactService as _, SubmitOutcome};
    use folio_core_contact_impl::{LOCAL_PREVIEW_TEXT, SUCCESS_TEXT};
    use folio_demo::{ACCESS_KEY, JANE, SUBJECT};
    use folio_models::contact::SubmissionNotice;
    use folio_testing::relay::{Submission, TestRelay};
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;

    fn config(access_key: Option<&str>, endpoint: Option<Url>) -> ContactConfig {
        ContactConfig {
            access_key: access_key.map(|key| key.to_owned().into()),
            subject: SUBJECT.into(),
            from_name: None,
            relay_endpoint_override: endpoint,
            links: Vec::new(),
        }
    }

    #[tokio::test]
    async fn submit_through_relay() {
        // Arrange
        let relay = TestRelay::spawn(ACCESS_KEY).await.unwrap();
        let sut = contact_service(&config(Some(ACCESS_KEY), Some(relay.endpoint().clone())))
            .unwrap();

        // Act
        let result = sut.submit(JANE.clone()).await;

        // Assert
        assert_eq!(result, SubmitOutcome::Finished { clear_fields: true });
        assert_eq!(
            sut.state().notice,
            Some(SubmissionNotice::success(SUCCESS_TEXT))
        );
        assert_eq!(
            relay.submissions().await,
            [Submission {
                name: "Jane".into(),
                email: "jane@x.com".into(),
                message: "Hi".into(),
                subject: Some(SUBJECT.into()),
                from_name: None,
            }]
        );
    }

    #[tokio::test]
    async fn local_preview_never_reaches_relay() {
        // Arrange
        let relay = TestRelay::spawn(ACCESS_KEY).await.unwrap();
        let sut = contact_service(&config(
            Some("YOUR_WEB3FORMS_KEY"),
            Some(relay.endpoint().clone()),
        ))
        .unwrap();

        // Act
        let result = sut.submit(JANE.clone()).await;

        // Assert
        assert_eq!(result, SubmitOutcome::Finished { clear_fields: true });
        assert_eq!(
            sut.state().notice,
            Some(SubmissionNotice::success(LOCAL_PREVIEW_TEXT))
        );
        assert!(relay.submissions().await.is_empty());
    }

    #[test]
    fn missing_access_key_is_local_preview() {
        assert!(contact_service_config(&config(None, None)).is_local_preview());
        assert!(!contact_service_config(&config(Some(ACCESS_KEY), None)).is_local_preview());
    }
}
