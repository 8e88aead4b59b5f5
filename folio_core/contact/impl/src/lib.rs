use std::sync::Arc;

use folio_core_contact_contracts::{ContactFormState, ContactService, SubmitOutcome};
use folio_extern_contracts::relay::{FormRelayApiService, RelayPayload};
use folio_models::{
    contact::{ContactForm, SubmissionNotice},
    Sensitive,
};
use folio_utils::trace_instrument;
use tokio::sync::watch;
use tracing::{debug, error, trace};

/// Access key shipped in the sample configuration. Treated like a missing key.
pub const ACCESS_KEY_PLACEHOLDER: &str = "YOUR_WEB3FORMS_KEY";

pub const SUCCESS_TEXT: &str = "Thanks, I will get back to you soon!";
pub const LOCAL_PREVIEW_TEXT: &str = "Thanks, I will get back to you soon! (local preview)";
pub const FAILURE_TEXT: &str =
    "Something went wrong while sending your message. Please try again or email me directly.";

#[derive(Debug)]
pub struct ContactServiceImpl<Relay> {
    relay: Relay,
    config: ContactServiceConfig,
    state: watch::Sender<ContactFormState>,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    access_key: Option<Sensitive<Arc<str>>>,
    subject: Arc<str>,
    from_name: Option<Arc<str>>,
}

impl ContactServiceConfig {
    /// A missing, blank or placeholder `access_key` puts the form into local
    /// preview mode, in which the relay is never contacted.
    pub fn new(access_key: Option<String>, subject: String, from_name: Option<String>) -> Self {
        Self {
            access_key: access_key
                .filter(|key| !key.trim().is_empty() && key != ACCESS_KEY_PLACEHOLDER)
                .map(|key| Sensitive(key.into())),
            subject: subject.into(),
            from_name: from_name.map(Into::into),
        }
    }

    pub fn is_local_preview(&self) -> bool {
        self.access_key.is_none()
    }
}

impl<Relay> ContactServiceImpl<Relay> {
    pub fn new(relay: Relay, config: ContactServiceConfig) -> Self {
        Self {
            relay,
            config,
            state: watch::Sender::new(ContactFormState::default()),
        }
    }
}

impl<Relay> ContactService for ContactServiceImpl<Relay>
where
    Relay: FormRelayApiService,
{
    #[trace_instrument(skip(self))]
    async fn submit(&self, form: ContactForm) -> SubmitOutcome {
        let Some(guard) = SubmittingGuard::acquire(&self.state) else {
            debug!("submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        };

        let (notice, clear_fields) = self.send(form).await;
        guard.finish(notice);

        SubmitOutcome::Finished { clear_fields }
    }

    fn state(&self) -> ContactFormState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormState> {
        self.state.subscribe()
    }
}

impl<Relay> ContactServiceImpl<Relay>
where
    Relay: FormRelayApiService,
{
    async fn send(&self, form: ContactForm) -> (SubmissionNotice, bool) {
        let Some(access_key) = &self.config.access_key else {
            debug!("no access key configured, skipping form relay");
            return (SubmissionNotice::success(LOCAL_PREVIEW_TEXT), true);
        };

        let payload = RelayPayload {
            name: form.name.into_inner(),
            email: form.email.to_string(),
            message: form.message.into_inner(),
            subject: self.config.subject.to_string(),
            from_name: self.config.from_name.as_deref().map(Into::into),
            access_key: access_key.0.to_string().into(),
        };

        trace!("submit to form relay");
        match self.relay.submit(payload.clone()).await {
            Ok(response) if response.success => (SubmissionNotice::success(SUCCESS_TEXT), true),
            Ok(response) => {
                error!(
                    status = response.status,
                    message = ?response.message,
                    body = %response.body,
                    "form relay rejected submission"
                );
                (SubmissionNotice::failure(FAILURE_TEXT), false)
            }
            Err(err) => {
                error!(?payload, "failed to submit form to relay: {err:#}");
                (SubmissionNotice::failure(FAILURE_TEXT), false)
            }
        }
    }
}

/// Holds the `is_submitting` flag of a form. The flag is reset when the guard
/// is dropped, so a panic or a dropped submit future cannot leave the form
/// disabled.
struct SubmittingGuard<'a> {
    state: &'a watch::Sender<ContactFormState>,
    notice: Option<SubmissionNotice>,
}

impl<'a> SubmittingGuard<'a> {
    /// Mark the form as submitting and clear the previous notice, unless a
    /// submission is already in flight.
    fn acquire(state: &'a watch::Sender<ContactFormState>) -> Option<Self> {
        state
            .send_if_modified(|state| {
                if state.is_submitting {
                    return false;
                }
                state.is_submitting = true;
                state.notice = None;
                true
            })
            .then(|| Self {
                state,
                notice: None,
            })
    }

    /// Publish `notice` and re-enable the form in a single update.
    fn finish(mut self, notice: SubmissionNotice) {
        self.notice = Some(notice);
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let notice = self.notice.take();
        self.state.send_modify(|state| {
            state.is_submitting = false;
            if notice.is_some() {
                state.notice = notice;
            }
        });
    }
}
