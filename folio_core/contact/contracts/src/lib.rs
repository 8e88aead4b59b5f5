use std::future::Future;

use folio_models::contact::{ContactForm, SubmissionNotice};
use tokio::sync::watch;

/// Submit lifecycle of a single contact form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Submit the contact form.
    ///
    /// Does nothing if a submission of this form is still in flight. Failures
    /// never surface as errors, they end up as a failure notice in the form
    /// state.
    fn submit(&self, form: ContactForm) -> impl Future<Output = SubmitOutcome> + Send;

    /// Return a snapshot of the current form state.
    fn state(&self) -> ContactFormState;

    /// Subscribe to changes of the form state.
    fn subscribe(&self) -> watch::Receiver<ContactFormState>;
}

/// What the presentation layer renders for the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    /// `true` while a submission is in flight. The submit control is disabled
    /// for this whole span.
    pub is_submitting: bool,
    /// Result of the last submission, `None` while idle.
    pub notice: Option<SubmissionNotice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was still in flight, nothing happened.
    Ignored,
    /// The submission finished. The caller must clear its input fields if
    /// `clear_fields` is set.
    Finished { clear_fields: bool },
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(mut self, form: ContactForm, result: SubmitOutcome) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
