use std::{io::Write, process::ExitCode};

use clap::Args;
use folio_config::Config;
use folio_core_contact_contracts::{ContactService, SubmitOutcome};
use folio_models::contact::{ContactForm, SubmissionStatus};
use thiserror::Error;

use crate::environment;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: String,
    /// The email address to reply to
    #[arg(long)]
    email: String,
    /// The message to send
    #[arg(long)]
    message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<ExitCode> {
        let form = parse_form(&self.name, &self.email, &self.message)?;
        let service = environment::contact_service(&config.contact)?;

        let mut stdout = std::io::stdout().lock();
        submit(&service, form, &mut stdout).await?;

        let success = service
            .state()
            .notice
            .is_some_and(|notice| notice.is_success());
        Ok(if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactFormError {
    #[error("Please enter your name.")]
    Name,
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Please enter a message.")]
    Message,
}

/// Apply the checks a browser performs on the form inputs.
pub fn parse_form(name: &str, email: &str, message: &str) -> Result<ContactForm, ContactFormError> {
    Ok(ContactForm {
        name: name.try_into().map_err(|_| ContactFormError::Name)?,
        email: email.parse().map_err(|_| ContactFormError::Email)?,
        message: message.try_into().map_err(|_| ContactFormError::Message)?,
    })
}

/// Submit `form` and render the form state to `out` while the submission is
/// running, followed by the resulting notice.
pub async fn submit(
    service: &impl ContactService,
    form: ContactForm,
    out: &mut impl Write,
) -> anyhow::Result<SubmitOutcome> {
    let mut state = service.subscribe();
    let submission = service.submit(form);
    tokio::pin!(submission);

    let outcome = loop {
        tokio::select! {
            biased;
            Ok(()) = state.changed() => {
                if state.borrow_and_update().is_submitting {
                    writeln!(out, "Sending...")?;
                }
            }
            outcome = &mut submission => break outcome,
        }
    };

    match outcome {
        SubmitOutcome::Ignored => {
            writeln!(out, "A message is already being sent, please wait.")?;
        }
        SubmitOutcome::Finished { .. } => {
            if let Some(notice) = service.state().notice {
                match notice.status {
                    SubmissionStatus::Success => writeln!(out, "{notice}")?,
                    SubmissionStatus::Failure => writeln!(out, "Error: {notice}")?,
                }
            }
        }
    }

    Ok(outcome)
}
