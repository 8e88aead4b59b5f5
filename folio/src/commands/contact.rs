use std::{
    io::{BufRead, Write},
    process::ExitCode,
};

use folio_config::Config;
use folio_core_contact_contracts::{ContactService, SubmitOutcome};
use tracing::trace;

use super::submit::{parse_form, submit};
use crate::environment;

/// Entering this clears a field that would otherwise keep its current value.
const CLEAR_FIELD: &str = "-";

pub async fn invoke(config: Config) -> anyhow::Result<ExitCode> {
    let service = environment::contact_service(&config.contact)?;

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    run(&service, stdin, &mut stdout).await?;

    Ok(ExitCode::SUCCESS)
}

/// Input values of the interactive form. They survive a failed submission so
/// the visitor can retry without typing everything again.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct FormFields {
    name: String,
    email: String,
    message: String,
}

/// Prompt for the form fields and submit them until the input ends or the
/// visitor is done.
pub async fn run(
    service: &impl ContactService,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut fields = FormFields::default();

    loop {
        for (label, value) in [
            ("Name", &mut fields.name),
            ("Email", &mut fields.email),
            ("Message", &mut fields.message),
        ] {
            let Some(line) = prompt(&mut input, out, label, value)? else {
                return Ok(());
            };
            *value = line;
        }

        let form = match parse_form(&fields.name, &fields.email, &fields.message) {
            Ok(form) => form,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        if let SubmitOutcome::Finished { clear_fields: true } = submit(service, form, out).await? {
            trace!("clear form fields");
            fields = FormFields::default();
        }

        match prompt(&mut input, out, "Send another message? [y/N]", "")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {}
            _ => return Ok(()),
        }
    }
}

/// Read one line. An empty line keeps `current` and [`CLEAR_FIELD`] clears it.
/// `None` means end of input.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    current: &str,
) -> anyhow::Result<Option<String>> {
    if current.is_empty() {
        write!(out, "{label}: ")?;
    } else {
        write!(out, "{label} [{current}]: ")?;
    }
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }

    let line = match line.trim_end_matches(['\r', '\n']) {
        "" => current,
        CLEAR_FIELD => "",
        line => line,
    };
    Ok(Some(line.to_owned()))
}

#[cfg(test)]
mod tests {
    use folio_core_contact_contracts::{ContactFormState, MockContactService};
    use folio_demo::JANE;
    use folio_models::contact::{ContactForm, SubmissionNotice};
    use tokio::sync::watch;

    use super::*;

    fn mock_service(
        calls: usize,
        form: ContactForm,
        clear_fields: bool,
        notice: SubmissionNotice,
    ) -> MockContactService {
        let mut service = MockContactService::new();
        service
            .expect_subscribe()
            .returning(|| watch::channel(ContactFormState::default()).1);
        service
            .expect_submit()
            .times(calls)
            .with(mockall::predicate::eq(form))
            .returning(move |_| {
                Box::pin(std::future::ready(SubmitOutcome::Finished { clear_fields }))
            });
        service.expect_state().returning(move || ContactFormState {
            is_submitting: false,
            notice: Some(notice.clone()),
        });
        service
    }

    async fn run_with_input(service: &MockContactService, input: &str) -> String {
        let mut out = Vec::new();
        run(service, input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn send_once() {
        // Arrange
        let service = mock_service(
            1,
            JANE.clone(),
            true,
            SubmissionNotice::success("Thanks, I will get back to you soon!"),
        );

        // Act
        let output = run_with_input(&service, "Jane\njane@x.com\nHi\nn\n").await;

        // Assert
        assert_eq!(
            output,
            "Name: Email: Message: Thanks, I will get back to you soon!\n\
             Send another message? [y/N]: "
        );
    }

    #[tokio::test]
    async fn retry_keeps_fields_after_failure() {
        // Arrange
        let service = mock_service(
            2,
            JANE.clone(),
            false,
            SubmissionNotice::failure("Please try again."),
        );

        // Act
        let output = run_with_input(&service, "Jane\njane@x.com\nHi\ny\n\n\n\nn\n").await;

        // Assert
        assert!(output.contains("Name [Jane]: Email [jane@x.com]: Message [Hi]: "));
        assert_eq!(output.matches("Error: Please try again.\n").count(), 2);
    }

    #[tokio::test]
    async fn fields_cleared_after_success() {
        // Arrange
        let service = mock_service(1, JANE.clone(), true, SubmissionNotice::success("Thanks"));

        // Act
        let output = run_with_input(&service, "Jane\njane@x.com\nHi\ny\n\n\n\n").await;

        // Assert
        assert!(output.ends_with(
            "Send another message? [y/N]: Name: Email: Message: Please enter your name.\nName: \n"
        ));
    }

    #[tokio::test]
    async fn invalid_email_is_corrected() {
        // Arrange
        let service = mock_service(1, JANE.clone(), true, SubmissionNotice::success("Thanks"));

        // Act
        let output = run_with_input(&service, "Jane\njane\nHi\n\njane@x.com\n\n").await;

        // Assert
        assert!(output.contains("Please enter a valid email address.\n"));
        assert!(output.contains("Name [Jane]: Email [jane]: Message [Hi]: Thanks\n"));
    }

    #[tokio::test]
    async fn clear_retained_field() {
        // Arrange
        let service = mock_service(
            1,
            JANE.clone(),
            false,
            SubmissionNotice::failure("Please try again."),
        );

        // Act
        let output = run_with_input(&service, "Jane\njane@x.com\nHi\ny\n\n\n-\n").await;

        // Assert
        assert!(output.ends_with("Message [Hi]: Please enter a message.\nName [Jane]: \n"));
    }
}
