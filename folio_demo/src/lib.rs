use std::sync::LazyLock;

use folio_extern_contracts::relay::RelayPayload;
use folio_models::contact::{ContactForm, ContactLink, ContactLinkKind};

pub const ACCESS_KEY: &str = "0d5c6c6e-7c43-4f0a-9a55-2f3b8e2c1a77";
pub const SUBJECT: &str = "New portfolio enquiry";

pub static JANE: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Jane".try_into().unwrap(),
    email: "jane@x.com".parse().unwrap(),
    message: "Hi".try_into().unwrap(),
});

pub static MAX: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Max Mustermann".try_into().unwrap(),
    email: "max.mustermann@example.de".parse().unwrap(),
    message: "Hello World!\nI would like to talk about a project.".try_into().unwrap(),
});

pub static LINKS: LazyLock<Vec<ContactLink>> = LazyLock::new(|| {
    vec![
        ContactLink {
            kind: ContactLinkKind::Email,
            label: "Email".into(),
            href: "mailto:hello@example.com".parse().unwrap(),
        },
        ContactLink {
            kind: ContactLinkKind::Linkedin,
            label: "LinkedIn".into(),
            href: "https://www.linkedin.com/in/example".parse().unwrap(),
        },
        ContactLink {
            kind: ContactLinkKind::Github,
            label: "GitHub".into(),
            href: "https://github.com/example".parse().unwrap(),
        },
    ]
});

/// The payload a relay receives for `form` when the demo access key is used.
pub fn payload(form: &ContactForm) -> RelayPayload {
    RelayPayload {
        name: (*form.name).clone(),
        email: form.email.to_string(),
        message: (*form.message).clone(),
        subject: SUBJECT.into(),
        from_name: None,
        access_key: ACCESS_KEY.to_owned().into(),
    }
}
