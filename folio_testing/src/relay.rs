use std::{collections::HashMap, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    routing, Json, Router,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};
use tracing::{info, warn};
use url::Url;

pub const SUBMIT_ROUTE: &str = "/submit";

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

pub async fn start_server(host: IpAddr, port: u16, access_key: String) -> anyhow::Result<()> {
    info!("Starting form relay testing server on {host}:{port}");
    info!("Form relay submit endpoint: http://{host}:{port}{SUBMIT_ROUTE}");
    info!("Access key: {access_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(access_key, Default::default()))
        .await
        .context("Failed to start HTTP server")
}

/// A submission accepted by the testing relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: Option<String>,
    pub from_name: Option<String>,
}

type Inbox = Arc<Mutex<Vec<Submission>>>;

/// Testing relay bound to an ephemeral local port, stopped on drop.
pub struct TestRelay {
    endpoint: Url,
    inbox: Inbox,
    task: JoinHandle<()>,
}

impl TestRelay {
    pub async fn spawn(access_key: impl Into<String>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .context("Failed to bind testing relay")?;
        let addr = listener.local_addr()?;
        let endpoint = format!("http://{addr}{SUBMIT_ROUTE}").parse()?;

        let inbox = Inbox::default();
        let router = router(access_key.into(), Arc::clone(&inbox));
        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                warn!("testing relay stopped: {err}");
            }
        });

        Ok(Self {
            endpoint,
            inbox,
            task,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.inbox.lock().await.clone()
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone)]
struct RelayState {
    access_key: Arc<str>,
    inbox: Inbox,
}

fn router(access_key: String, inbox: Inbox) -> Router<()> {
    Router::new()
        .route(SUBMIT_ROUTE, routing::post(submit))
        .with_state(RelayState {
            access_key: access_key.into(),
            inbox,
        })
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Submission>,
}

async fn submit(
    State(state): State<RelayState>,
    multipart: Multipart,
) -> (StatusCode, Json<SubmitResponse>) {
    let mut fields = match read_fields(multipart).await {
        Ok(fields) => fields,
        Err(err) => return reject(format!("Invalid form data: {err}")),
    };

    if fields.get("access_key").map(String::as_str) != Some(&*state.access_key) {
        return reject("Invalid access key".into());
    }

    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|&field| fields.get(field).map_or(true, String::is_empty))
    {
        return reject(format!("Missing required field: {missing}"));
    }

    let mut take = |field: &str| fields.remove(field);
    let submission = Submission {
        name: take("name").unwrap_or_default(),
        email: take("email").unwrap_or_default(),
        message: take("message").unwrap_or_default(),
        subject: take("subject"),
        from_name: take("from_name"),
    };
    info!(?submission, "accepted submission");
    state.inbox.lock().await.push(submission.clone());

    (
        StatusCode::OK,
        Json(SubmitResponse {
            success: true,
            message: "Email sent successfully!".into(),
            data: Some(submission),
        }),
    )
}

async fn read_fields(mut multipart: Multipart) -> Result<HashMap<String, String>, MultipartError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        fields.insert(name, field.text().await?);
    }
    Ok(fields)
}

fn reject(message: String) -> (StatusCode, Json<SubmitResponse>) {
    warn!("rejected submission: {message}");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmitResponse {
            success: false,
            message,
            data: None,
        }),
    )
}
