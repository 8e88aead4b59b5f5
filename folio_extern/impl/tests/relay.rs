use folio_demo::{ACCESS_KEY, JANE, MAX, SUBJECT};
use folio_extern_contracts::relay::{FormRelayApiService, RelayResponse};
use folio_extern_impl::{
    http::HttpClient,
    relay::{FormRelayApiServiceConfig, FormRelayApiServiceImpl},
};
use folio_testing::relay::{Submission, TestRelay};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn success() {
    let relay = TestRelay::spawn(ACCESS_KEY).await.unwrap();
    let sut = make_sut(relay.endpoint().clone());

    let result = sut.submit(folio_demo::payload(&JANE)).await.unwrap();

    assert!(result.success);
    assert_eq!(result.status, 200);
    assert_eq!(result.message.as_deref(), Some("Email sent successfully!"));
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
async fn success_with_from_name() {
    let relay = TestRelay::spawn(ACCESS_KEY).await.unwrap();
    let sut = make_sut(relay.endpoint().clone());
    let mut payload = folio_demo::payload(&MAX);
    payload.from_name = Some("Portfolio".into());

    let result = sut.submit(payload).await.unwrap();

    assert!(result.success);
    let submissions = relay.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].from_name.as_deref(), Some("Portfolio"));
    assert_eq!(
        submissions[0].message,
        "Hello World!\nI would like to talk about a project."
    );
}

#[tokio::test]
async fn rejected() {
    let relay = TestRelay::spawn("another-key").await.unwrap();
    let sut = make_sut(relay.endpoint().clone());

    let result = sut.submit(folio_demo::payload(&JANE)).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.status, 400);
    assert_eq!(result.message.as_deref(), Some("Invalid access key"));
    assert!(result.body.contains("Invalid access key"));
    assert!(relay.submissions().await.is_empty());
}

#[tokio::test]
async fn success_flag_ignored_on_error_status() {
    let endpoint = serve_raw(
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success":true}"#,
    )
    .await;
    let sut = make_sut(endpoint);

    let result = sut.submit(folio_demo::payload(&JANE)).await.unwrap();

    assert_eq!(
        result,
        RelayResponse {
            success: false,
            status: 500,
            message: None,
            body: r#"{"success":true}"#.into(),
        }
    );
}

#[tokio::test]
async fn malformed_response() {
    let endpoint = serve_raw(axum::http::StatusCode::OK, "<html>maintenance</html>").await;
    let sut = make_sut(endpoint);

    let result = sut.submit(folio_demo::payload(&JANE)).await;

    let err = result.unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Failed to deserialize relay submit response"));
}

#[tokio::test]
async fn unreachable() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sut = make_sut(format!("http://{addr}/submit").parse().unwrap());

    let result = sut.submit(folio_demo::payload(&JANE)).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Failed to send relay submit request");
}

fn make_sut(endpoint: Url) -> FormRelayApiServiceImpl {
    FormRelayApiServiceImpl::new(
        FormRelayApiServiceConfig::new(Some(endpoint)),
        HttpClient::new().unwrap(),
    )
}

async fn serve_raw(status: axum::http::StatusCode, body: &'static str) -> Url {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = axum::Router::new().route(
        "/submit",
        axum::routing::post(move || async move { (status, body) }),
    );
    tokio::spawn(async move { axum::serve(listener, router).await });
    format!("http://{addr}/submit").parse().unwrap()
}
