#![cfg(feature = "blocking")]

use pdns::{default_transport, BlockingClient, DEFAULT_USER_AGENT};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn blocking_with_defaults_happy_path() {
    let client = BlockingClient::with_defaults("foo.org", "8888", "changeme").unwrap();

    assert_eq!(client.host(), "http://foo.org:8888/");
    assert_eq!(client.api_key(), "changeme");
    assert_eq!(client.user_agent(), DEFAULT_USER_AGENT);
    assert_eq!(client.transport(), &default_transport());
}

#[test]
fn blocking_rejects_bad_host() {
    let err = BlockingClient::with_transport(
        ":\\^",
        "8888",
        "changeme",
        "my foo agent",
        default_transport(),
    )
    .unwrap_err();
    assert!(err.is_invalid_host());
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_request_carries_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/servers"))
        .and(header("x-api-key", "changeme"))
        .and(header("user-agent", "my foo agent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let addr = *server.address();
    let status = tokio::task::spawn_blocking(move || {
        let client = BlockingClient::with_transport(
            addr.ip().to_string(),
            addr.port().to_string(),
            "changeme",
            "my foo agent",
            default_transport(),
        )
        .unwrap();
        client
            .get("api/v1/servers")
            .unwrap()
            .send()
            .unwrap()
            .status()
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
}
