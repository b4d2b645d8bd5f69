//! End-to-end tests against a local mock server.

use json_rest_client::{
    APPLICATION_VND_API_JSON, Credentials, IdentityContext, NormalizedStatus, RestClient,
    RestClientConfig, RestClientError,
};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Account {
    id: i64,
    name: String,
}

async fn client_for(server: &MockServer) -> RestClient {
    let config = RestClientConfig::new("http://127.0.0.1", server.address().port());
    RestClient::new(config).unwrap()
}

#[tokio::test]
async fn get_decodes_typed_body_and_propagates_identity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42"))
        .and(query_param("expand", "profile"))
        .and(header("Accept", "application/json"))
        .and(header("userId", "42"))
        .and(header("emarketsId", "em-9"))
        .and(header("X-Forwarded-For", "10.0.0.1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "name": "alfred",
                "unknownField": true
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let account: Account = client
        .get("accounts/42")
        .query("expand", "profile")
        .identity(IdentityContext::new(42, "em-9"))
        .forwarded_for("10.0.0.1")
        .send_json()
        .await
        .unwrap();

    assert_eq!(
        account,
        Account {
            id: 42,
            name: "alfred".to_string()
        }
    );
}

#[tokio::test]
async fn configured_credentials_are_sent_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&server)
        .await;

    let config = RestClientConfig::builder()
        .base_uri("http://127.0.0.1")
        .base_port(server.address().port())
        .credentials(Credentials::new("alice", "secret"))
        .build();
    let client = RestClient::new(config).unwrap();

    assert_eq!(client.get("ping").send_text().await.unwrap(), "pong");
}

#[tokio::test]
async fn not_found_normalizes_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get("missing").send().await.unwrap_err();
    assert_eq!(err.normalized_status(), Some(NormalizedStatus::NotFound));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn forbidden_normalizes_to_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get("private").send().await.unwrap_err();
    assert_eq!(err.normalized_status(), Some(NormalizedStatus::Forbidden));
}

#[tokio::test]
async fn validation_errors_fold_into_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .post("accounts")
        .json(&serde_json::json!({"name": ""}))
        .send()
        .await
        .unwrap_err();
    assert_eq!(
        err.normalized_status(),
        Some(NormalizedStatus::ServiceUnavailable)
    );
}

#[tokio::test]
async fn server_errors_normalize_to_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get("down").send().await.unwrap_err();
    assert_eq!(
        err.normalized_status(),
        Some(NormalizedStatus::ServiceUnavailable)
    );
}

#[tokio::test]
async fn vendor_json_api_media_type_bypasses_normalization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Accept", APPLICATION_VND_API_JSON))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"errors":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .get("articles/9")
        .media_type(APPLICATION_VND_API_JSON)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().unwrap(), r#"{"errors":[]}"#);
}

#[tokio::test]
async fn normalization_can_be_disabled_in_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = RestClientConfig::builder()
        .base_uri("http://127.0.0.1")
        .base_port(server.address().port())
        .normalize_status(false)
        .build();
    let client = RestClient::new(config).unwrap();

    let response = client.get("missing").send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn ticket_gated_get_without_cookies_skips_the_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("should not be reached"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = client
        .get("tickets/current")
        .ticket_required()
        .send_text()
        .await
        .unwrap();

    assert_eq!(body, "");
}

#[tokio::test]
async fn ticket_gated_get_with_other_cookies_still_skips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = client
        .get("tickets/current")
        .ticket_required()
        .cookie("session", "abc")
        .send_text()
        .await
        .unwrap();

    assert_eq!(body, "");
}

#[tokio::test]
async fn ticket_gated_get_with_ticket_cookie_performs_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/current"))
        .and(header("Cookie", "encodedTicket=abc; session=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ticket body"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = client
        .get("tickets/current")
        .ticket_required()
        .cookie("encodedTicket", "abc")
        .cookie("session", "xyz")
        .send_text()
        .await
        .unwrap();

    assert_eq!(body, "ticket body");
}

#[tokio::test]
async fn patch_sends_native_verb_with_override_header() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/accounts/42"))
        .and(header("X-HTTP-Method-Override", "PATCH"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "name": "renamed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let account: Account = client
        .patch("accounts/42")
        .json(&serde_json::json!({"name": "renamed"}))
        .send_json()
        .await
        .unwrap();

    assert_eq!(account.name, "renamed");
}

#[tokio::test]
async fn put_sends_json_entity() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/accounts/42"))
        .and(body_json(serde_json::json!({"id": 42, "name": "alfred"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let entity = Account {
        id: 42,
        name: "alfred".to_string(),
    };
    client.put("accounts/42").json(&entity).send().await.unwrap();
}

#[tokio::test]
async fn delete_succeeds_on_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/accounts/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.delete("accounts/42").send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn caller_headers_survive_the_merge_but_identity_wins_collisions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-Request-Id", "req-1"))
        .and(header("userId", "42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .get("accounts")
        .header("X-Request-Id", "req-1")
        .header("userId", "from-caller")
        .identity(IdentityContext::from_user_id(42))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
async fn send_value_decodes_untyped_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 3})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client.get("stats").send_value().await.unwrap();
    assert_eq!(value["count"], 3);
}

#[tokio::test]
async fn malformed_body_is_a_json_error_not_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get("accounts").send_json::<Account>().await.unwrap_err();
    assert!(err.is_json());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = RestClient::new(RestClientConfig::new("http://127.0.0.1", port)).unwrap();
    let err = client.get("accounts").send().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
    assert!(matches!(err, RestClientError::Transport(_)));
}
