use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{User, UserDraft, UserId},
    protocol::InsightRequest,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::gateway::{Gateway, GatewayError, HttpGateway};

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    path: String,
    body: String,
}

impl RecordedRequest {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

type ScriptedResponses = HashMap<(Method, String), (StatusCode, String)>;

#[derive(Clone)]
struct MockBackend {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<ScriptedResponses>,
}

impl MockBackend {
    async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().to_string();
    backend.requests.lock().await.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });
    let (status, body) = backend
        .responses
        .get(&(method, path))
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, String::new()));
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn spawn_backend(routes: Vec<(Method, &str, StatusCode, Value)>) -> (HttpGateway, MockBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let responses = routes
        .into_iter()
        .map(|(method, path, status, body)| {
            let body = if body.is_null() {
                String::new()
            } else {
                body.to_string()
            };
            ((method, path.to_string()), (status, body))
        })
        .collect();
    let backend = MockBackend {
        requests: Arc::new(Mutex::new(Vec::new())),
        responses: Arc::new(responses),
    };
    let app = Router::new()
        .fallback(handle)
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let gateway = HttpGateway::connect(&format!("http://{addr}")).expect("gateway");
    (gateway, backend)
}

fn alice() -> Value {
    json!({"id": 1, "username": "alice", "email": "alice@example.com", "roles": null})
}

#[tokio::test]
async fn list_users_decodes_array() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::GET,
        "/api/users",
        StatusCode::OK,
        json!([alice(), {"id": 2, "username": "bob", "email": "bob@example.com"}]),
    )])
    .await;

    let users = gateway.list_users().await.expect("list users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[1].id, UserId(2));
    assert_eq!(backend.requests().await.len(), 1);
}

#[tokio::test]
async fn fetch_user_targets_id_path() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::GET,
        "/api/users/1",
        StatusCode::OK,
        alice(),
    )])
    .await;

    let user = gateway.fetch_user(UserId(1)).await.expect("fetch user");
    assert_eq!(user, User::new(UserId(1), "alice", "alice@example.com"));
    assert_eq!(backend.requests().await[0].path, "/api/users/1");
}

#[tokio::test]
async fn find_by_username_encodes_path_segment() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::GET,
        "/api/users/username/ann%20marie",
        StatusCode::OK,
        json!({"id": 5, "username": "ann marie", "email": "ann@example.com"}),
    )])
    .await;

    let user = gateway
        .find_user_by_username("ann marie")
        .await
        .expect("find user");
    assert_eq!(user.id, UserId(5));
    assert_eq!(
        backend.requests().await[0].path,
        "/api/users/username/ann%20marie"
    );
}

#[tokio::test]
async fn create_user_posts_draft_without_id() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::POST,
        "/api/users",
        StatusCode::CREATED,
        json!({"id": 9, "username": "carol", "email": "carol@example.com"}),
    )])
    .await;

    gateway
        .create_user(&UserDraft::new("carol", "carol@example.com"))
        .await
        .expect("create user");

    let requests = backend.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(
        requests[0].json(),
        json!({"username": "carol", "email": "carol@example.com"})
    );
}

#[tokio::test]
async fn update_user_puts_full_record() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::PUT,
        "/api/users/3",
        StatusCode::OK,
        Value::Null,
    )])
    .await;

    let user = User::new(UserId(3), "dave", "dave@example.com");
    gateway.update_user(&user).await.expect("update user");

    let requests = backend.requests().await;
    assert_eq!(requests[0].path, "/api/users/3");
    assert_eq!(requests[0].json()["id"], json!(3));
    assert_eq!(requests[0].json()["username"], json!("dave"));
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let (gateway, _backend) = spawn_backend(vec![(
        Method::DELETE,
        "/api/users/4",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": true, "message": "forbidden"}),
    )])
    .await;

    let err = gateway
        .delete_user(UserId(4))
        .await
        .expect_err("delete must fail");
    assert_eq!(
        err,
        GatewayError::Status {
            status: 500,
            message: Some("forbidden".to_string())
        }
    );
    assert_eq!(err.user_message(), "forbidden");
}

#[tokio::test]
async fn error_status_without_body_uses_generic_text() {
    let (gateway, _backend) = spawn_backend(Vec::new()).await;

    let err = gateway
        .fetch_user(UserId(77))
        .await
        .expect_err("unknown route");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "HTTP error: 404");
}

#[tokio::test]
async fn insights_post_topic_and_decode_either_shape() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::POST,
        "/api/insights",
        StatusCode::OK,
        json!({
            "overview": "Computing with qubits",
            "keyConcepts": ["a", "b"],
            "relatedResources": [{"title": "Intro", "url": "https://example.com"}]
        }),
    )])
    .await;

    let request = InsightRequest::from_topic("quantum computing").expect("topic");
    let result = gateway
        .generate_insights(&request)
        .await
        .expect("insights");
    assert_eq!(result.overview.as_deref(), Some("Computing with qubits"));
    assert_eq!(result.key_concepts, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(result.related_links[0].title, "Intro");
    assert_eq!(
        backend.requests().await[0].json(),
        json!({"topic": "quantum computing"})
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let (gateway, _backend) = spawn_backend(vec![(
        Method::GET,
        "/api/users",
        StatusCode::OK,
        json!({"not": "an array"}),
    )])
    .await;

    let err = gateway.list_users().await.expect_err("decode failure");
    assert!(matches!(err, GatewayError::Decode(_)), "unexpected: {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let gateway = HttpGateway::connect(&format!("http://{addr}")).expect("gateway");
    let err = gateway.list_users().await.expect_err("nothing listening");
    assert!(matches!(err, GatewayError::Transport(_)), "unexpected: {err:?}");
    assert!(err.user_message().starts_with("network error:"));
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let (gateway, backend) = spawn_backend(vec![(
        Method::GET,
        "/backend/api/users",
        StatusCode::OK,
        json!([]),
    )])
    .await;
    let prefixed = HttpGateway::connect(&format!("{}backend/", gateway.base_url()))
        .expect("prefixed gateway");

    let users = prefixed.list_users().await.expect("list users");
    assert!(users.is_empty());
    assert_eq!(backend.requests().await[0].path, "/backend/api/users");
}
