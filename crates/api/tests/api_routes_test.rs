use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use korres_api::routes::{create_routes, AppState};
use korres_core::config::QueueConfig;
use korres_core::traits::{EMAIL_KEY, TASKS_KEY};
use korres_queue::ReservationQueue;
use korres_testing_utils::{
    station, MemoryStateStore, MockBookingClient, MockChatAuthGateway, RecordingNotifier,
    ReservationBuilder, ScheduleBuilder,
};

struct TestContext {
    state: AppState,
    store: MemoryStateStore,
    chat_auth: MockChatAuthGateway,
}

/// 创建测试用的应用状态
fn create_test_context(client: MockBookingClient) -> TestContext {
    let store = MemoryStateStore::new();
    let chat_auth = MockChatAuthGateway::new();
    let client: Arc<MockBookingClient> = Arc::new(client);

    let queue = Arc::new(ReservationQueue::new(
        client.clone(),
        Arc::new(RecordingNotifier::new()),
        Arc::new(store.clone()),
        QueueConfig {
            // 测试中不希望定时器真正触发尝试
            default_interval_ms: 60_000,
            stop_on_success: true,
            event_buffer_size: 16,
        },
    ));

    TestContext {
        state: AppState {
            queue,
            client,
            store: Arc::new(store.clone()),
            chat_auth: Arc::new(chat_auth.clone()),
        },
        store,
        chat_auth,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "korres");
}

#[tokio::test]
async fn test_create_task_returns_created_and_persists() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let schedule = serde_json::to_value(ScheduleBuilder::new().with_train_no("0051").build()).unwrap();
    let response = app
        .oneshot(post_json("/api/tasks", json!({ "schedule": schedule })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    assert!(json["success"].as_bool().unwrap());
    assert_eq!(json["data"]["id"], "0051");
    assert_eq!(json["data"]["retries"], 0);
    assert_eq!(json["data"]["interval_ms"], 60_000);

    let persisted = context.store.value(TASKS_KEY).unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_task_duplicate_returns_conflict() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let schedule = serde_json::to_value(ScheduleBuilder::new().with_train_no("0051").build()).unwrap();
    let response = app
        .clone()
        .oneshot(post_json("/api/tasks", json!({ "schedule": schedule.clone() })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json("/api/tasks", json!({ "schedule": schedule })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = read_json(response).await;
    assert_eq!(json["error"]["type"], "DUPLICATE_TASK");

    // 队列大小保持不变
    let response = app.oneshot(get("/api/tasks")).await.unwrap();
    let json = read_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_task_honors_per_task_options() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let schedule = serde_json::to_value(ScheduleBuilder::new().with_train_no("0077").build()).unwrap();
    let response = app
        .oneshot(post_json(
            "/api/tasks",
            json!({
                "schedule": schedule,
                "seat_count": 2,
                "interval_ms": 3000,
                "stop_on_success": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    assert_eq!(json["data"]["seat_count"], 2);
    assert_eq!(json["data"]["interval_ms"], 3000);
    assert_eq!(json["data"]["stop_on_success"], false);
}

#[tokio::test]
async fn test_delete_task_then_missing_returns_not_found() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let schedule = serde_json::to_value(ScheduleBuilder::new().with_train_no("0031").build()).unwrap();
    app.clone()
        .oneshot(post_json("/api/tasks", json!({ "schedule": schedule })))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/tasks/0031/delete", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json("/api/tasks/0031/delete", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = read_json(response).await;
    assert_eq!(json["error"]["type"], "TASK_NOT_FOUND");
}

#[tokio::test]
async fn test_login_success() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "id": "123456789", "password": "secret" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["strCustNm"], "테스트사용자");
}

#[tokio::test]
async fn test_login_failure_returns_unauthorized() {
    let context =
        create_test_context(MockBookingClient::with_login_error("비밀번호 오류입니다"));
    let app = create_routes(context.state);

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "id": "123456789", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = read_json(response).await;
    assert_eq!(json["error"]["type"], "LOGIN_FAILED");
}

#[tokio::test]
async fn test_list_stations() {
    let client =
        MockBookingClient::new().with_stations(vec![station("서울", "0001"), station("부산", "0020")]);
    let context = create_test_context(client);
    let app = create_routes(context.state);

    let response = app.oneshot(get("/api/stations")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let stations = json["data"].as_array().unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0]["stn_nm"], "서울");
}

#[tokio::test]
async fn test_search_schedules_returns_next_cursor() {
    let client = MockBookingClient::new().with_schedules(vec![ScheduleBuilder::new()
        .with_train_no("0051")
        .with_departure("20260801", "051300")
        .build()]);
    let context = create_test_context(client);
    let app = create_routes(context.state);

    let response = app
        .oneshot(get("/api/schedules?dep=%EC%84%9C%EC%9A%B8&arr=%EB%B6%80%EC%82%B0&date=20260801"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["schedules"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["next_cursor"], "051301");
}

#[tokio::test]
async fn test_search_schedules_rejects_bad_date() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let response = app
        .oneshot(get("/api/schedules?dep=a&arr=b&date=2026-08-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_reservation_by_pnr() {
    let client = MockBookingClient::new()
        .with_reservations(vec![ReservationBuilder::new().with_pnr_no("00012345").build()]);
    let context = create_test_context(client.clone());
    let app = create_routes(context.state);

    let response = app
        .oneshot(post_json("/api/reservations/00012345/cancel", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(client.cancelled_pnr_nos(), vec!["00012345".to_string()]);
}

#[tokio::test]
async fn test_cancel_unknown_reservation_returns_not_found() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let response = app
        .oneshot(post_json("/api/reservations/99999999/cancel", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = read_json(response).await;
    assert_eq!(json["error"]["type"], "RESERVATION_NOT_FOUND");
}

#[tokio::test]
async fn test_set_notification_email() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state.clone());

    let response = app
        .oneshot(post_json(
            "/api/settings/email",
            json!({ "email": "user@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        context.store.value(EMAIL_KEY).unwrap(),
        Value::String("user@example.com".to_string())
    );
}

#[tokio::test]
async fn test_set_notification_email_rejects_invalid_address() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state);

    let response = app
        .oneshot(post_json("/api/settings/email", json!({ "email": "invalid" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_kakao_oauth_callback_exchanges_code() {
    let context = create_test_context(MockBookingClient::new());
    let app = create_routes(context.state.clone());

    let response = app
        .oneshot(get("/oauth/kakao?code=auth-code-123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        context.chat_auth.exchanged_codes(),
        vec!["auth-code-123".to_string()]
    );
}
