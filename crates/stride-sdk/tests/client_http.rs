//! Client scenarios against a real HTTP server.

use std::sync::Arc;

use serde_json::json;
use stride_sdk::api::{Credentials, Registration};
use stride_sdk::views::{self, dashboard_resources, Dashboard};
use stride_sdk::{
    ClientConfig, ErrorKind, FileStore, KeyValueStore, MemoryStore, Navigator, QueryKey,
    RecordingNavigator, StrideClient, UserRecord, ViewScope,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_body() -> serde_json::Value {
    json!({
        "access_token": "fresh-token",
        "user": {"id": 7, "email": "runner@example.com", "full_name": "Ada Runner"}
    })
}

fn client_with(
    server: &MockServer,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
) -> StrideClient {
    StrideClient::new(&ClientConfig::new(server.uri()), store, navigator).unwrap()
}

fn signed_in_client(server: &MockServer, navigator: Arc<RecordingNavigator>) -> StrideClient {
    let client = client_with(server, Arc::new(MemoryStore::new()), navigator);
    client
        .session()
        .set_session("old-token", &UserRecord::new("7", "runner@example.com"))
        .unwrap();
    client
}

async fn mount_ok(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_then_authenticated_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "runner@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"weekly_km": 40})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Arc::new(MemoryStore::new()),
        Arc::new(RecordingNavigator::at("/login")),
    );
    let user = client
        .auth()
        .login(&Credentials::new("runner@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(user.display_name(), "Ada Runner");
    let session = client.session().snapshot();
    assert_eq!(session.token.as_deref(), Some("fresh-token"));
    assert_eq!(session.user.unwrap().email, "runner@example.com");

    let profile = client.profile().get().await.unwrap();
    assert_eq!(profile, json!({"weekly_km": 40}));
}

#[tokio::test]
async fn failed_registration_stays_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"detail": [{"msg": "email taken"}]})),
        )
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        Arc::new(MemoryStore::new()),
        Arc::new(RecordingNavigator::at("/register")),
    );
    let err = client
        .auth()
        .register(&Registration::new(Credentials::new("a@b.co", "pw")).with_full_name("Ada"))
        .await
        .unwrap_err();

    assert_eq!(err.validation_messages(), ["email taken".to_string()]);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn cached_reads_until_mutation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/goals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/goals"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));

    let first = client.goals().list().await.unwrap();
    let second = client.goals().list().await.unwrap();
    assert_eq!(first, second);

    client
        .goals()
        .create(&json!({"distance": "10k"}))
        .await
        .unwrap();
    assert!(client.cache().get_value(&QueryKey::from(["goals"])).is_none());

    client.goals().list().await.unwrap();
}

#[tokio::test]
async fn failed_mutation_keeps_cache() {
    let server = MockServer::start().await;
    mount_ok(&server, "/nutrition/targets", json!({"kcal": 2500})).await;
    Mock::given(method("PUT"))
        .and(path("/nutrition/targets"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    client.nutrition().targets().await.unwrap();

    let err = client
        .nutrition()
        .update_targets(&json!({"kcal": 3000}))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert!(client
        .cache()
        .get_value(&QueryKey::from(["nutrition", "targets"]))
        .is_some());
}

#[tokio::test]
async fn zone_update_invalidates_analytics() {
    let server = MockServer::start().await;
    mount_ok(&server, "/analytics/form-status", json!({"tsb": 4})).await;
    Mock::given(method("PUT"))
        .and(path("/coach/zones/manual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    client.analytics().form_status().await.unwrap();
    let key = QueryKey::from(["analytics", "form-status"]);
    assert!(client.cache().get_value(&key).is_some());

    client
        .coach()
        .set_manual_zones(&json!({"z2": [130, 145]}))
        .await
        .unwrap();

    assert!(client.cache().get_value(&key).is_none());
}

#[tokio::test]
async fn dashboard_renders_with_optional_failures() {
    let server = MockServer::start().await;
    mount_ok(&server, "/analytics/form-status", json!({"tsb": 4})).await;
    mount_ok(&server, "/analytics/fitness-summary", json!({"ctl": 52})).await;
    mount_ok(&server, "/analytics/race-prediction", json!({"10k": "44:10"})).await;
    mount_ok(&server, "/coach/zones", json!({"z2": [130, 145]})).await;
    Mock::given(method("GET"))
        .and(path("/analytics/fatigue-analysis"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/goals/primary"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    let result = views::dashboard(&client, &ViewScope::new()).await.unwrap();

    assert!(result.blocking_error().is_none());
    assert_eq!(
        result.degraded(),
        vec![
            dashboard_resources::FATIGUE_ANALYSIS,
            dashboard_resources::PRIMARY_GOAL
        ]
    );

    let dashboard = Dashboard::from_result(result).unwrap();
    assert_eq!(dashboard.form_status, json!({"tsb": 4}));
    assert_eq!(dashboard.fitness_summary, json!({"ctl": 52}));
    assert!(dashboard.fatigue_analysis.is_none());
    assert!(dashboard.primary_goal.is_none());
    assert_eq!(dashboard.training_zones, Some(json!({"z2": [130, 145]})));
}

#[tokio::test]
async fn dashboard_blocked_by_critical_failure() {
    let server = MockServer::start().await;
    mount_ok(&server, "/analytics/fitness-summary", json!({"ctl": 52})).await;
    Mock::given(method("GET"))
        .and(path("/analytics/form-status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    let err = views::load_dashboard(&client, &ViewScope::new())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerError);
}

#[tokio::test]
async fn expired_session_mid_use() {
    let server = MockServer::start().await;
    mount_ok(&server, "/goals", json!([{"id": 1}])).await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coach/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::at("/dashboard"));
    let client = signed_in_client(&server, navigator.clone());
    client.goals().list().await.unwrap();

    let err = client.profile().get().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AuthenticationExpired);
    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert!(client.cache().is_empty());
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);

    // The next protected call still goes out, just without a credential.
    let err = client.coach().profile().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AuthenticationExpired);
    assert_eq!(navigator.redirects().len(), 1);

    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.path(), "/coach/profile");
    assert!(last.headers.get("authorization").is_none());
}

#[tokio::test]
async fn me_refreshes_stored_user() {
    let server = MockServer::start().await;
    mount_ok(
        &server,
        "/auth/me",
        json!({"id": 7, "email": "runner@example.com", "name": "Ada", "plan": "pro"}),
    )
    .await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    let user = client.auth().me().await.unwrap();

    assert_eq!(user.name.as_deref(), Some("Ada"));
    assert_eq!(client.session().user(), Some(user));
}

#[tokio::test]
async fn logout_drops_session_and_cache() {
    let server = MockServer::start().await;
    mount_ok(&server, "/strava/status", json!({"connected": true})).await;

    let client = signed_in_client(&server, Arc::new(RecordingNavigator::new()));
    client.strava().status().await.unwrap();
    assert!(!client.cache().is_empty());

    client.auth().logout();

    assert!(!client.session().is_authenticated());
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn session_survives_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("session.json");

    let client = client_with(
        &server,
        Arc::new(FileStore::open(&state)),
        Arc::new(RecordingNavigator::at("/login")),
    );
    client
        .auth()
        .login(&Credentials::new("runner@example.com", "pw"))
        .await
        .unwrap();
    drop(client);

    let reloaded = client_with(
        &server,
        Arc::new(FileStore::open(&state)),
        Arc::new(RecordingNavigator::new()),
    );
    assert_eq!(reloaded.session().token().as_deref(), Some("fresh-token"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_expiry_redirects_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    let navigator = Arc::new(RecordingNavigator::at("/dashboard"));
    let client = signed_in_client(&server, navigator.clone());

    let err = views::load_dashboard(&client, &ViewScope::new())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthenticationExpired);
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert!(client.cache().is_empty());
}
