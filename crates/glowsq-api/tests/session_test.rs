#![allow(clippy::unwrap_used)]
// Session lifecycle and reads against a mocked controller.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glowsq_api::{ControllerPlatform, Error, Report, Session, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn classic() -> (MockServer, Session) {
    on(ControllerPlatform::ClassicController).await
}

async fn on(platform: ControllerPlatform) -> (MockServer, Session) {
    let server = MockServer::start().await;
    let session = Session::open(
        Url::parse(&server.uri()).unwrap(),
        "default",
        platform,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, session)
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": data }))
}

fn password(s: &str) -> SecretString {
    s.to_string().into()
}

// ── Login / logout ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_credentials() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_partial_json(json!({ "username": "viewer", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    session.login("viewer", &password("pw")).await.unwrap();
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("api.err.Invalid"))
        .mount(&server)
        .await;

    match session.login("viewer", &password("wrong")).await {
        Err(Error::Authentication { message }) => {
            assert!(message.contains("400"), "got: {message}");
            assert!(message.contains("api.err.Invalid"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "unifises=abc123; Path=/")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .and(header("cookie", "unifises=abc123"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    session.login("viewer", &password("pw")).await.unwrap();
    assert!(session.stations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unifi_os_csrf_token_follows_rotation() {
    let (server, mut session) = on(ControllerPlatform::UnifiOs).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-CSRF-Token", "first")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/proxy/network/api/s/default/stat/report/5minutes.site"))
        .and(header("X-CSRF-Token", "first"))
        .respond_with(ok(json!([])).insert_header("X-Updated-CSRF-Token", "second"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/proxy/network/api/s/default/stat/report/daily.site"))
        .and(header("X-CSRF-Token", "second"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("X-CSRF-Token", "second"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    session.login("viewer", &password("pw")).await.unwrap();
    session.recent_report(Report::FiveMinutes).await.unwrap();
    session.recent_report(Report::Daily).await.unwrap();
    session.logout().await.unwrap();
}

#[tokio::test]
async fn test_logout_failure_is_reported() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = session.logout().await.unwrap_err();
    assert!(
        matches!(err, Error::Controller { ref endpoint, .. } if endpoint == "/api/logout"),
        "got: {err:?}"
    );
}

// ── Platform detection ──────────────────────────────────────────────

#[tokio::test]
async fn test_detect_unifi_os() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let url = Url::parse(&server.uri()).unwrap();
    let platform = ControllerPlatform::detect(&url, &TransportConfig::default())
        .await
        .unwrap();
    assert_eq!(platform, ControllerPlatform::UnifiOs);
}

#[tokio::test]
async fn test_detect_classic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = Url::parse(&server.uri()).unwrap();
    let platform = ControllerPlatform::detect(&url, &TransportConfig::default())
        .await
        .unwrap();
    assert_eq!(platform, ControllerPlatform::ClassicController);
}

#[tokio::test]
async fn test_detect_unreachable_is_transport_error() {
    let url = Url::parse("http://127.0.0.1:1").unwrap();
    let err = ControllerPlatform::detect(&url, &TransportConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(ref e) if e.is_connect()), "got: {err:?}");
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stations() {
    let (server, mut session) = classic().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ok(json!([
            { "_id": "c1", "mac": "aa:bb:cc:dd:ee:01", "hostname": "laptop", "is_wired": false, "uptime": 3600 },
            { "_id": "c2", "mac": "aa:bb:cc:dd:ee:02", "name": "NAS", "is_wired": true, "uptime": 86400 }
        ])))
        .mount(&server)
        .await;

    let stations = session.stations().await.unwrap();

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].hostname.as_deref(), Some("laptop"));
    assert_eq!(stations[0].uptime, Some(3600));
    assert_eq!(stations[1].hostname, None);
    assert_eq!(stations[1].name.as_deref(), Some("NAS"));
    assert_eq!(stations[1].is_wired, Some(true));
}

#[tokio::test]
async fn test_report_requests_wan_attrs() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .and(path("/api/s/default/stat/report/5minutes.site"))
        .and(body_partial_json(json!({
            "attrs": ["bytes", "wan-tx_bytes", "wan-rx_bytes", "wlan_bytes",
                      "num_sta", "lan-num_sta", "wlan-num_sta", "time"],
            "start": 1_699_999_000_000_i64,
            "end": 1_700_000_400_000_i64
        })))
        .respond_with(ok(json!([
            { "time": 1_700_000_000_000_i64, "wan-tx_bytes": 10.5, "wan-rx_bytes": 20 },
            { "time": 1_700_000_300_000_i64, "wan-tx_bytes": 11, "wan-rx_bytes": 21 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = session
        .report(Report::FiveMinutes, 1_699_999_000_000, 1_700_000_400_000)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].wan_tx_bytes, Some(10.5));
    assert_eq!(rows[1].wan_rx_bytes, Some(21.0));
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired() {
    let (server, mut session) = classic().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    match session.stations().await {
        Err(Error::Authentication { message }) => {
            assert!(message.contains("session expired"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_rc_error_names_endpoint() {
    let (server, mut session) = classic().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "rc": "error", "msg": "api.err.LoginRequired" },
            "data": []
        })))
        .mount(&server)
        .await;

    match session.stations().await {
        Err(Error::Controller { endpoint, message }) => {
            assert_eq!(endpoint, "stat/sta");
            assert_eq!(message, "api.err.LoginRequired");
        }
        other => panic!("expected Controller error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_error_body_with_http_200() {
    let (server, mut session) = on(ControllerPlatform::UnifiOs).await;

    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 401, "message": "Unauthorized" }
        })))
        .mount(&server)
        .await;

    let result = session.stations().await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Unauthorized"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_html_body_is_payload_error() {
    let (server, mut session) = classic().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    match session.stations().await {
        Err(Error::Payload { endpoint, body, .. }) => {
            assert_eq!(endpoint, "stat/sta");
            assert!(body.contains("<html>"));
        }
        other => panic!("expected Payload error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_is_controller_error() {
    let (server, mut session) = classic().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = session.recent_report(Report::Daily).await;
    assert!(
        matches!(result, Err(Error::Controller { ref message, .. }) if message.contains("403")),
        "got: {result:?}"
    );
}
