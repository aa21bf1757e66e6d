#![allow(clippy::unwrap_used)]
// Integration tests for `RuckusClient` using wiremock.

use std::collections::BTreeMap;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dpskman_api::{Error, RuckusClient, Session, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RuckusClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RuckusClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn session() -> Session {
    Session::new("csrf-abc", "-ejs-session-=xyz")
}

const LIST_REPLY: &str = r#"<ajax-response>
  <response type="object" id="dpsk-list.1">
    <apstamgr-stat>
      <dpsk-list>
        <dpsk id="1" mac="aa:bb:cc:dd:ee:ff" wlansvc-id="3" dvlan-id="0" user="alice" passphrase="p1"/>
        <dpsk id="2" mac="" wlansvc-id="3" dvlan-id="10" user="bob" passphrase="p2"/>
      </dpsk-list>
    </apstamgr-stat>
  </response>
</ajax-response>"#;

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_returns_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/login.jsp"))
        .and(body_string_contains("username=dpsk"))
        .and(body_string_contains("ok=Log+In"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("HTTP_X_CSRF_TOKEN", "csrf-abc")
                .insert_header("Set-Cookie", "-ejs-session-=xyz; Path=/; Secure; HttpOnly")
                .insert_header("Location", "/admin/dashboard.jsp"),
        )
        .mount(&server)
        .await;

    // The session must be replayed verbatim on the next call.
    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .and(header("X-CSRF-Token", "csrf-abc"))
        .and(header("Cookie", "-ejs-session-=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_REPLY))
        .expect(1)
        .mount(&server)
        .await;

    let password = SecretString::from("hunter2".to_string());
    let session = client.login("dpsk", &password).await.unwrap();
    let entries = client.list_dpsk(&session).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_login_without_csrf_header_fails() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/login.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let password = SecretString::from("wrong".to_string());
    let result = client.login("dpsk", &password).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── DPSK tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_dpsk_sends_getstat() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .and(header("Content-Type", "text/xml"))
        .and(body_string_contains(r#"action="getstat""#))
        .and(body_string_contains("<dpsklist/>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_REPLY))
        .mount(&server)
        .await;

    let entries = client.list_dpsk(&session()).await.unwrap();

    assert_eq!(entries[0].user, "alice");
    assert_eq!(entries[1].dvlan_id, "10");
}

#[tokio::test]
async fn test_create_dpsk_posts_batch_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .and(body_string_contains("cmd='batch-dpsk'"))
        .and(body_string_contains("wlansvc-id='3'"))
        .and(body_string_contains("user='carol'"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ajax-response/>"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_dpsk(&session(), 3, "carol", 12)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_dpsk_non_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.create_dpsk(&session(), 3, "carol", 12).await;
    assert!(
        matches!(result, Err(Error::Status { status: 500, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_update_dpsk_posts_partial_object() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/_conf.jsp"))
        .and(body_string_contains("action='updobj'"))
        .and(body_string_contains("<dpsk id='1' name='dpsk1' IS_PARTIAL='true' passphrase='newpass'/>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ajax-response/>"))
        .expect(1)
        .mount(&server)
        .await;

    let fields = BTreeMap::from([("passphrase".to_owned(), "newpass".to_owned())]);
    client.update_dpsk(&session(), 1, &fields).await.unwrap();
}

#[tokio::test]
async fn test_redirect_means_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/admin/login.jsp"))
        .mount(&server)
        .await;

    let result = client.list_dpsk(&session()).await;
    assert!(matches!(result, Err(Error::SessionExpired)), "got: {result:?}");
}

// ── Backup tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_download_backup_writes_bytes_verbatim() {
    let (server, client) = setup().await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    Mock::given(method("GET"))
        .and(path("/admin/webPage/system/admin/_savebackup.jsp"))
        .and(header("Accept", "application/octet-stream"))
        .and(header("Cookie", "-ejs-session-=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("file.bak");
    let written = client.download_backup(&session(), &dest).await.unwrap();

    assert_eq!(written, 4096);
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
}

#[tokio::test]
async fn test_download_backup_rejects_non_ok() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/webPage/system/admin/_savebackup.jsp"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("file.bak");
    let result = client.download_backup(&session(), &dest).await;

    assert!(
        matches!(result, Err(Error::Status { status: 204, .. })),
        "got: {result:?}"
    );
    assert!(!dest.exists());
}
