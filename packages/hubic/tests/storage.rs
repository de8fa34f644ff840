//! Transfer manager against a mocked Swift endpoint over real HTTP.

use std::collections::HashSet;
use std::sync::Arc;

use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubic_http::ReqwestExecutor;
use hubic_plugin::{HubicTransferManager, HubicTransferSettings};
use hubic_transfer::{
    PropertyDescriptor, PropertyVisitor, RemoteFile, RemoteFileType, StorageError,
    TransferManager, TransferSettings,
};

const TOKEN: &str = "storage-token";

fn manager(server: &MockServer) -> HubicTransferManager {
    // reqwest's blocking client cannot be built inside an async runtime.
    let uri = server.uri();
    std::thread::spawn(move || HubicTransferManager::new(&uri, TOKEN).unwrap())
        .join()
        .unwrap()
}

#[tokio::test]
async fn test_upload_expects_201() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/default/multichunks/mc-1"))
        .and(header("X-Auth-Token", TOKEN))
        .and(body_bytes(b"chunk".to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("mc-1");
    std::fs::write(&source, b"chunk").unwrap();
    let manager = manager(&server);

    tokio::task::spawn_blocking(move || {
        manager
            .upload(&source, &RemoteFileType::Multichunk.file("mc-1"))
            .unwrap()
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_upload_receiving_200_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("a-1");
    std::fs::write(&source, b"action").unwrap();
    let manager = manager(&server);

    let result = tokio::task::spawn_blocking(move || {
        manager.upload(&source, &RemoteFileType::Action.file("a-1"))
    })
    .await
    .unwrap();

    match result {
        Err(StorageError::UnexpectedStatus { status, .. }) => assert_eq!(status, 200),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_download_writes_local_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/default/databases/db-7"))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146, 150]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("db-7");
    let written = target.clone();
    let manager = manager(&server);

    tokio::task::spawn_blocking(move || {
        manager
            .download(&RemoteFileType::Cleanup.file("db-7"), &target)
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(std::fs::read(written).unwrap(), vec![0u8, 159, 146, 150]);
}

#[tokio::test]
async fn test_delete_on_404_returns_true() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/default/temporary/t-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let manager = manager(&server);

    let (first, second) = tokio::task::spawn_blocking(move || {
        let remote = RemoteFileType::Temp.file("t-1");
        (manager.delete(&remote).unwrap(), manager.delete(&remote).unwrap())
    })
    .await
    .unwrap();

    assert!(first);
    assert!(second);
}

#[tokio::test]
async fn test_delete_refused_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let deleted = tokio::task::spawn_blocking(move || {
        manager.delete(&RemoteFileType::Action.file("a-1")).unwrap()
    })
    .await
    .unwrap();

    assert!(!deleted);
}

#[tokio::test]
async fn test_list_returns_only_files() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/default"))
        .and(query_param("path", "transactions/"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "transactions/", "content_type": "application/directory", "bytes": 0},
            {"name": "transactions/tx-1", "content_type": "application/octet-stream", "bytes": 10},
            {"name": "transactions/tx-2", "content_type": "application/octet-stream", "bytes": 12},
            {"name": "transactions/old/", "content_type": "application/directory", "bytes": 0}
        ])))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let files = tokio::task::spawn_blocking(move || {
        manager
            .list(RemoteFileType::Transaction, &RemoteFileType::Transaction)
            .unwrap()
    })
    .await
    .unwrap();

    let expected: HashSet<_> = [
        RemoteFileType::Transaction.file("tx-1"),
        RemoteFileType::Transaction.file("tx-2"),
    ]
    .into_iter()
    .collect();
    assert_eq!(files, expected);
}

#[tokio::test]
async fn test_move_copies_then_deletes() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/default/databases/db-1"))
        .and(header("X-Copy-From", "default/temporary/t-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/default/temporary/t-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager(&server);
    tokio::task::spawn_blocking(move || {
        manager
            .move_file(
                &RemoteFileType::Temp.file("t-1"),
                &RemoteFileType::Database.file("db-1"),
            )
            .unwrap()
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_move_reports_failed_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let result = tokio::task::spawn_blocking(move || {
        manager.move_file(
            &RemoteFileType::Temp.file("t-1"),
            &RemoteFileType::Database.file("db-1"),
        )
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn test_init_creates_folder_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/default"))
        .and(query_param("path", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(header("Content-Type", "application/directory"))
        .and(header("content-length", "0"))
        .respond_with(ResponseTemplate::new(201))
        .expect(6)
        .mount(&server)
        .await;

    let manager = manager(&server);
    tokio::task::spawn_blocking(move || manager.init(true, &RemoteFile::syncany()).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_init_accepts_any_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(202))
        .expect(5)
        .mount(&server)
        .await;

    let manager = manager(&server);
    tokio::task::spawn_blocking(move || manager.init(false, &RemoteFile::syncany()).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_write_probe() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/default/syncany-write-test"))
        .and(body_bytes(vec![1u8, 2, 3]))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/default/syncany-write-test"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager(&server);
    let writable = tokio::task::spawn_blocking(move || manager.test_target_can_write().unwrap())
        .await
        .unwrap();

    assert!(writable);
}

#[tokio::test]
async fn test_repo_file_exists_uses_root_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/default"))
        .and(query_param("path", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "multichunks/", "content_type": "application/directory"},
            {"name": "syncany", "content_type": "application/octet-stream"}
        ])))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let exists = tokio::task::spawn_blocking(move || {
        manager.test_repo_file_exists(&RemoteFile::syncany()).unwrap()
    })
    .await
    .unwrap();

    assert!(exists);
}

/// Answers only the access token prompt.
struct AccessToken(&'static str);

impl PropertyVisitor for AccessToken {
    fn string_property(
        &mut self,
        property: &PropertyDescriptor,
        _current: Option<&str>,
    ) -> Option<String> {
        (property.id == "accessToken").then(|| self.0.to_string())
    }
}

#[tokio::test]
async fn test_access_token_exchange_then_transfer() {
    let server = MockServer::start().await;
    let storage = format!("{}/v1/AUTH_abc", server.uri());

    Mock::given(method("GET"))
        .and(path("/1.0/account/credentials"))
        .and(header("Authorization", "Bearer oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "issued-token",
            "endpoint": storage,
            "expires": "2026-10-17T00:00:00+02:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/AUTH_abc/default/actions/a-1"))
        .and(header("X-Auth-Token", "issued-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api_base = server.uri();
    let deleted = tokio::task::spawn_blocking(move || {
        let mut settings = HubicTransferSettings::new()
            .with_api_base(api_base)
            .with_executor(Arc::new(ReqwestExecutor::new().unwrap()));
        settings
            .visit_properties(&mut AccessToken("oauth-token"))
            .unwrap();

        let manager = settings.create_transfer_manager().unwrap();
        manager.delete(&RemoteFileType::Action.file("a-1")).unwrap()
    })
    .await
    .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn test_expired_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/account/credentials"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api_base = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut settings = HubicTransferSettings::new().with_api_base(api_base);
        settings.visit_properties(&mut AccessToken("stale"))
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(StorageError::AuthenticationExpired)));
}
