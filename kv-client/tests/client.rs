//! End-to-end tests driving a real `kv-server` instance over HTTP through
//! `KVClient`, matching the teacher's `hkv-client/tests/client.rs` style of
//! standing up a live listener and exercising the wire protocol rather than
//! calling handlers directly.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use kv_client::KVClient;
use kv_server::config::Config;
use kv_server::state::AppState;
use kv_server::{openapi, routes};

async fn spawn_test_server() -> String {
    let config = Config::parse_from(["kv-server", "--shards", "2", "--no-persistence"]);
    let state = Arc::new(AppState::start(&config).await.unwrap());
    let app = openapi::mount(routes::build_router(state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn string_round_trip_through_http() {
    let base_url = spawn_test_server().await;
    let client = KVClient::connect(base_url).unwrap();

    client.add_string("greeting", "hello", None).await.unwrap();
    assert_eq!(client.get_string("greeting").await.unwrap(), "hello");

    client.update_string("greeting", "hi", "hello").await.unwrap();
    assert_eq!(client.get_string("greeting").await.unwrap(), "hi");

    let err = client
        .update_string("greeting", "bye", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, kv_client::ClientError::Server { status: 400, .. }));

    assert_eq!(client.string_keys().await.unwrap(), vec!["greeting".to_string()]);

    client.delete_string("greeting").await.unwrap();
    let err = client.get_string("greeting").await.unwrap_err();
    assert!(matches!(err, kv_client::ClientError::Server { status: 404, .. }));
}

#[tokio::test]
async fn list_values_can_be_added_updated_and_removed() {
    let base_url = spawn_test_server().await;
    let client = KVClient::connect(base_url).unwrap();

    client
        .add_list("tags", vec!["a".to_string(), "b".to_string()], None)
        .await
        .unwrap();
    client.add_list_value("tags", "c").await.unwrap();
    assert_eq!(
        client.get_list("tags").await.unwrap(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );

    client.update_list_value("tags", "b", "z").await.unwrap();
    assert_eq!(
        client.get_list("tags").await.unwrap(),
        vec!["a".to_string(), "z".to_string(), "c".to_string()]
    );

    client.delete_list_value("tags", "z").await.unwrap();
    assert_eq!(
        client.get_list("tags").await.unwrap(),
        vec!["a".to_string(), "c".to_string()]
    );

    assert_eq!(client.list_keys().await.unwrap(), vec!["tags".to_string()]);
}

#[tokio::test]
async fn dictionary_subkeys_never_overwrite_silently() {
    let base_url = spawn_test_server().await;
    let client = KVClient::connect(base_url).unwrap();

    client
        .add_dictionary("user:1", vec![("name".to_string(), "ada".to_string())], None)
        .await
        .unwrap();

    let err = client
        .add_dictionary_value("user:1", "name", "grace")
        .await
        .unwrap_err();
    assert!(matches!(err, kv_client::ClientError::Server { status: 400, .. }));

    client
        .add_dictionary_value("user:1", "role", "admin")
        .await
        .unwrap();

    let mut values = client.get_dictionary("user:1").await.unwrap();
    values.sort();
    assert_eq!(
        values,
        vec![
            ("name".to_string(), "ada".to_string()),
            ("role".to_string(), "admin".to_string()),
        ]
    );

    client
        .update_dictionary_value("user:1", "name", "grace", "ada")
        .await
        .unwrap();
    client.delete_dictionary_value("user:1", "role").await.unwrap();

    assert_eq!(
        client.get_dictionary("user:1").await.unwrap(),
        vec![("name".to_string(), "grace".to_string())]
    );

    assert_eq!(client.dictionary_keys().await.unwrap(), vec!["user:1".to_string()]);
}
