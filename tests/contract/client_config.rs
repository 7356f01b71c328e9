use std::fs;
use std::path::PathBuf;

use roomlink_client::{Config, ConfigLocation, RoomLinkClient};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn file_config_supplies_token_and_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/rooms"))
        .and(header("Authorization", "Bearer from-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = json!({
        "base_url": server.uri(),
        "api_prefix": "/v1",
        "token": "from-file",
        "timeout_secs": 5
    });
    let mut cfg_path = PathBuf::from("target");
    fs::create_dir_all(&cfg_path).ok();
    cfg_path.push(format!("contract-config-{}.json", server.address().port()));
    fs::write(&cfg_path, serde_json::to_string(&cfg).unwrap()).unwrap();

    let config = Config::load(ConfigLocation::File(
        cfg_path.to_string_lossy().to_string(),
    ))
    .await
    .expect("cfg file");
    let client = RoomLinkClient::new(config).expect("client");
    let _: Value = client.get("/rooms").await.expect("rooms");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_file("target/definitely-missing-roomlink.json").unwrap_err();
    assert!(matches!(err, roomlink_client::Error::Io(_)));
}

#[test]
fn env_config_reads_roomlink_vars() {
    // Single test touching these vars, so no cross-test races.
    unsafe {
        std::env::set_var("ROOMLINK_BASE_URL", "https://roomlink.example.com");
        std::env::set_var("ROOMLINK_TOKEN", "env-token");
        std::env::set_var("ROOMLINK_TIMEOUT_SECS", "12");
        std::env::set_var("ROOMLINK_COALESCE_REFRESH", "true");
    }
    let config = Config::from_env().expect("env config");
    assert_eq!(config.base_url, "https://roomlink.example.com");
    assert_eq!(config.token.as_deref(), Some("env-token"));
    assert_eq!(config.timeout_secs, Some(12));
    assert!(config.coalesce_refresh);

    unsafe {
        std::env::set_var("ROOMLINK_TIMEOUT_SECS", "soon");
    }
    assert!(matches!(
        Config::from_env(),
        Err(roomlink_client::Error::Config(_))
    ));
}
