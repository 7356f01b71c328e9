use roomlink_client::{Config, Error, RoomLinkClient};

#[test]
fn invalid_base_url_fails_fast() {
    let cfg = Config::from_values("http://", None, None);

    let err = match RoomLinkClient::new(cfg) {
        Ok(_) => panic!("expected invalid URL error"),
        Err(err) => err,
    };

    match err {
        Error::Config(msg) => {
            assert!(msg.contains("Invalid base URL"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn api_root_honours_custom_prefix() {
    let mut cfg = Config::from_values("http://localhost:8080/", None, None);
    cfg.api_prefix = "/v2/api/".to_string();
    let client = RoomLinkClient::new(cfg).expect("client");
    assert_eq!(client.api_root(), "http://localhost:8080/v2/api");
}

#[test]
fn bare_host_defaults_to_https() {
    let client =
        RoomLinkClient::new(Config::from_values("roomlink.example.com", None, None)).expect("client");
    assert_eq!(client.api_root(), "https://roomlink.example.com/api");
}
