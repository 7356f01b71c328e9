use roomlink_client::{Config, Error, RoomLinkClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn configured_public_route_skips_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/announcements"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refreshToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "NEW"})))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config::from_values(server.uri(), Some("tok".into()), None)
        .with_public_route("/public/announcements");
    let client = RoomLinkClient::new(config).expect("client");
    assert!(client.public_routes().contains("/public/announcements/"));

    let res: Result<Value, Error> = client.get("/public/announcements?page=1").await;
    assert!(res.expect_err("401 is final").is_unauthorized());
}

#[tokio::test]
async fn lookalike_of_public_route_still_refreshes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login-history"))
        .and(wiremock::matchers::header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login-history"))
        .and(wiremock::matchers::header("Authorization", "Bearer NEW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refreshToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "NEW"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RoomLinkClient::new(Config::from_values(server.uri(), Some("tok".into()), None))
        .expect("client");
    let history: Value = client.get("/auth/login-history").await.expect("history");
    assert_eq!(history, json!([]));
}
