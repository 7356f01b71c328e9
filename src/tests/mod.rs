
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;

use super::*;

#[tokio::test]
async fn it_works() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "refreshToken=r1; Path=/; HttpOnly")
                .set_body_json(json!({"token": "t1", "user": {"role": "student"}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;

    let client = RoomLinkClient::new(Config::from_values(server.uri(), None, None))
        .expect("Failed to create client");
    let session = client
        .login(&Credentials::new("student", "secret"))
        .await
        .expect("Failed to log in");
    assert_eq!(session.token, "t1");
    assert_eq!(session.body["user"]["role"], "student");

    let rooms: Value = client
        .get("/rooms/active")
        .await
        .expect("Failed to list rooms");
    assert_eq!(rooms, json!([{"id": 1}]));

    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(
        last.headers.get("Authorization").unwrap().to_str().unwrap(),
        "Bearer t1"
    );
}
