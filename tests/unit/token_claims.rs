use jsonwebtoken::{EncodingKey, Header, encode};
use roomlink_client::{Config, RoomLinkClient, TokenClaims};

fn token_for(role: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &serde_json::json!({ "sub": "u-1", "role": role, "exp": exp }),
        &EncodingKey::from_secret(b"not-shared-with-client"),
    )
    .expect("sign")
}

#[test]
fn future_expiry_is_not_expired() {
    let exp = jiff::Timestamp::now().as_second() + 3_600;
    let claims = TokenClaims::decode(&token_for("admin", exp)).expect("decode");
    assert_eq!(claims.role.as_deref(), Some("admin"));
    assert!(!claims.is_expired());
}

#[tokio::test]
async fn client_exposes_claims_of_installed_token() {
    let token = token_for("student", 4_102_444_800);
    let client = RoomLinkClient::new(Config::from_values(
        "http://localhost:8080",
        Some(token),
        None,
    ))
    .expect("client");
    let claims = client
        .current_claims()
        .await
        .expect("decode")
        .expect("token installed");
    assert_eq!(claims.sub.as_deref(), Some("u-1"));
    assert_eq!(claims.role.as_deref(), Some("student"));
}
