use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::token::TokenClaims;

const TOKEN_FIELDS: [&str; 3] = ["token", "accessToken", "access_token"];

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Token plus whatever else the login or refresh endpoint returned.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "Value")]
pub struct AuthSession {
    pub token: String,
    pub body: Value,
}

impl AuthSession {
    pub fn claims(&self) -> Result<TokenClaims, Error> {
        TokenClaims::decode(&self.token)
    }
}

impl TryFrom<Value> for AuthSession {
    type Error = Error;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        match extract_token(&body) {
            Some(token) => Ok(Self { token, body }),
            None => Err(Error::Refresh("response carried no token".to_string())),
        }
    }
}

/// Looks for the token at the top level, then inside a `data` object.
pub(crate) fn extract_token(body: &Value) -> Option<String> {
    TOKEN_FIELDS
        .iter()
        .find_map(|field| match body.get(field) {
            Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
            _ => None,
        })
        .or_else(|| {
            let data = body.get("data")?;
            TOKEN_FIELDS.iter().find_map(|field| match data.get(field) {
                Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
                _ => None,
            })
        })
}
