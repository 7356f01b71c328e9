use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{
    RoomLinkClient,
    errors::Error,
    request_context::{FormPart, RequestBody, RequestOptions},
    routes,
    token::TokenClaims,
    types::{AuthSession, Credentials},
};

/// Image uploaded to the identity-card and avatar checks.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: "image/jpeg".to_string(),
            bytes,
        }
    }

    fn into_body(self) -> RequestBody {
        RequestBody::Multipart(vec![FormPart::file(
            "file",
            self.file_name,
            self.mime,
            self.bytes,
        )])
    }
}

impl RoomLinkClient {
    /// Log in and install the returned access token for later requests.
    pub async fn login<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<AuthSession, Error> {
        let session: AuthSession = self.post(routes::LOGIN, credentials).await?;
        self.tokens.install_token(session.token.clone()).await;
        info!(token_len = session.token.len(), "login ok");
        Ok(session)
    }

    pub async fn login_with_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, Error> {
        self.login(&Credentials::new(username, password)).await
    }

    pub async fn register<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value, Error> {
        self.post(routes::REGISTER, payload).await
    }

    /// Identity-card (CCCD) check; multipart upload with a single `file` part.
    pub async fn check_cccd(&self, image: ImageUpload) -> Result<Value, Error> {
        self.request(
            Method::POST,
            routes::CHECK_CCCD,
            image.into_body(),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn check_avatar(&self, image: ImageUpload) -> Result<Value, Error> {
        self.request(
            Method::POST,
            routes::CHECK_AVATAR,
            image.into_body(),
            RequestOptions::default(),
        )
        .await
    }

    /// Refresh the access token now, outside of any failing request.
    pub async fn refresh_token(&self) -> Result<String, Error> {
        let snapshot = self.perform_refresh().await?;
        snapshot
            .value
            .ok_or_else(|| Error::Refresh("refresh installed no token".to_string()))
    }

    /// Forget the access token; later requests go out without a bearer header.
    pub async fn clear_token(&self) {
        self.tokens.clear().await;
        info!("token cleared");
    }

    /// Claims of the installed token, if there is one.
    pub async fn current_claims(&self) -> Result<Option<TokenClaims>, Error> {
        match self.tokens.current().await {
            Some(token) => TokenClaims::decode(&token).map(Some),
            None => Ok(None),
        }
    }
}
