use std::sync::Arc;
use std::time::SystemTime;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::{
    RoomLinkClient,
    dispatch::{DispatchOutcome, RequestState},
    errors::Error,
    request_context::{RequestBody, RequestContext, RequestOptions},
    telemetry::refresh::RefreshTelemetry,
    token::{TokenSnapshot, TokenSource},
    types::extract_token,
};

impl RoomLinkClient {
    /// Issue a call against `<api root><path>` and return the response payload.
    ///
    /// A 401 on a non-public route triggers one refresh of the access token and
    /// one replay of the call. Any other failure is returned unchanged.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let mut ctx = RequestContext::new(method, path)
            .with_body(body)
            .with_options(options);
        let payload = self.dispatch(&mut ctx).await?;
        decode_payload(&payload)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, RequestBody::Empty, RequestOptions::default())
            .await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        self.request(Method::GET, path, RequestBody::Empty, options)
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(
            Method::POST,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(
            Method::PUT,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(
            Method::PATCH,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(
            Method::DELETE,
            path,
            RequestBody::Empty,
            RequestOptions::default(),
        )
        .await
    }

    /// Install the token source used by every request made after this call.
    pub async fn set_token_source<S>(&self, source: S)
    where
        S: TokenSource + 'static,
    {
        self.tokens.install(Arc::new(source)).await;
    }

    /// Drive one logical request through its attempts and return the raw body.
    pub async fn dispatch(&self, ctx: &mut RequestContext) -> Result<String, Error> {
        let start = Instant::now();
        let mut state = RequestState::Initial;
        let mut attempts: u8 = 0;
        let mut refreshed = false;
        let mut token = self.tokens.snapshot().await;

        loop {
            state = state.on_sent();
            attempts += 1;
            match self.send_once(ctx, token.value.as_deref()).await {
                Ok(body) => {
                    state = state.on_success();
                    self.log_outcome(ctx, state, attempts, refreshed, start);
                    return Ok(body);
                }
                Err(err) => {
                    let recoverable = err.is_unauthorized()
                        && !ctx.retried()
                        && !self.public_routes.contains(&ctx.path);
                    state = state.on_failure(recoverable);
                    if state.is_terminal() {
                        self.log_outcome(ctx, state, attempts, refreshed, start);
                        return Err(err);
                    }

                    ctx.mark_retried();
                    match self.refresh_after(token.generation).await {
                        Ok(fresh) => {
                            refreshed = true;
                            token = fresh;
                        }
                        Err(refresh_err) => {
                            state = state.on_refresh_failed();
                            self.log_outcome(ctx, state, attempts, refreshed, start);
                            return Err(refresh_err);
                        }
                    }
                }
            }
        }
    }

    async fn send_once(&self, ctx: &RequestContext, token: Option<&str>) -> Result<String, Error> {
        let url = self.url_for(&ctx.path);
        let mut builder = self.http_client.request(ctx.method.clone(), &url);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let resp = ctx.apply(builder)?.send().await?;

        let status = resp.status();
        if status.is_success() {
            // A body that fails to arrive in full is a transport error, not an empty payload
            let body = resp.text().await?;
            debug!(method = %ctx.method, path = %ctx.path, status = status.as_u16(), "request.ok");
            return Ok(body);
        }
        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            warn!(
                method = %ctx.method,
                path = %ctx.path,
                status = status.as_u16(),
                retried = ctx.retried(),
                "request.unauthorized: 401 received"
            );
        } else {
            error!(
                method = %ctx.method,
                path = %ctx.path,
                status = status.as_u16(),
                "request.failed"
            );
        }
        Err(Error::Http(status, body))
    }

    /// Get a token newer than `seen_generation`.
    ///
    /// Without coalescing every caller performs its own refresh call. With it,
    /// callers queue on the refresh lock and reuse a token installed while they waited.
    async fn refresh_after(&self, seen_generation: u64) -> Result<TokenSnapshot, Error> {
        if !self.coalesce_refresh {
            return self.perform_refresh().await;
        }

        let _lock = self.refresh_lock.lock().await;
        let current = self.tokens.snapshot().await;
        if current.generation != seen_generation && current.value.is_some() {
            let telemetry = RefreshTelemetry::new(self.refresh_path.as_str());
            telemetry.emit_coalesced(seen_generation, current.generation);
            return Ok(current);
        }
        self.perform_refresh().await
    }

    /// Call the refresh endpoint and install the returned token.
    pub(crate) async fn perform_refresh(&self) -> Result<TokenSnapshot, Error> {
        let telemetry = RefreshTelemetry::new(self.refresh_path.as_str());
        telemetry.emit_start(SystemTime::now());
        match self.fetch_refreshed_token().await {
            Ok(token) => {
                let generation = self.tokens.install_token(token.clone()).await;
                telemetry.emit_success(generation, SystemTime::now());
                Ok(TokenSnapshot {
                    value: Some(token),
                    generation,
                })
            }
            Err(err) => {
                telemetry.emit_failure(&err, SystemTime::now());
                Err(err)
            }
        }
    }

    async fn fetch_refreshed_token(&self) -> Result<String, Error> {
        // No bearer header: the refresh credential travels in the cookie jar
        let url = self.url_for(&self.refresh_path);
        let resp = self.http_client.post(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http(status, body));
        }
        let body = resp.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        extract_token(&value)
            .ok_or_else(|| Error::Refresh("response carried no token".to_string()))
    }

    fn log_outcome(
        &self,
        ctx: &RequestContext,
        state: RequestState,
        attempts: u8,
        refreshed: bool,
        start: Instant,
    ) {
        DispatchOutcome {
            method: ctx.method.clone(),
            path: ctx.path.clone(),
            state,
            attempts,
            refreshed,
            elapsed: start.elapsed(),
        }
        .log();
    }
}

/// An empty body decodes as `null`, so `()` and `Option<T>` accept 204 responses.
pub(crate) fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    if body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(body)?)
}
