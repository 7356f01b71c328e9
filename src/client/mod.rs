use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::Error;
use crate::routes::PublicRoutes;
use crate::token::TokenHolder;

mod auth;
mod impls;

pub use auth::ImageUpload;

const DEFAULT_USER_AGENT: &str = concat!("roomlink-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the RoomLink API.
///
/// Attaches the current bearer token, unwraps response payloads and recovers
/// once from a 401 by refreshing the token through the cookie-based refresh
/// endpoint. Clones share the connection pool, cookie jar and token holder.
#[derive(Clone)]
pub struct RoomLinkClient {
    http_client: Client,
    api_root: String,
    refresh_path: String,
    tokens: TokenHolder,
    public_routes: Arc<PublicRoutes>,
    coalesce_refresh: bool,
    refresh_lock: Arc<Mutex<()>>,
}

impl RoomLinkClient {
    /// Create a client whose token holder starts with `config.token`, if set.
    pub fn new(config: Config) -> Result<Self, Error> {
        let tokens = match config.token.as_ref() {
            Some(token) if !token.is_empty() => TokenHolder::with_token(token.clone()),
            _ => TokenHolder::new(),
        };
        Self::with_token_holder(config, tokens)
    }

    /// Create a client around an existing holder. `config.token` is ignored;
    /// install tokens through the holder instead.
    pub fn with_token_holder(config: Config, tokens: TokenHolder) -> Result<Self, Error> {
        // Validate the base URL before building anything that could hit the network
        let api_root = config.api_root()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder()
            .cookie_store(true)
            .default_headers(default_headers)
            .user_agent(
                config
                    .user_agent
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            );
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let mut public_routes = PublicRoutes::default();
        for route in &config.public_routes {
            public_routes.insert(route);
        }

        Ok(Self {
            http_client,
            api_root,
            refresh_path: config.refresh_path,
            tokens,
            public_routes: Arc::new(public_routes),
            coalesce_refresh: config.coalesce_refresh,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn token_holder(&self) -> &TokenHolder {
        &self.tokens
    }

    pub fn public_routes(&self) -> &PublicRoutes {
        &self.public_routes
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }
}
