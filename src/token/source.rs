use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// Yields the access token to attach to the next request, if any.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// A fixed token, installed after login or refresh.
#[derive(Clone, Debug)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Token read from the holder together with the installation it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub value: Option<String>,
    pub generation: u64,
}

struct Installed {
    source: Option<Arc<dyn TokenSource>>,
    generation: u64,
}

/// Shared, swappable slot for the token source. Clones share the same slot,
/// so an installation through any clone is seen by every request made afterwards.
#[derive(Clone)]
pub struct TokenHolder {
    inner: Arc<RwLock<Installed>>,
}

impl TokenHolder {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Installed {
                source: None,
                generation: 0,
            })),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let source: Arc<dyn TokenSource> = Arc::new(StaticToken::new(token));
        Self {
            inner: Arc::new(RwLock::new(Installed {
                source: Some(source),
                generation: 1,
            })),
        }
    }

    /// Replaces the installed source; returns the new generation.
    pub async fn install(&self, source: Arc<dyn TokenSource>) -> u64 {
        let mut installed = self.inner.write().await;
        installed.source = Some(source);
        installed.generation += 1;
        debug!(generation = installed.generation, "token.source.installed");
        installed.generation
    }

    pub async fn install_token(&self, token: impl Into<String>) -> u64 {
        self.install(Arc::new(StaticToken::new(token))).await
    }

    pub async fn clear(&self) -> u64 {
        let mut installed = self.inner.write().await;
        installed.source = None;
        installed.generation += 1;
        debug!(generation = installed.generation, "token.source.cleared");
        installed.generation
    }

    pub async fn snapshot(&self) -> TokenSnapshot {
        let installed = self.inner.read().await;
        TokenSnapshot {
            value: installed.source.as_ref().and_then(|s| s.token()),
            generation: installed.generation,
        }
    }

    pub async fn current(&self) -> Option<String> {
        self.snapshot().await.value
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }
}

impl Default for TokenHolder {
    fn default() -> Self {
        Self::new()
    }
}
