use std::collections::BTreeSet;

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const CHECK_CCCD: &str = "/auth/checkCCCD";
pub const CHECK_AVATAR: &str = "/auth/checkAvatar";

/// Routes served without authentication. A 401 from one of these is final.
#[derive(Clone, Debug)]
pub struct PublicRoutes {
    routes: BTreeSet<String>,
}

impl PublicRoutes {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            routes: routes
                .into_iter()
                .map(|r| normalize_path(r.as_ref()))
                .collect(),
        }
    }

    pub fn insert(&mut self, route: &str) {
        self.routes.insert(normalize_path(route));
    }

    /// Exact match on the normalized path; `/auth/login-history` is not `/auth/login`.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains(&normalize_path(path))
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new([LOGIN, REGISTER, CHECK_CCCD, CHECK_AVATAR])
    }
}

/// Strips query and fragment, forces a leading slash and drops trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}
