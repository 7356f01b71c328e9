mod claims;
mod source;

pub use claims::TokenClaims;
pub use source::{StaticToken, TokenHolder, TokenSnapshot, TokenSource};
