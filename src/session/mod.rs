//! The session token cookie and the credential exchange that creates it.

pub mod cookie;
pub mod writer;

pub use cookie::{
    clear_token_cookie, is_cookie_safe, read_token, sets_token, token_cookie, MAX_SESSION_SECONDS,
    TOKEN_COOKIE,
};
pub use writer::{clamp_lifetime, login_failure_message, Credentials, LoginGrant, SessionWriter};
