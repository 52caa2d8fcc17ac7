//! Cookie based authentication for the REST API.

mod cookie;
mod middleware;
mod token;

pub use cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_token_from_cookies, set_auth_cookie};
pub use middleware::{AuthState, auth_guard};
pub use token::Token;
