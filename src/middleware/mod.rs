//! HTTP middleware

pub mod auth;
pub mod rate_limit;

pub use auth::CurrentUser;
pub use rate_limit::rate_limit_middleware;
