pub mod auth;
pub mod caller;
