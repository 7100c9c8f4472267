pub mod auth;
pub mod camp;
pub mod club;
pub mod donation;
pub mod help_request;
pub mod users;
