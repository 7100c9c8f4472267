//! Well-known role name constants.
//!
//! Registration always assigns `user`; admins are promoted directly in the
//! database.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
