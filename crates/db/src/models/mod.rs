//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the resource is editable, an all-`Option` update DTO
//! - Where the wire shape differs from the row (contact visibility,
//!   derived fields), a `Serialize` view struct
//!
//! All wire-facing structs serialize camelCase to match the frontend
//! contract.

pub mod camp;
pub mod club;
pub mod donation;
pub mod help_request;
pub mod inventory;
pub mod session;
pub mod summary;
pub mod user;
