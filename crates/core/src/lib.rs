//! Domain vocabulary and rules for the relief coordination platform.
//!
//! This crate has no I/O: it defines the fixed enums (ration catalog,
//! urgency, camp metadata), the inventory reconciliation math, the donation
//! lifecycle rules, and small shared helpers (pagination, people totals).
//! Both the persistence layer and the API layer build on it.

pub mod camp;
pub mod contact;
pub mod donation;
pub mod error;
pub mod geo;
pub mod help_request;
pub mod inventory;
pub mod pagination;
pub mod ration;
pub mod roles;
pub mod types;
