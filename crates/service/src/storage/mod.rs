//! Storage helpers for the service layer
//!
//! Read-only JSON tables loaded at startup (catalog override, admin board seed).

pub mod json_table;
