//! Service layer: catalog, application flow and admin board.
//! - Keeps view-model state in explicit objects updated by reducers.
//! - Reuses the data model from the `models` crate.

pub mod errors;
pub mod filter;
pub mod catalog;
pub mod fees;
pub mod attachments;
pub mod submission;
pub mod application;
pub mod sessions;
pub mod requests;
pub mod storage;
pub mod runtime;
