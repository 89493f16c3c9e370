//! Data model shared by the service and server crates.

pub mod errors;
pub mod service;
pub mod attachment;
pub mod contact;
pub mod service_request;

pub use attachment::{Attachment, FileDescriptor};
pub use contact::{ContactDetails, ContactPatch};
pub use service::Service;
pub use service_request::{RequestStatus, ServiceRequest};
