//! Wire types exchanged with the activities backend.

pub mod dtos;
pub mod structs;

pub use dtos::{ApiMessage, ApiReply, EnrollmentParams};
pub use structs::{ActivityCatalog, ActivityRecord, Identity, Participant};
