//! Core traits and types for the hostel assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation types (turns, roles)
//! - Complaint data model (categories, finalized records)
//! - Field validation for complaint intake
//! - The `Retriever` trait for pluggable knowledge-base backends
//! - Error types

pub mod complaint;
pub mod conversation;
pub mod error;
pub mod traits;
pub mod validate;

pub use complaint::{ComplaintCategory, ComplaintRecord};
pub use conversation::{Turn, TurnMetadata, TurnRole};
pub use error::{Error, Result};
pub use traits::{Document, RetrieveOptions, Retriever};
pub use validate::{normalize_phone, validate_email, validate_phone};
