//! Core trait definitions

pub mod retriever;

pub use retriever::{Document, RetrieveOptions, Retriever};
