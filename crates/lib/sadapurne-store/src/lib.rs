//! Storage models and schema helpers for sadapurne.
//!
//! This crate defines the verified producer record shared by the lookup
//! service, both front ends and every store backend, plus the filter
//! predicates used to query it.

pub mod filter;
pub mod models;
pub mod schema;

pub use filter::{Filter, FilterValue};
pub use models::*;
