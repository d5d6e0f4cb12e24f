//! Core types and services for sadapurne.
//!
//! This crate owns the lookup service shared by the MCP and HTTP front ends,
//! the typed inputs they validate against, and the producer sources the
//! service reads from: the Supabase `PostgREST` client and an in-memory source.

pub mod control;
pub mod store;
