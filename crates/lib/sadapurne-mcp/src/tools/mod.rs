//! MCP tool modules.
//!
//! The catalog describes the five lookup tools; dispatch maps a call onto the
//! lookup service and renders the outcome as text.

pub mod catalog;
pub mod dispatch;

pub use catalog::{input_schema, kind_for_tool, tool_catalog, tool_name};
pub use dispatch::{ToolReply, dispatch};
