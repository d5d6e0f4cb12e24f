//! MCP server implementation for sadapurne.
//!
//! This crate exposes the verified producer lookups as MCP tools. The tool
//! list is static and calls are dispatched by name onto the shared lookup
//! service; every call answers with a single text payload.

pub mod server;
pub mod tools;

use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    model::{
        CallToolRequestParams,
        CallToolResult,
        ListToolsResult,
        PaginatedRequestParams,
        ServerCapabilities,
        ServerInfo,
    },
    service::RequestContext,
};
use sadapurne_core::control::LookupService;
use sadapurne_core::store::ProducerSource;

const SERVER_INSTRUCTIONS: &str = r"sadapurne provides read-only lookups over the verified producers registry.

Tools:
- `get_verified_producer_by_aadhar` (aadhar: string) returns the producer registered with an Aadhaar number.
- `get_verified_producer_by_name` (name: string) returns every producer whose name contains the text, ignoring case.
- `get_all_verified_producers` returns every verified producer.
- `get_producer_by_fssai` (fssai_number: string) returns the producer holding an FSSAI license number.
- `get_producer_by_pin` (pin: integer) returns the producer registered under a PIN.

Notes:
- Results are pretty-printed JSON records exactly as stored.
- When nothing matches, the reply is a sentence naming the key that was used.
- Failures are reported as text starting with `Error:`.";

/// MCP server wrapper around the lookup service.
pub struct SadapurneMcp<S: ProducerSource> {
    lookup: LookupService<S>,
}

impl<S: ProducerSource> Clone for SadapurneMcp<S> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
        }
    }
}

impl<S: ProducerSource> SadapurneMcp<S> {
    #[must_use]
    pub const fn new(lookup: LookupService<S>) -> Self {
        Self { lookup }
    }
}

impl<S: ProducerSource> ServerHandler for SadapurneMcp<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tools::tool_catalog()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let reply = tools::dispatch(&self.lookup, &request.name, request.arguments.as_ref()).await;
        Ok(reply.into_call_result())
    }
}
