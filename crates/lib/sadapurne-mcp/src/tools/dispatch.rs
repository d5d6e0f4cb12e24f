use rmcp::model::{CallToolResult, Content, JsonObject};
use sadapurne_core::control::{LookupKind, LookupOutcome, LookupService, ValidationError};
use sadapurne_core::store::ProducerSource;
use tracing::debug;

use super::catalog::kind_for_tool;

/// Text payload produced for one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    pub is_error: bool,
}

impl ToolReply {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    #[must_use]
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Runs the tool called `name` and renders its outcome as text.
///
/// Every path yields a reply: unknown tools, bad arguments and failed
/// queries are reported in the payload instead of as protocol errors.
pub async fn dispatch<S: ProducerSource>(
    lookup: &LookupService<S>,
    name: &str,
    arguments: Option<&JsonObject>,
) -> ToolReply {
    let Some(kind) = kind_for_tool(name) else {
        debug!(tool = name, "unknown tool requested");
        return ToolReply::ok(format!("Unknown tool: {name}"));
    };

    let request = match kind.parse_arguments(arguments) {
        Ok(request) => request,
        Err(err) => return ToolReply::error(validation_text(&err)),
    };

    debug!(tool = name, "dispatching tool call");
    match lookup.run(&request).await {
        Ok(outcome) => render(kind, outcome),
        Err(err) => ToolReply::error(format!("Error: {err}")),
    }
}

fn render(kind: LookupKind, outcome: LookupOutcome) -> ToolReply {
    let Some(data) = outcome.into_data() else {
        return ToolReply::ok(kind.not_found_message());
    };
    match serde_json::to_string_pretty(&data) {
        Ok(text) => ToolReply::ok(text),
        Err(err) => ToolReply::error(format!("Error: {err}")),
    }
}

fn validation_text(err: &ValidationError) -> String {
    match err {
        ValidationError::Missing { field } => {
            format!("Error: missing required argument '{field}'")
        }
        ValidationError::Invalid { field, reason } => {
            format!("Error: invalid argument '{field}': {reason}")
        }
    }
}
