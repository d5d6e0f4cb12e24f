use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use sadapurne_core::control::LookupKind;
use serde_json::{Value, json};

/// The single argument a tool takes.
struct ToolArgument {
    name: &'static str,
    json_type: &'static str,
    description: &'static str,
}

#[must_use]
pub const fn tool_name(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::ByAadhar => "get_verified_producer_by_aadhar",
        LookupKind::ByName => "get_verified_producer_by_name",
        LookupKind::All => "get_all_verified_producers",
        LookupKind::ByFssai => "get_producer_by_fssai",
        LookupKind::ByPin => "get_producer_by_pin",
    }
}

#[must_use]
pub fn kind_for_tool(name: &str) -> Option<LookupKind> {
    LookupKind::ALL
        .into_iter()
        .find(|kind| tool_name(*kind) == name)
}

const fn tool_description(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::ByAadhar => "Get verified producer information by Aadhaar number",
        LookupKind::ByName => "Search for verified producers by name",
        LookupKind::All => "Get all verified producers",
        LookupKind::ByFssai => "Get verified producer information by FSSAI license number",
        LookupKind::ByPin => "Get verified producer information by PIN",
    }
}

fn tool_argument(kind: LookupKind) -> Option<ToolArgument> {
    let name = kind.required_field()?;
    let (json_type, description) = match kind {
        LookupKind::ByAadhar => ("string", "The Aadhaar number of the producer"),
        LookupKind::ByName => ("string", "The name to search for"),
        LookupKind::ByFssai => ("string", "The FSSAI license number"),
        LookupKind::ByPin => ("integer", "The PIN number"),
        LookupKind::All => return None,
    };
    Some(ToolArgument {
        name,
        json_type,
        description,
    })
}

/// JSON schema for a tool's arguments.
#[must_use]
pub fn input_schema(kind: LookupKind) -> JsonObject {
    let mut properties = JsonObject::new();
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));

    if let Some(argument) = tool_argument(kind) {
        properties.insert(
            argument.name.to_string(),
            json!({
                "type": argument.json_type,
                "description": argument.description,
            }),
        );
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!([argument.name]));
    } else {
        schema.insert("properties".to_string(), Value::Object(properties));
    }
    schema
}

/// Static tool list; building it never touches the database.
#[must_use]
pub fn tool_catalog() -> Vec<Tool> {
    LookupKind::ALL
        .into_iter()
        .map(|kind| {
            Tool::new(
                tool_name(kind),
                tool_description(kind),
                Arc::new(input_schema(kind)),
            )
        })
        .collect()
}
