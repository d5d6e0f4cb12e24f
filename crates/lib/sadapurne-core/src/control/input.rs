//! Typed inputs for the keyed lookups.
//!
//! Front ends hand over the raw argument object they received; it is checked
//! here once, before any query is issued.

use std::{error::Error, fmt};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::lookup::{Lookup, LookupKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Missing { field: &'static str },
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => *field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing required field '{field}'"),
            Self::Invalid { field, reason } => write!(f, "invalid field '{field}': {reason}"),
        }
    }
}

impl Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AadharInput {
    pub aadhar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FssaiInput {
    pub fssai_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinInput {
    pub pin: i64,
}

/// A typed argument record for one keyed lookup.
pub trait LookupInput: DeserializeOwned + Into<Lookup> {
    /// Name of the one required argument.
    const FIELD: &'static str;
}

impl LookupInput for AadharInput {
    const FIELD: &'static str = "aadhar";
}

impl LookupInput for NameInput {
    const FIELD: &'static str = "name";
}

impl LookupInput for FssaiInput {
    const FIELD: &'static str = "fssai_number";
}

impl LookupInput for PinInput {
    const FIELD: &'static str = "pin";
}

impl From<AadharInput> for Lookup {
    fn from(input: AadharInput) -> Self {
        Self::ByAadhar(input.aadhar)
    }
}

impl From<NameInput> for Lookup {
    fn from(input: NameInput) -> Self {
        Self::ByName(input.name)
    }
}

impl From<FssaiInput> for Lookup {
    fn from(input: FssaiInput) -> Self {
        Self::ByFssai(input.fssai_number)
    }
}

impl From<PinInput> for Lookup {
    fn from(input: PinInput) -> Self {
        Self::ByPin(input.pin)
    }
}

impl LookupKind {
    /// Validates an argument object and builds the lookup it describes.
    ///
    /// An absent object, an absent or `null` field and an empty string all
    /// count as missing. Whitespace is a value like any other. Fields other
    /// than the required one are ignored.
    ///
    /// # Errors
    /// Returns `ValidationError` if the required field is missing or has the
    /// wrong type.
    pub fn parse_arguments(
        self,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<Lookup, ValidationError> {
        match self {
            Self::ByAadhar => parse_input::<AadharInput>(arguments),
            Self::ByName => parse_input::<NameInput>(arguments),
            Self::All => Ok(Lookup::All),
            Self::ByFssai => parse_input::<FssaiInput>(arguments),
            Self::ByPin => parse_input::<PinInput>(arguments),
        }
    }
}

fn parse_input<T: LookupInput>(
    arguments: Option<&Map<String, Value>>,
) -> Result<Lookup, ValidationError> {
    let field = T::FIELD;
    let Some(arguments) = arguments else {
        return Err(ValidationError::Missing { field });
    };
    match arguments.get(field) {
        None | Some(Value::Null) => return Err(ValidationError::Missing { field }),
        Some(Value::String(text)) if text.is_empty() => {
            return Err(ValidationError::Missing { field });
        }
        Some(_) => {}
    }
    serde_json::from_value::<T>(Value::Object(arguments.clone()))
        .map(Into::into)
        .map_err(|err| ValidationError::Invalid {
            field,
            reason: err.to_string(),
        })
}
