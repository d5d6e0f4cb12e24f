use sadapurne_store::schema::{FIELD_AADHAR, FIELD_FSSAI_LICENSE_NUMBER, FIELD_NAME, FIELD_PIN};
use sadapurne_store::{Filter, ProducerRecord};
use serde::Serialize;

use super::input::{AadharInput, FssaiInput, LookupInput, NameInput, PinInput};

/// The five lookups offered over the producer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    ByAadhar,
    ByName,
    All,
    ByFssai,
    ByPin,
}

impl LookupKind {
    pub const ALL: [Self; 5] = [
        Self::ByAadhar,
        Self::ByName,
        Self::All,
        Self::ByFssai,
        Self::ByPin,
    ];

    /// Argument the caller must supply, if any.
    #[must_use]
    pub const fn required_field(self) -> Option<&'static str> {
        match self {
            Self::ByAadhar => Some(AadharInput::FIELD),
            Self::ByName => Some(NameInput::FIELD),
            Self::All => None,
            Self::ByFssai => Some(FssaiInput::FIELD),
            Self::ByPin => Some(PinInput::FIELD),
        }
    }

    /// Whether every matching row is returned rather than the first one.
    #[must_use]
    pub const fn returns_many(self) -> bool {
        matches!(self, Self::ByName | Self::All)
    }

    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::ByAadhar => "No verified producer found with this Aadhaar number",
            Self::ByName => "No verified producers found with this name",
            Self::All => "No verified producers found",
            Self::ByFssai => "No verified producer found with this FSSAI number",
            Self::ByPin => "No verified producer found with this PIN",
        }
    }
}

/// A validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ByAadhar(String),
    ByName(String),
    All,
    ByFssai(String),
    ByPin(i64),
}

impl Lookup {
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        match self {
            Self::ByAadhar(_) => LookupKind::ByAadhar,
            Self::ByName(_) => LookupKind::ByName,
            Self::All => LookupKind::All,
            Self::ByFssai(_) => LookupKind::ByFssai,
            Self::ByPin(_) => LookupKind::ByPin,
        }
    }

    /// The single predicate this lookup sends to the source.
    #[must_use]
    pub fn filter(&self) -> Filter {
        match self {
            Self::ByAadhar(aadhar) => Filter::equals(FIELD_AADHAR, aadhar.as_str()),
            Self::ByName(name) => Filter::ilike(FIELD_NAME, name.as_str()),
            Self::All => Filter::All,
            Self::ByFssai(number) => Filter::equals(FIELD_FSSAI_LICENSE_NUMBER, number.as_str()),
            Self::ByPin(pin) => Filter::equals(FIELD_PIN, *pin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(ProducerRecord),
    FoundMany(Vec<ProducerRecord>),
    NotFound,
}

impl LookupOutcome {
    /// Shapes the rows a source returned for `kind`.
    ///
    /// Single-record lookups keep the first row and drop the rest; the table
    /// does not enforce uniqueness on any key.
    #[must_use]
    pub fn from_rows(kind: LookupKind, rows: Vec<ProducerRecord>) -> Self {
        if kind.returns_many() {
            if rows.is_empty() {
                Self::NotFound
            } else {
                Self::FoundMany(rows)
            }
        } else {
            rows.into_iter().next().map_or(Self::NotFound, Self::Found)
        }
    }

    #[must_use]
    pub fn into_data(self) -> Option<ProducerData> {
        match self {
            Self::Found(record) => Some(ProducerData::One(record)),
            Self::FoundMany(records) => Some(ProducerData::Many(records)),
            Self::NotFound => None,
        }
    }
}

/// Found rows as the front ends serialize them: one object or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProducerData {
    One(ProducerRecord),
    Many(Vec<ProducerRecord>),
}
