use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{FIELD_AADHAR, FIELD_FSSAI_LICENSE_NUMBER, FIELD_NAME, FIELD_PIN};

/// A row of the `verified_producers` table.
///
/// The schema is owned by the remote database, so the record keeps the JSON
/// object exactly as it was returned (field order included) and only offers
/// typed accessors for the columns the lookups filter on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProducerRecord(Map<String, Value>);

impl ProducerRecord {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn aadhar(&self) -> Option<&str> {
        self.get(FIELD_AADHAR).and_then(Value::as_str)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get(FIELD_NAME).and_then(Value::as_str)
    }

    #[must_use]
    pub fn fssai_license_number(&self) -> Option<&str> {
        self.get(FIELD_FSSAI_LICENSE_NUMBER).and_then(Value::as_str)
    }

    #[must_use]
    pub fn pin(&self) -> Option<i64> {
        self.get(FIELD_PIN).and_then(Value::as_i64)
    }
}
