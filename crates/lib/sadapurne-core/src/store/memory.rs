use std::sync::Arc;

use sadapurne_store::schema::TABLE_VERIFIED_PRODUCERS;
use sadapurne_store::{Filter, ProducerRecord};

use super::{ProducerSource, StoreError, StoreResult};

/// Producer source backed by rows held in memory.
///
/// Filters are evaluated in-process with [`Filter::matches`]: insertion order,
/// text coercion for equality and case-insensitive substring search. Unlike
/// `PostgREST`, `%`, `_` and `*` in a name pattern match only themselves.
#[derive(Debug, Clone)]
pub struct MemoryProducerStore {
    table: String,
    rows: Arc<Vec<ProducerRecord>>,
}

impl MemoryProducerStore {
    /// Creates a store serving `rows` as the `verified_producers` table.
    #[must_use]
    pub fn new(rows: Vec<ProducerRecord>) -> Self {
        Self::for_table(TABLE_VERIFIED_PRODUCERS, rows)
    }

    #[must_use]
    pub fn for_table(table: impl Into<String>, rows: Vec<ProducerRecord>) -> Self {
        Self {
            table: table.into(),
            rows: Arc::new(rows),
        }
    }

    /// Parses a JSON array of row objects.
    ///
    /// # Errors
    /// Returns `StoreError::Decode` if the payload is not an array of objects.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let rows: Vec<ProducerRecord> =
            serde_json::from_str(json).map_err(|err| StoreError::Decode(err.to_string()))?;
        Ok(Self::new(rows))
    }
}

impl ProducerSource for MemoryProducerStore {
    async fn query(&self, table: &str, filter: &Filter) -> StoreResult<Vec<ProducerRecord>> {
        if table != self.table {
            return Err(StoreError::UnknownTable(table.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sadapurne_store::schema::FIELD_NAME;

    const ROWS: &str = r#"[
        {"aadhar": "1111", "name": "Ravi Kumar", "pin": 560001},
        {"aadhar": "2222", "name": "Meena Shah", "pin": 560002},
        {"aadhar": "3333", "name": "Anita Ravi", "pin": 560003}
    ]"#;

    #[tokio::test]
    async fn filters_rows_in_insertion_order() {
        let store = MemoryProducerStore::from_json(ROWS).expect("fixture should parse");

        let rows = store
            .query(TABLE_VERIFIED_PRODUCERS, &Filter::ilike(FIELD_NAME, "ravi"))
            .await
            .expect("query should succeed");

        let names: Vec<_> = rows.iter().filter_map(ProducerRecord::name).collect();
        assert_eq!(names, ["Ravi Kumar", "Anita Ravi"]);
    }

    #[tokio::test]
    async fn rejects_unknown_table() {
        let store = MemoryProducerStore::new(Vec::new());

        let err = store
            .query("producers", &Filter::All)
            .await
            .expect_err("unknown table should fail");

        assert!(matches!(err, StoreError::UnknownTable(ref table) if table == "producers"));
        assert_eq!(err.to_string(), "relation \"producers\" does not exist");
    }

    #[test]
    fn from_json_rejects_non_array_payload() {
        let err = MemoryProducerStore::from_json(r#"{"aadhar": "1111"}"#)
            .expect_err("object payload should fail");
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
