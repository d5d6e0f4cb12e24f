use std::{error::Error, fmt, sync::Arc};

use sadapurne_store::schema::TABLE_VERIFIED_PRODUCERS;
use tracing::{debug, warn};

use crate::store::{ProducerSource, StoreError};

pub mod input;
pub mod lookup;

pub use input::{AadharInput, FssaiInput, LookupInput, NameInput, PinInput, ValidationError};
pub use lookup::{Lookup, LookupKind, LookupOutcome, ProducerData};

#[derive(Debug)]
pub enum LookupError {
    Query(StoreError),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
        }
    }
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        Self::Query(err)
    }
}

/// Read-only lookups over the verified producer table.
///
/// Every call issues exactly one query against the injected source and never
/// retries, caches or paginates.
pub struct LookupService<S: ProducerSource> {
    source: Arc<S>,
}

impl<S: ProducerSource> Clone for LookupService<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S: ProducerSource> LookupService<S> {
    pub fn new(source: S) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub const fn from_arc(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs a validated lookup.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn run(&self, lookup: &Lookup) -> Result<LookupOutcome, LookupError> {
        let kind = lookup.kind();
        let filter = lookup.filter();
        debug!(?kind, ?filter, "running producer lookup");

        let rows = self
            .source
            .query(TABLE_VERIFIED_PRODUCERS, &filter)
            .await
            .inspect_err(|err| warn!(?kind, error = %err, "producer lookup failed"))?;

        debug!(?kind, rows = rows.len(), "producer lookup finished");
        Ok(LookupOutcome::from_rows(kind, rows))
    }

    /// Fetches the first producer with the given Aadhaar number.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn by_aadhar(&self, aadhar: &str) -> Result<LookupOutcome, LookupError> {
        self.run(&Lookup::ByAadhar(aadhar.to_string())).await
    }

    /// Fetches every producer whose name contains `name`, ignoring case.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn by_name(&self, name: &str) -> Result<LookupOutcome, LookupError> {
        self.run(&Lookup::ByName(name.to_string())).await
    }

    /// Fetches every producer.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn all(&self) -> Result<LookupOutcome, LookupError> {
        self.run(&Lookup::All).await
    }

    /// Fetches the first producer with the given FSSAI license number.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn by_fssai(&self, fssai_number: &str) -> Result<LookupOutcome, LookupError> {
        self.run(&Lookup::ByFssai(fssai_number.to_string())).await
    }

    /// Fetches the first producer with the given PIN.
    ///
    /// # Errors
    /// Returns `LookupError::Query` if the source fails.
    pub async fn by_pin(&self, pin: i64) -> Result<LookupOutcome, LookupError> {
        self.run(&Lookup::ByPin(pin)).await
    }
}
