//! Store interfaces and implementations.
//!
//! A producer source answers one filtered read against a table. The service
//! never writes, so the trait has no other operations.

use std::{error::Error, fmt, future::Future};

use sadapurne_store::{Filter, ProducerRecord};

pub mod memory;
pub mod postgrest;

pub use memory::MemoryProducerStore;
pub use postgrest::{PostgrestConfig, PostgrestStore};

#[derive(Debug)]
pub enum StoreError {
    Transport(String),
    Remote { status: u16, message: String },
    Decode(String),
    UnknownTable(String),
}

impl StoreError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) | Self::Remote { message, .. } => f.write_str(message),
            Self::Decode(message) => write!(f, "failed to decode rows: {message}"),
            Self::UnknownTable(table) => write!(f, "relation \"{table}\" does not exist"),
        }
    }
}

impl Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to a producer table.
pub trait ProducerSource: Send + Sync + 'static {
    /// Returns every row of `table` accepted by `filter`, in source order.
    fn query(
        &self,
        table: &str,
        filter: &Filter,
    ) -> impl Future<Output = StoreResult<Vec<ProducerRecord>>> + Send;
}
