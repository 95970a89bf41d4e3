//! cashlens-ingest: statement ingestion (CSV tables, money and date parsing, schema inference).

pub mod dates;
pub mod error;
pub mod money;
pub mod schema;
pub mod types;

pub use dates::parse_date_day_first;
pub use error::{IngestError, SchemaConcept};
pub use money::parse_money;
pub use schema::{normalize, AmountStrategy, SchemaNormalizer};
pub use types::{NormalizedStatement, RawStatement};
