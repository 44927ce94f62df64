//! # Keyed Store
//!
//! Keyed record tables under two storage disciplines, addressed by a key
//! with a non-natural total order.
//!
//! ## Core idea
//! A hash table only needs `hash` + `==` to find a key, but sorting needs a
//! total order, and searching by payload needs a *different* order. The
//! key type keeps all three consistent; the tables share one generic
//! implementation and differ only in bucket layout, which shows up as
//! iteration order and nothing else.

pub mod driver;
pub mod error;
pub mod logger;
pub mod options;
pub mod seed;
pub mod sequence;
pub mod table;
pub mod timing;
pub mod types;

// Public re-exports for the top-level API
pub use driver::{KeyedCollectionDriver, RunSummary};
pub use error::{Error, Result};
pub use options::Options;
pub use table::projection::ProjectionComparator;
pub use table::{KeyedTable, OrderedHashTable, UnorderedTable};
pub use types::{Entry, OrderedKey, Payload};
