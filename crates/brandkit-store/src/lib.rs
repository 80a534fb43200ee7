#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Brand store orchestration: state, persistence, and the generation guard.
//!
//! Layout: `persistence.rs` (storage record and backends), `state.rs`
//! (snapshots and operation outcomes), `store.rs` (the orchestrator),
//! `error.rs` (error types).

pub mod error;
pub mod persistence;
pub mod state;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use persistence::{
    BrandPersistence, FileStorage, MemoryStorage, PersistedRecord, SCHEMA_VERSION, decode_record,
    encode_record,
};
pub use state::{DefaultReason, ImportOutcome, LoadOutcome, SaveOutcome, StoreSnapshot};
pub use store::BrandStore;
