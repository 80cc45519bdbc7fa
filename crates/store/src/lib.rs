//! Record store and session for Aqsat.
//!
//! This crate provides:
//! - The record store collaborator: one JSON document per collection on an
//!   Apache OpenDAL operator (memory or local filesystem)
//! - `Session`, the context object that runs core operations against the
//!   store

pub mod collection;
pub mod error;
pub mod session;
pub mod store;

pub use collection::Collection;
pub use error::StorageError;
pub use session::{Session, SessionError};
pub use store::{OpendalStore, RecordStore, load_all, replace_all};
