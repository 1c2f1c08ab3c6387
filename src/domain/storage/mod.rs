//! Storage domain - Generic document storage abstraction
//!
//! Every collection (employees, departments) is a set of JSON documents keyed
//! by a string id. Backends only need to implement [`Storage`].

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;
