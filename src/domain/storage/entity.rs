//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as document keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends that key documents by string
    fn as_str(&self) -> &str;
}

/// Trait for documents that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this document
    type Key: StorageKey;

    /// Collection name, also used as the default table name
    const COLLECTION: &'static str;

    /// Returns the document's key
    fn key(&self) -> &Self::Key;
}
