//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic document storage for CRUD operations on one collection
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all documents in the collection
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new document, returns Conflict if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces an existing document, returns NotFound if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes a document by its key, returns true if it existed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if a document exists
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the number of documents
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Removes every document in the collection
    async fn clear(&self) -> Result<(), DomainError>;
}
