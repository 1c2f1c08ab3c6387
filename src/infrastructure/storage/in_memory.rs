//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory document collection
///
/// Default backend for development and tests. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    documents: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Create a collection pre-populated with documents
    pub fn with_documents(documents: impl IntoIterator<Item = E>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.key().as_str().to_string(), doc))
            .collect();

        Self {
            documents: RwLock::new(documents),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.read().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire read lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.write().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire write lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self.read()?.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        if documents.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Document '{}' already exists in '{}'",
                key,
                E::COLLECTION
            )));
        }

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        match documents.get_mut(&key) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(format!(
                "Document '{}' not found in '{}'",
                key,
                E::COLLECTION
            ))),
        }
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.write()?.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.write()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::department::{Department, DepartmentId};

    fn department(name: &str) -> Department {
        Department::new(DepartmentId::generate(), name).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Department> = InMemoryStorage::new();
        let surgery = department("Surgery Dentistry");

        storage.create(surgery.clone()).await.unwrap();

        let found = storage.get(surgery.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Surgery Dentistry");
        assert!(storage.exists(surgery.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Department> = InMemoryStorage::new();
        let surgery = department("Surgery Dentistry");

        storage.create(surgery.clone()).await.unwrap();
        let result = storage.create(surgery).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let storage: InMemoryStorage<Department> = InMemoryStorage::new();
        let mut surgery = department("Surgery Dentistry");
        storage.create(surgery.clone()).await.unwrap();

        surgery.set_name("Oral Surgery").unwrap();
        storage.update(surgery.clone()).await.unwrap();

        let found = storage.get(surgery.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Oral Surgery");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<Department> = InMemoryStorage::new();
        let result = storage.update(department("Orthodontics")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_count_and_clear() {
        let storage = InMemoryStorage::with_documents(vec![
            department("Orthodontics"),
            department("Pediatric Dentistry"),
        ]);
        assert_eq!(storage.count().await.unwrap(), 2);

        let first = storage.list().await.unwrap().remove(0);
        assert!(storage.delete(first.id()).await.unwrap());
        assert!(!storage.delete(first.id()).await.unwrap());
        assert_eq!(storage.count().await.unwrap(), 1);

        tokio_test::assert_ok!(storage.clear().await);
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
