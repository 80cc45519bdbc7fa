//! Record store: whole-collection load and replace.
//!
//! The store knows nothing about the records. It maps a collection to one
//! JSON document and supports exactly two operations: read the document
//! (absent means empty) and overwrite it.

use aqsat_shared::config::StorageProvider;
use async_trait::async_trait;
use opendal::{ErrorKind, Operator, services};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::collection::Collection;
use crate::error::StorageError;

/// Durable mapping from collection to its serialized document.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the raw document of a collection, `None` if never written.
    async fn load_raw(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite the raw document of a collection.
    async fn replace_raw(&self, collection: Collection, bytes: Vec<u8>) -> Result<(), StorageError>;
}

/// Load every record of a collection. An absent collection is empty.
///
/// # Errors
///
/// Returns `Corrupt` if the document is not a JSON array of `T`, or the
/// store's own error.
pub async fn load_all<T, S>(store: &S, collection: Collection) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match store.load_raw(collection).await? {
        None => Ok(Vec::new()),
        Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            collection: collection.key(),
            reason: e.to_string(),
        }),
    }
}

/// Replace a collection with the given records.
///
/// # Errors
///
/// Returns `Encode` if serialization fails, or the store's own error.
pub async fn replace_all<T, S>(
    store: &S,
    collection: Collection,
    records: &[T],
) -> Result<(), StorageError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let bytes = serde_json::to_vec(records).map_err(|e| StorageError::Encode {
        collection: collection.key(),
        reason: e.to_string(),
    })?;
    store.replace_raw(collection, bytes).await
}

/// Record store on an Apache OpenDAL operator.
#[derive(Debug, Clone)]
pub struct OpendalStore {
    operator: Operator,
    provider: &'static str,
}

impl OpendalStore {
    /// Create a store for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let operator = Self::create_operator(provider)?;
        Ok(Self {
            operator,
            provider: provider.name(),
        })
    }

    /// Create a store that lives in process memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory backend cannot be initialized.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_provider(&StorageProvider::Memory)
    }

    /// Provider name for logging.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::Memory => Ok(Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish()),
            StorageProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                let builder = services::Fs::default().root(root);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }
}

#[async_trait]
impl RecordStore for OpendalStore {
    async fn load_raw(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError> {
        match self.operator.read(&collection.path()).await {
            Ok(buffer) => Ok(Some(buffer.to_vec())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection = %collection, "Collection not yet written");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn replace_raw(
        &self,
        collection: Collection,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let size = bytes.len();
        self.operator.write(&collection.path(), bytes).await?;
        debug!(collection = %collection, size, provider = self.provider, "Collection replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    fn notes() -> Vec<Note> {
        vec![
            Note {
                text: "first".to_string(),
            },
            Note {
                text: "second".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_absent_collection_is_empty() {
        let store = OpendalStore::in_memory().unwrap();
        let loaded: Vec<Note> = load_all(&store, Collection::Plans).await.unwrap();
        assert!(loaded.is_empty());
        assert_eq!(store.load_raw(Collection::Plans).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replace_then_load_keeps_order() {
        let store = OpendalStore::in_memory().unwrap();
        replace_all(&store, Collection::Customers, &notes()).await.unwrap();

        let loaded: Vec<Note> = load_all(&store, Collection::Customers).await.unwrap();
        assert_eq!(loaded, notes());

        let other: Vec<Note> = load_all(&store, Collection::Transactions).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document() {
        let store = OpendalStore::in_memory().unwrap();
        store
            .replace_raw(Collection::Transactions, b"{not json".to_vec())
            .await
            .unwrap();

        let err = load_all::<Note, _>(&store, Collection::Transactions).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Corrupt {
                collection: "app_transactions",
                ..
            }
        ));
        assert_eq!(err.error_code(), "STORAGE_CORRUPT");
    }

    #[tokio::test]
    async fn test_local_fs_writes_key_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = OpendalStore::from_provider(&StorageProvider::local_fs(dir.path())).unwrap();
        assert_eq!(store.provider(), "local");

        replace_all(&store, Collection::Plans, &notes()).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("app_plans.json")).unwrap();
        assert_eq!(raw, r#"[{"text":"first"},{"text":"second"}]"#);

        let reopened = OpendalStore::from_provider(&StorageProvider::local_fs(dir.path())).unwrap();
        let loaded: Vec<Note> = load_all(&reopened, Collection::Plans).await.unwrap();
        assert_eq!(loaded, notes());
    }
}
