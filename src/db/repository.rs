// src/db/repository.rs

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{filter::Filter, store::DocumentStore},
    models::Document,
};
use uuid::Uuid;

/// Acesso tipado a uma coleção. Converte entre o modelo e o JSON guardado.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Gera a próxima referência legível da coleção ("A1", "V12", ...)
    pub async fn next_reference(&self) -> Result<String, AppError> {
        let seq = self.store.next_sequence(T::COLLECTION).await?;
        Ok(format!("{}{}", T::COLLECTION.reference_prefix(), seq))
    }

    pub async fn insert(&self, doc: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(doc)?;
        self.store.insert(T::COLLECTION, doc.id(), value).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, AppError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn update(&self, doc: &T) -> Result<bool, AppError> {
        let value = serde_json::to_value(doc)?;
        self.store.replace(T::COLLECTION, doc.id(), value).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.store.delete(T::COLLECTION, id).await
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>, AppError> {
        let docs = self.store.find(T::COLLECTION, filter, None).await?;
        docs.into_iter()
            .map(|value| serde_json::from_value(value).map_err(AppError::from))
            .collect()
    }

    pub async fn find_all(&self) -> Result<Vec<T>, AppError> {
        self.find(&Filter::All).await
    }
}
