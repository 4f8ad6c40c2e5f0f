//! In-memory book storage backing the CRUD routes.

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::{Timestamp, Uuid};

use super::models::{Book, BookInput};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("catalog is full ({0} books)")]
    CapacityReached(usize),
}

/// Books kept in insertion order, bounded by `capacity`.
pub struct BookStore {
    books: RwLock<Vec<Book>>,
    capacity: usize,
}

impl BookStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            books: RwLock::new(Vec::new()),
            capacity,
        }
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Book, StoreError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub async fn create(&self, record: BookInput) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        if books.len() >= self.capacity {
            return Err(StoreError::CapacityReached(self.capacity));
        }

        let book = Book {
            id: Uuid::new_v7(Timestamp::now(uuid::NoContext)).to_string(),
            record,
        };
        books.push(book.clone());
        Ok(book)
    }

    pub async fn update(&self, id: &str, record: BookInput) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        book.record = record;
        Ok(book.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        let position = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        books.remove(position);
        Ok(())
    }
}
