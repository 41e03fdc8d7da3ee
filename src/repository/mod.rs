//! Database repository layer
//!
//! Handlers only see the [`UserStore`] and [`BookStore`] traits; `main` wires
//! the Postgres implementations in.

pub mod book_repo;
pub mod user_repo;

pub use book_repo::BookRepository;
pub use user_repo::UserRepository;

use crate::{
    error::AppError,
    models::{
        book::{Book, CreateBookRequest, UpdateBookRequest},
        user::{NewUser, User},
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Readiness check used by `/health`
    async fn ping(&self) -> Result<(), AppError>;
}

/// Book store
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, owner_id: Uuid, req: &CreateBookRequest) -> Result<Book, AppError>;

    /// Books owned by `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Book>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, AppError>;

    /// `None` fields keep their stored value. Returns `None` if no such book.
    async fn update(&self, id: Uuid, req: &UpdateBookRequest) -> Result<Option<Book>, AppError>;

    /// Returns whether a book was deleted
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
