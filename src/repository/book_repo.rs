//! Book repository (图书数据访问)

use super::BookStore;
use crate::{error::AppError, models::book::*};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookRepository {
    db: PgPool,
}

impl BookRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookStore for BookRepository {
    /// 创建图书
    async fn create(&self, owner_id: Uuid, req: &CreateBookRequest) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, status, genre, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.author)
        .bind(&req.status)
        .bind(&req.genre)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(book)
    }

    /// 列出用户的图书
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(books)
    }

    /// 获取图书
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(book)
    }

    /// 更新图书
    async fn update(&self, id: Uuid, req: &UpdateBookRequest) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                status = COALESCE($4, status),
                genre = COALESCE($5, genre),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.author)
        .bind(&req.status)
        .bind(&req.genre)
        .fetch_optional(&self.db)
        .await?;

        Ok(book)
    }

    /// 删除图书（软删除）
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
