//! 图书管理的 HTTP 处理器
//!
//! Read, update and delete look books up by id alone unless
//! `security.enforce_book_ownership` is set. A missing row is a store
//! failure like any other and answers with the generic 500.

use crate::{
    auth::middleware::CurrentUser,
    error::AppError,
    extract::{AppJson, BookId},
    middleware::AppState,
    models::book::*,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 创建图书
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    AppJson(req): AppJson<CreateBookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = req.normalized();
    req.validate()?;

    let book = state.books.create(current_user.id, &req).await?;

    tracing::info!(book_id = %book.id, user_id = %current_user.id, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book created successfully",
            "data": book
        })),
    ))
}

/// 列出当前用户的图书
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list_by_owner(current_user.id).await?;

    Ok(Json(json!({
        "message": "Books retrieved successfully",
        "data": books
    })))
}

/// 获取图书详情
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    BookId(id): BookId,
) -> Result<impl IntoResponse, AppError> {
    let book = load_accessible(&state, &current_user, id).await?;

    Ok(Json(json!({
        "message": "Book retrieved successfully",
        "data": book
    })))
}

/// 更新图书
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    BookId(id): BookId,
    AppJson(req): AppJson<UpdateBookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = req.normalized();
    req.validate()?;

    if state.config.security.enforce_book_ownership {
        load_accessible(&state, &current_user, id).await?;
    }

    let book = state
        .books
        .update(id, &req)
        .await?
        .ok_or_else(|| book_missing(id))?;

    Ok(Json(json!({
        "message": "Book updated successfully",
        "data": book
    })))
}

/// 删除图书
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    BookId(id): BookId,
) -> Result<impl IntoResponse, AppError> {
    if state.config.security.enforce_book_ownership {
        load_accessible(&state, &current_user, id).await?;
    }

    if !state.books.delete(id).await? {
        return Err(book_missing(id));
    }

    tracing::info!(book_id = %id, user_id = %current_user.id, "Book deleted");

    Ok(Json(json!({
        "message": "Book deleted successfully"
    })))
}

/// Load a book, hiding other users' books when ownership is enforced
async fn load_accessible(
    state: &AppState,
    current_user: &CurrentUser,
    id: Uuid,
) -> Result<Book, AppError> {
    let book = state
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| book_missing(id))?;

    if state.config.security.enforce_book_ownership && book.user_id != current_user.id {
        tracing::warn!(book_id = %id, user_id = %current_user.id, "Access to foreign book denied");
        return Err(book_missing(id));
    }

    Ok(book)
}

fn book_missing(id: Uuid) -> AppError {
    AppError::Internal(format!("book {} not found", id))
}
