//! HTTP 处理器模块

pub mod auth;
pub mod books;
pub mod health;
