//! bookworm：个人书单后端
//! Cookie 会话认证 + 图书 CRUD

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
