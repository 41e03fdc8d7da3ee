//! 认证服务：注册、登录

use crate::{
    auth::{jwt::TokenService, password::PasswordHasher},
    error::AppError,
    models::{auth::*, user::*},
    repository::UserStore,
};
use std::sync::Arc;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// 用户注册，成功后返回新签发的会话令牌
    pub async fn signup(&self, req: SignupRequest) -> Result<String, AppError> {
        let req = req.normalized();
        req.validate()?;

        let password_hash = self.hash_password(req.password).await?;

        let user = self
            .users
            .create(&NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");

        self.tokens.issue(&user.id)
    }

    /// 用户登录；邮箱不存在与密码错误返回同一条错误
    pub async fn signin(&self, req: SigninRequest) -> Result<String, AppError> {
        req.validate()?;

        let user: User = self
            .users
            .find_by_email(req.email.trim())
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_CREDENTIALS))?;

        if !self.verify_password(req.password, user.password_hash.clone()).await? {
            tracing::info!(user_id = %user.id, "Signin rejected: wrong password");
            return Err(AppError::bad_request(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "User signed in");

        self.tokens.issue(&user.id)
    }

    /// Argon2 是 CPU 密集操作，放到阻塞线程池执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}
