//! Authentication and user roster service

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by email and password, returning a JWT token
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let Some(ref hash) = user.password_hash else {
            return Ok(false);
        };
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Current user from token claims
    pub async fn get_user(&self, user_id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Staff roster
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }
}
