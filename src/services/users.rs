//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{CreateUser, UpdateUser, User, UserClaims},
    },
    repository::{users::NewUser, Repository},
    validation,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by email and password, returning a JWT and the user
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let email = email.trim().to_lowercase();
        let user = self
            .repository
            .users
            .get_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !user.active || !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = UserClaims::new(&user, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((token, user))
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        validation::password(&data.password)?;
        self.ensure_station_exists(data.station_id).await?;

        let email = data.email.trim().to_lowercase();
        let password_hash = hash_password(&data.password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                email: &email,
                password_hash: &password_hash,
                first_name: data.first_name.trim(),
                last_name: data.last_name.trim(),
                role: data.role.unwrap_or_default(),
                station_id: data.station_id,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "Created user");
        Ok(user)
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        data.validate()?;
        let password_hash = match data.password {
            Some(ref password) => {
                validation::password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };
        self.ensure_station_exists(data.station_id).await?;

        self.repository
            .users
            .update(id, data, password_hash.as_deref())
            .await
    }

    /// Delete a user; an account cannot delete itself
    pub async fn delete(&self, id: i32, actor: &UserClaims) -> AppResult<()> {
        if id == actor.user_id {
            return Err(AppError::Validation("You cannot delete your own account".to_string()));
        }
        self.repository.users.delete(id).await
    }

    /// Create the first admin account from configuration when no user exists.
    /// Returns whether an account was created.
    pub async fn bootstrap_admin(&self) -> AppResult<bool> {
        let (Some(email), Some(password)) = (
            self.config.bootstrap_admin_email.as_deref(),
            self.config.bootstrap_admin_password.as_deref(),
        ) else {
            return Ok(false);
        };

        if self.repository.users.count().await? > 0 {
            return Ok(false);
        }

        validation::password(password)?;
        let email = email.trim().to_lowercase();
        let password_hash = hash_password(password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                email: &email,
                password_hash: &password_hash,
                first_name: "Admin",
                last_name: "",
                role: UserRole::Admin,
                station_id: None,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "Bootstrapped admin account");
        Ok(true)
    }

    async fn ensure_station_exists(&self, station_id: Option<i32>) -> AppResult<()> {
        if let Some(station_id) = station_id {
            if !self.repository.stations.exists(station_id).await? {
                return Err(AppError::Validation(format!("Station {} does not exist", station_id)));
            }
        }
        Ok(())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Ladder#42").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "Ladder#42").unwrap());
        assert!(!verify_password(&hash, "ladder#42").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("Ladder#42").unwrap(), hash_password("Ladder#42").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(verify_password("not-a-hash", "x"), Err(AppError::Internal(_))));
    }
}
