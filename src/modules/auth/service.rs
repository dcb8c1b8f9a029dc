use anyhow::anyhow;
use chrono::Utc;
use pipecrm_auth::{hash_password, issue_token, verify_password};
use super::model::{LoginDto, RegisterDto, Role, UpdateProfileDto, User};
use pipecrm_store::Store;
use tracing::{info, instrument, warn};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, dto), fields(user.name = %dto.username))]
    pub fn register(store: &Store, dto: RegisterDto) -> Result<User, AppError> {
        if store
            .users
            .any(|u| u.username == dto.username || u.email == dto.email)
        {
            warn!(user.name = %dto.username, "Registration with existing username or email");
            return Err(AppError::conflict(anyhow!(
                "Username or email already exists"
            )));
        }

        let hashed = hash_password(&dto.password).map_err(AppError::internal)?;
        let user = store.users.insert(|id| User {
            id,
            username: dto.username.clone(),
            email: dto.email.clone(),
            password: hashed.clone(),
            role: dto.role.unwrap_or(Role::User),
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            created_at: Utc::now(),
            updated_at: None,
        });

        info!(user.id = %user.id, user.name = %user.username, "User registered");
        Ok(user)
    }

    /// Login with username or email. Both unknown-user and wrong-password
    /// return the same message so accounts cannot be enumerated.
    #[instrument(skip(store, dto, jwt_config), fields(user.name = %dto.username))]
    pub fn login(
        store: &Store,
        jwt_config: &JwtConfig,
        dto: LoginDto,
    ) -> Result<(String, User), AppError> {
        let invalid = || AppError::unauthorized(anyhow!("Invalid credentials"));

        let user = store
            .users
            .find(|u| u.username == dto.username || u.email == dto.username)
            .ok_or_else(invalid)?;

        let valid = verify_password(&dto.password, &user.password).map_err(AppError::internal)?;
        if !valid {
            warn!(user.name = %dto.username, "Failed login attempt");
            return Err(invalid());
        }

        let token = issue_token(&user, &jwt_config.secret, jwt_config.access_token_expiry)
            .map_err(|e| AppError::internal(anyhow!("{e}")))?;

        info!(user.id = %user.id, "Login successful");
        Ok((token, user))
    }

    pub fn find_user(store: &Store, user_id: i64) -> Result<User, AppError> {
        store
            .users
            .get(user_id)
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(store, dto))]
    pub fn update_profile(
        store: &Store,
        user_id: i64,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        Self::find_user(store, user_id)?;

        let user = store
            .users
            .update(user_id, |user| {
                if let Some(first_name) = dto.first_name.clone() {
                    user.first_name = first_name;
                }
                if let Some(last_name) = dto.last_name.clone() {
                    user.last_name = last_name;
                }
                if let Some(email) = dto.email.clone() {
                    user.email = email;
                }
                user.updated_at = Some(Utc::now());
            })
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        info!(user.id = %user.id, "Profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn register_dto(username: &str, email: &str) -> RegisterDto {
        RegisterDto {
            username: username.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: None,
        }
    }

    #[test]
    fn register_then_login_round_trip() {
        let store = Store::new();
        let user = AuthService::register(&store, register_dto("alice", "alice@example.com"))
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password, "password123");

        let (token, logged_in) = AuthService::login(
            &store,
            &test_jwt(),
            LoginDto {
                username: "alice".to_string(),
                password: "password123".to_string(),
            },
        )
        .unwrap();
        assert!(!token.is_empty());
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn login_accepts_email_as_identifier() {
        let store = Store::new();
        AuthService::register(&store, register_dto("bob", "bob@example.com")).unwrap();

        let result = AuthService::login(
            &store,
            &test_jwt(),
            LoginDto {
                username: "bob@example.com".to_string(),
                password: "password123".to_string(),
            },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn duplicate_username_is_conflict() {
        let store = Store::new();
        AuthService::register(&store, register_dto("carol", "carol@example.com")).unwrap();
        let err = AuthService::register(&store, register_dto("carol", "other@example.com"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let store = Store::new();
        AuthService::register(&store, register_dto("dave", "dave@example.com")).unwrap();
        let err = AuthService::login(
            &store,
            &test_jwt(),
            LoginDto {
                username: "dave".to_string(),
                password: "wrong-password".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn profile_update_touches_updated_at() {
        let store = Store::new();
        let user = AuthService::register(&store, register_dto("erin", "erin@example.com"))
            .unwrap();
        assert!(user.updated_at.is_none());

        let updated = AuthService::update_profile(
            &store,
            user.id,
            UpdateProfileDto {
                first_name: Some("Erin".to_string()),
                last_name: None,
                email: None,
            },
        )
        .unwrap();
        assert_eq!(updated.first_name, "Erin");
        assert_eq!(updated.last_name, "User");
        assert!(updated.updated_at.is_some());
    }
}
