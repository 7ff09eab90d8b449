use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{password, JwtService},
    errors::{AppError, AppResult},
    models::domain::User,
    models::dto::request::{LoginRequest, RegisterRequest},
    models::dto::response::{AuthResponse, UserDto},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: JwtService,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: JwtService) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    /// Register a new account. Every account starts with the `user` role;
    /// admins are provisioned out-of-band.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let password_hash = password::hash_password(&request.password)?;
        let user = User::new(&request.username, &request.email, &password_hash);

        let stored = self.repository.create(user).await?;
        log::info!("Registered new user {}", stored.username);

        let token = self.jwt_service.create_token(&stored)?;
        Ok(AuthResponse {
            token,
            user: UserDto::from(stored),
        })
    }

    /// Log in. Unknown usernames and wrong passwords produce the same
    /// response so callers cannot probe for accounts.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            token,
            user: UserDto::from(user),
        })
    }

    /// All registered users, for the admin dashboard. Password hashes never
    /// leave the service.
    pub async fn list_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".to_string())
}
