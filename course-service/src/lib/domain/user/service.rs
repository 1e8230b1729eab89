use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::Session;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account and session operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    // PBKDF2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let hash = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, stored_hash: String) -> Result<bool, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.as_str().to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_password(command.password).await?;

        let new_user = NewUser {
            username: command.username,
            password_hash,
            real_name: command.real_name,
            email: command.email,
            phone: command.phone,
            role: Role::Student,
            active: true,
            created_at: Utc::now(),
        };

        let user = self.repository.create(new_user).await?;

        let access_token = self
            .authenticator
            .issue_token(user.id.0, user.role.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Session { user, access_token })
    }

    async fn login(&self, username: &Username, password: &str) -> Result<Session, UserError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(user) if user.can_authenticate() => user,
            Some(user) => {
                tracing::warn!(user_id = %user.id, "Login attempt on disabled account");
                return Err(UserError::InvalidCredentials);
            }
            None => return Err(UserError::InvalidCredentials),
        };

        let is_valid = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;
        if !is_valid {
            tracing::warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let logged_in_at = Utc::now();
        self.repository.record_login(&user.id, logged_in_at).await?;

        let access_token = self
            .authenticator
            .issue_token(user.id.0, user.role.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "User logged in");

        let user = User {
            last_login_at: Some(logged_in_at),
            ..user
        };

        Ok(Session { user, access_token })
    }

    async fn resolve_identity(&self, token: &str) -> Result<User, UserError> {
        let payload = self.authenticator.decode_token(token)?;

        self.repository
            .find_by_id(&UserId(payload.user_id))
            .await?
            .filter(User::can_authenticate)
            .ok_or(UserError::UnknownOrDisabledIdentity)
    }

    fn authorize_admin(&self, user: &User) -> Result<(), UserError> {
        if user.role.is_admin() {
            Ok(())
        } else {
            Err(UserError::InsufficientRole)
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if let Some(owner) = self.repository.find_by_email(new_email.as_str()).await? {
                    if owner.id != user.id {
                        return Err(UserError::EmailAlreadyExists(
                            new_email.as_str().to_string(),
                        ));
                    }
                }
                user.email = new_email;
            }
        }

        if let Some(new_real_name) = command.real_name {
            user.real_name = new_real_name;
        }

        if let Some(new_phone) = command.phone {
            user.phone = Some(new_phone);
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }
}
