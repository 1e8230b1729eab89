use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RealName;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::CREATED,
                TokenResponseData::bearer(session.access_token, &session.user),
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    confirm_password: String,
    real_name: String,
    email: String,
    phone: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        if self.password != self.confirm_password {
            return Err(UserError::PasswordMismatch);
        }

        Ok(RegisterCommand {
            username: Username::new(self.username)?,
            password: self.password,
            real_name: RealName::new(self.real_name)?,
            email: EmailAddress::new(self.email)?,
            phone: PhoneNumber::from_optional(self.phone)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            real_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: Some(" ".to_string()),
        }
    }

    #[test]
    fn test_try_into_command() {
        let command = request().try_into_command().expect("Failed to parse request");
        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(command.phone, None);
    }

    #[test]
    fn test_password_mismatch() {
        let mut request = request();
        request.confirm_password = "different".to_string();

        assert!(matches!(
            request.try_into_command(),
            Err(UserError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_invalid_fields() {
        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(matches!(
            bad_email.try_into_command(),
            Err(UserError::InvalidEmail(_))
        ));

        let mut bad_phone = request();
        bad_phone.phone = Some("0".repeat(25));
        assert!(matches!(
            bad_phone.try_into_command(),
            Err(UserError::InvalidPhoneNumber(_))
        ));

        let mut bad_username = request();
        bad_username.username = "a".to_string();
        assert!(matches!(
            bad_username.try_into_command(),
            Err(UserError::InvalidUsername(_))
        ));
    }
}
