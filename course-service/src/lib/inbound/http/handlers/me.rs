use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RealName;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_me(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// HTTP request body for updating the caller's profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub real_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        let real_name = self.real_name.map(RealName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        let phone = PhoneNumber::from_optional(self.phone)?;

        Ok(UpdateProfileCommand {
            real_name,
            email,
            phone,
        })
    }
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_profile(&user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(phone: Option<&str>) -> UpdateProfileRequest {
        UpdateProfileRequest {
            real_name: None,
            email: None,
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_phone_is_ignored() {
        let command = request(Some("  ")).try_into_command().unwrap();
        assert_eq!(command.phone, None);

        let command = request(Some("")).try_into_command().unwrap();
        assert_eq!(command.phone, None);
    }

    #[test]
    fn test_phone_is_validated() {
        let command = request(Some(" 555-0100 ")).try_into_command().unwrap();
        assert_eq!(
            command.phone.as_ref().map(PhoneNumber::as_str),
            Some("555-0100")
        );

        assert!(matches!(
            request(Some(&"0".repeat(21))).try_into_command(),
            Err(UserError::InvalidPhoneNumber(_))
        ));
    }

    #[test]
    fn test_long_email_is_rejected() {
        let mut request = request(None);
        request.email = Some(format!("{}@{}.com", "a".repeat(60), "b".repeat(40)));

        assert!(matches!(
            request.try_into_command(),
            Err(UserError::InvalidEmail(_))
        ));
    }
}
