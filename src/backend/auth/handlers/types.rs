/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across register, login and profile handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::validate::{max_len, non_blank};
use crate::shared::SharedError;

pub use crate::backend::auth::users::UserResponse;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Column widths of the users table
const USERNAME_MAX: usize = 50;
const NAME_MAX: usize = 255;
const PHONE_MAX: usize = 20;

/// Path segments under `/api/profiles` that cannot double as usernames
const RESERVED_USERNAMES: [&str; 2] = ["me", "follow"];

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Plain password (hashed before storage)
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Registration fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, SharedError> {
        let (Some(username), Some(email), Some(password)) = (
            non_blank(self.username),
            non_blank(self.email),
            self.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(SharedError::validation(
                "username",
                "Username, email, and password are required",
            ));
        };

        if !email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email address"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        max_len(Some(username.trim()), "username", "Username", USERNAME_MAX)?;
        if RESERVED_USERNAMES.contains(&username.trim().to_lowercase().as_str()) {
            return Err(SharedError::validation("username", "Username is reserved"));
        }
        max_len(Some(email.trim()), "email", "Email", NAME_MAX)?;
        check_contact(self.full_name.as_deref(), self.phone.as_deref())?;

        Ok(Registration {
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            password,
            full_name: non_blank(self.full_name),
            phone: non_blank(self.phone),
            address: non_blank(self.address),
        })
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by register and login handlers. Contains the JWT token
/// and user information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Profile response
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// Profile update request; absent fields are left untouched
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(self) -> Result<Self, SharedError> {
        check_contact(self.full_name.as_deref(), self.phone.as_deref())?;
        Ok(self)
    }
}

fn check_contact(full_name: Option<&str>, phone: Option<&str>) -> Result<(), SharedError> {
    max_len(full_name, "full_name", "Full name", NAME_MAX)?;
    max_len(phone, "phone", "Phone", PHONE_MAX)
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: UserResponse,
}
