//! Response envelopes and the login exchange.

use serde::{Deserialize, Serialize};

use crate::model::serde_helper::string_lenient;

/// `{Status: 'T'|'F', Message}` returned by every mutating backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiEnvelope {
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Message", default, deserialize_with = "string_lenient")]
    pub message: String,
}

impl ApiEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "T".to_string(),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "F".to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("T")
    }

    /// Message to toast, with a fallback when the backend sent none.
    pub fn display_message(&self, fallback: &str) -> String {
        if self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Error body produced by the local API routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "User_Password")]
    pub user_password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("User ID is required".to_string());
        }
        if self.user_password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Message", default, deserialize_with = "string_lenient")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub is_change_password: bool,
}

impl LoginResponse {
    /// Token to store, only when the backend accepted the credentials.
    pub fn accepted_token(&self) -> Option<&str> {
        if self.status.eq_ignore_ascii_case("T") {
            self.token.as_deref().filter(|t| !t.is_empty())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "Old_Password")]
    pub old_password: String,
    #[serde(rename = "New_Password")]
    pub new_password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl ChangePasswordRequest {
    /// Checks the new password against the confirmation and the old one.
    pub fn build(
        user_id: &str,
        old_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<Self, String> {
        if old_password.is_empty() {
            return Err("Current password is required".to_string());
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if new_password != confirm {
            return Err("New password and confirmation do not match".to_string());
        }
        if new_password == old_password {
            return Err("New password must differ from the current one".to_string());
        }
        Ok(Self {
            user_id: user_id.to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}
