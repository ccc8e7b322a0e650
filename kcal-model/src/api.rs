//! Bodies exchanged with the calculation service besides the request and
//! the estimate themselves.

use serde::{Deserialize, Serialize};

use crate::biometrics::{ActivityLevel, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidInput,
    InvalidActivityLevel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&ValidationError> for ErrorResponse {
    fn from(error: &ValidationError) -> Self {
        let kind = match error {
            ValidationError::InvalidInput(_) => ErrorKind::InvalidInput,
            ValidationError::InvalidActivityLevel(_) => ErrorKind::InvalidActivityLevel,
        };
        Self {
            error: kind,
            message: error.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLevelInfo {
    pub label: String,
    pub activity_factor: f64,
}

impl From<ActivityLevel> for ActivityLevelInfo {
    fn from(level: ActivityLevel) -> Self {
        Self {
            label: level.label().to_owned(),
            activity_factor: level.factor(),
        }
    }
}
