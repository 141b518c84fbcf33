//! Unified application error types for Gatekeeper.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The coarse [`ErrorKind`] decides the
//! HTTP status at the boundary; the optional [`ErrorCode`] names the exact
//! failure so callers (and clients) can branch on it.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (missing field, weak password, ...).
    Validation,
    /// The caller could not be identified (missing, malformed, expired, or
    /// badly-signed credential).
    Unauthorized,
    /// The caller is identified but lacks the privilege or access grant.
    Forbidden,
    /// The requested resource was not found.
    NotFound,
    /// A conflict occurred (duplicate login).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind represents a server-side failure whose details must
    /// not be exposed to clients.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database | Self::Configuration | Self::Serialization | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Machine-readable reason attached to domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    /// A required request field was missing or blank.
    MissingField,
    /// The password does not satisfy the password policy.
    WeakPassword,
    /// A partial update carried no recognized field.
    NothingToUpdate,
    /// A service identifier could not be parsed.
    InvalidServiceId,
    /// No bearer header and no session cookie were present.
    MissingCredentials,
    /// Unknown login or wrong password.
    InvalidCredentials,
    /// The token MAC does not verify under the shared secret.
    InvalidSignature,
    /// The token or its payload could not be parsed.
    MalformedToken,
    /// The token expiration instant has passed.
    ExpiredToken,
    /// The user named by a token no longer exists.
    UnknownUser,
    /// The target service is not in the caller's access list.
    AccessDenied,
    /// The operation requires an administrator.
    AdminRequired,
    /// An administrator tried to remove their own admin flag.
    SelfDemotion,
    /// An administrator tried to delete their own account.
    SelfDeletion,
    /// The referenced user does not exist.
    UserNotFound,
    /// The referenced service does not exist.
    ServiceNotFound,
    /// The login is already registered.
    UsernameTaken,
}

impl ErrorCode {
    /// The error kind every occurrence of this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField
            | Self::WeakPassword
            | Self::NothingToUpdate
            | Self::InvalidServiceId => ErrorKind::Validation,
            Self::MissingCredentials
            | Self::InvalidCredentials
            | Self::InvalidSignature
            | Self::MalformedToken
            | Self::ExpiredToken
            | Self::UnknownUser => ErrorKind::Unauthorized,
            Self::AccessDenied | Self::AdminRequired | Self::SelfDemotion | Self::SelfDeletion => {
                ErrorKind::Forbidden
            }
            Self::UserNotFound | Self::ServiceNotFound => ErrorKind::NotFound,
            Self::UsernameTaken => ErrorKind::Conflict,
        }
    }

    /// Return the code as a SCREAMING_SNAKE_CASE string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::NothingToUpdate => "NOTHING_TO_UPDATE",
            Self::InvalidServiceId => "INVALID_SERVICE_ID",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::UnknownUser => "UNKNOWN_USER",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::SelfDemotion => "SELF_DEMOTION",
            Self::SelfDeletion => "SELF_DELETION",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ServiceNotFound => "SERVICE_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified application error used throughout Gatekeeper.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// The precise domain reason, when there is one.
    pub code: Option<ErrorCode>,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a domain error; the kind is derived from the code.
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: code.kind(),
            code: Some(code),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error carries the given code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Missing or blank request field.
    pub fn missing_field(field: &str) -> Self {
        Self::coded(ErrorCode::MissingField, format!("Missing '{field}' field"))
    }

    /// Password policy violation.
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::coded(ErrorCode::WeakPassword, message)
    }

    /// Unknown user id.
    pub fn user_not_found(id: impl fmt::Display) -> Self {
        Self::coded(ErrorCode::UserNotFound, format!("User {id} not found"))
    }

    /// Unknown service id.
    pub fn service_not_found(id: impl fmt::Display) -> Self {
        Self::coded(ErrorCode::ServiceNotFound, format!("Service {id} not found"))
    }

    /// Duplicate login.
    pub fn username_taken(login: &str) -> Self {
        Self::coded(
            ErrorCode::UsernameTaken,
            format!("Username {login} already in use"),
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(ErrorKind::Database, format!("Database error: {err}"), err)
    }
}
