use http::StatusCode;
use thiserror::Error;

/// Closed taxonomy of failures surfaced by the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredentials,
    ValidationError,
    ServiceUnavailable,
    NetworkError,
    Unauthorized,
    Forbidden,
    ServerError,
    BackendContractError,
    UnknownError,
}

/// Failure reported to the view that submitted credentials or asked for the profile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    NetworkError(String),
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    #[error("{0}")]
    ServerError(String),
    #[error("Unexpected response from the server: {0}")]
    BackendContractError(String),
    #[error("{0}")]
    UnknownError(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::ValidationError(_) => ErrorKind::ValidationError,
            AuthError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::NetworkError(_) => ErrorKind::NetworkError,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::ServerError(_) => ErrorKind::ServerError,
            AuthError::BackendContractError(_) => ErrorKind::BackendContractError,
            AuthError::UnknownError(_) => ErrorKind::UnknownError,
        }
    }
}

impl From<ContractError> for AuthError {
    fn from(error: ContractError) -> Self {
        AuthError::BackendContractError(error.to_string())
    }
}

/// The backend answered 2xx but the body matched none of the shapes we know.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("response body is not JSON")]
    NotJson,
    #[error("response body matches no known envelope")]
    UnknownShape,
    #[error("user payload is malformed: {0}")]
    MalformedUser(String),
    #[error("issued token cannot be sent in an Authorization header")]
    InvalidToken,
}

/// The original error of an outbound call, as seen by the caller after the augmenter ran.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request failed with status {status}")]
    Status { status: StatusCode, body: String },
    #[error("No response from server: {0}")]
    Network(String),
    #[error("Request could not be built: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best human-readable message carried by the error response, if any.
    ///
    /// JSON bodies are searched for `message` then `error`; anything else non-empty is used
    /// verbatim.
    pub fn backend_message(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };

        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
                .filter(|message| !message.trim().is_empty())
                .map(str::to_string),
            Ok(serde_json::Value::String(message)) if !message.trim().is_empty() => Some(message),
            Ok(_) => None,
            Err(_) => Some(body.to_string()),
        }
    }

    pub fn class(&self) -> FailureClass {
        FailureClass::of(self)
    }
}

/// Category an outbound failure falls into, which decides the side effects the augmenter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Unauthorized,
    Forbidden,
    ServerError,
    NetworkError,
    Other,
}

impl FailureClass {
    pub fn of(error: &ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                FailureClass::Unauthorized
            }
            ApiError::Status { status, .. } if *status == StatusCode::FORBIDDEN => {
                FailureClass::Forbidden
            }
            ApiError::Status { status, .. } if status.is_server_error() => {
                FailureClass::ServerError
            }
            ApiError::Network(_) => FailureClass::NetworkError,
            _ => FailureClass::Other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FailureClass::Unauthorized => ErrorKind::Unauthorized,
            FailureClass::Forbidden => ErrorKind::Forbidden,
            FailureClass::ServerError => ErrorKind::ServerError,
            FailureClass::NetworkError => ErrorKind::NetworkError,
            FailureClass::Other => ErrorKind::UnknownError,
        }
    }
}
