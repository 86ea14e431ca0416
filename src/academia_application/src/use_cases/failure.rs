use academia_core::{ApiError, AuthError, FailureClass, StorageError};

const INVALID_DATA: &str = "The submitted data is not valid.";
const ALREADY_REGISTERED: &str = "A user with this email is already registered.";
const SERVICE_UNAVAILABLE: &str = "The service is unavailable. Please try again later.";

/// Map a failed credential exchange (login or registration) onto the error taxonomy.
pub(crate) fn credential_failure(error: ApiError) -> AuthError {
    let message = error.backend_message();

    match &error {
        ApiError::Network(reason) => {
            AuthError::ServiceUnavailable(format!("Could not reach the server: {reason}"))
        }
        ApiError::InvalidRequest(reason) => AuthError::UnknownError(reason.clone()),
        ApiError::Status { status, .. } => match status.as_u16() {
            401 => AuthError::InvalidCredentials,
            400 | 422 => {
                AuthError::ValidationError(message.unwrap_or_else(|| INVALID_DATA.to_string()))
            }
            409 => AuthError::ValidationError(
                message.unwrap_or_else(|| ALREADY_REGISTERED.to_string()),
            ),
            code if code >= 500 => AuthError::ServiceUnavailable(
                message.unwrap_or_else(|| SERVICE_UNAVAILABLE.to_string()),
            ),
            code => AuthError::UnknownError(
                message.unwrap_or_else(|| format!("Unexpected server response ({code})")),
            ),
        },
    }
}

/// Map a failed authenticated call onto the error taxonomy by its failure class.
pub(crate) fn session_failure(error: ApiError) -> AuthError {
    let message = error.backend_message();

    match error.class() {
        FailureClass::Unauthorized => AuthError::Unauthorized,
        FailureClass::Forbidden => AuthError::Forbidden,
        FailureClass::ServerError => AuthError::ServerError(
            message.unwrap_or_else(|| SERVICE_UNAVAILABLE.to_string()),
        ),
        FailureClass::NetworkError => AuthError::NetworkError(error.to_string()),
        FailureClass::Other => {
            AuthError::UnknownError(message.unwrap_or_else(|| error.to_string()))
        }
    }
}

pub(crate) fn storage_failure(error: StorageError) -> AuthError {
    AuthError::UnknownError(format!("Could not save the session: {error}"))
}
