pub mod domain;
pub mod error;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    credentials::{Credentials, RegistrationProfile},
    identity::{Identity, UserId},
    navigation::{
        LANDING_VIEW, LOGIN_VIEW, NavigationIntent, REGISTER_VIEW, RouteRule, RouteTable,
    },
    role::{Role, UnknownRole},
    session::Session,
    token::BearerToken,
};

pub use error::{ApiError, AuthError, ContractError, ErrorKind, FailureClass};

pub use ports::{
    services::{Navigator, Notification, NotificationCategory, NotificationSink},
    storage::{CURRENT_USER_KEY, DurableStorage, StorageError, StorageWrite, TOKEN_KEY},
    transport::{ApiClient, ApiRequest, ApiResponse, HttpTransport, TransportError},
};

pub use strategies::{
    envelope::{AuthEnvelope, RegistrationReply},
    route_admission::{Admission, AdmissionPolicy},
};
