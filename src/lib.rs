//! # Academia - Client Session Library
//!
//! This is a facade crate that re-exports all public APIs from the session components of the
//! Academia learning platform client.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! academia = { path = "../academia" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Identity`, `Role`, `BearerToken`, `Session`, `NavigationIntent`, etc.
//! - **Ports**: `DurableStorage`, `HttpTransport`, `ApiClient`, `NotificationSink`, `Navigator`
//! - **Application**: `SessionStore`, `RequestAugmenter`, `CredentialExchangeClient`, `RouteGuard`
//! - **Adapters**: `ReqwestTransport`, `JsonFileStorage`, `NotificationCenter`, `Settings`, etc.

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use academia_core::*;
}

// Re-export most commonly used core types at the root level
pub use academia_core::{
    Admission, AdmissionPolicy, AuthEnvelope, BearerToken, Credentials, Identity, LANDING_VIEW,
    LOGIN_VIEW, NavigationIntent, REGISTER_VIEW, RegistrationProfile, RegistrationReply, Role,
    RouteRule, RouteTable, Session, UserId,
};

/// Error taxonomy
pub use academia_core::{ApiError, AuthError, ContractError, ErrorKind, FailureClass};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use academia_core::{
        ApiClient, ApiRequest, ApiResponse, CURRENT_USER_KEY, DurableStorage, HttpTransport,
        Navigator, Notification, NotificationCategory, NotificationSink, StorageError,
        StorageWrite, TOKEN_KEY, TransportError,
    };
}

// Re-export ports at root level
pub use ports::*;

// ============================================================================
// Application Layer
// ============================================================================

/// Session store, request augmentation, credential exchange and route guarding
pub mod application {
    pub use academia_application::*;
}

pub use academia_application::{
    CredentialExchangeClient, LoginUseCase, LogoutUseCase, RefreshProfileUseCase,
    RegisterUseCase, RegistrationOutcome, RequestAugmenter, RouteGuard, SessionStore,
    SessionUpdate, Subscription,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP transport
    pub mod http {
        pub use academia_adapters::http::*;
    }

    /// Durable storage implementations
    pub mod persistence {
        pub use academia_adapters::persistence::*;
    }

    /// Notification surface
    pub mod notifications {
        pub use academia_adapters::notifications::*;
    }

    /// Navigation surface
    pub mod navigation {
        pub use academia_adapters::navigation::*;
    }

    /// Configuration
    pub mod config {
        pub use academia_adapters::config::*;
    }

    pub use academia_adapters::telemetry;
}

// Re-export commonly used adapters at root level
pub use academia_adapters::{
    InMemoryStorage, JsonFileStorage, NavigationHistory, NotificationCenter, NotificationRecord,
    ReqwestTransport, SessionStorage, Settings, SettingsError, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
