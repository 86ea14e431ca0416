pub mod credential_exchange;
pub mod endpoints;
pub mod request_augmenter;
pub mod route_guard;
pub mod session_store;
pub mod use_cases;

pub use credential_exchange::CredentialExchangeClient;
pub use endpoints::{LOGIN_ENDPOINT, PROFILE_ENDPOINT, REGISTER_ENDPOINT};
pub use request_augmenter::{RequestAugmenter, messages};
pub use route_guard::RouteGuard;
pub use session_store::{SessionStore, SessionUpdate, Subscription};
pub use use_cases::{
    LoginUseCase, LogoutUseCase, REGISTERED_MESSAGE, RefreshProfileUseCase, RegisterUseCase,
    RegistrationOutcome,
};
