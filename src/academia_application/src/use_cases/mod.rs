mod failure;
pub mod login;
pub mod logout;
pub mod refresh_profile;
pub mod register;

pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use refresh_profile::RefreshProfileUseCase;
pub use register::{REGISTERED_MESSAGE, RegisterUseCase, RegistrationOutcome};
