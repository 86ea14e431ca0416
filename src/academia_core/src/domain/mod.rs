pub mod credentials;
pub mod identity;
pub mod navigation;
pub mod role;
pub mod session;
pub mod token;
