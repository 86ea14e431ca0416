//! Backend paths consumed by the session core, relative to the API base URL.

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const PROFILE_ENDPOINT: &str = "/auth/profile";
