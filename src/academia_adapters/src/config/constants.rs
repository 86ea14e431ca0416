pub const CONFIG_DIR: &str = "config";
pub const CONFIG_FILE_STEM: &str = "academia";

pub const ENV_PREFIX: &str = "ACADEMIA";
pub const ENV_SEPARATOR: &str = "__";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_API_TIMEOUT_MILLIS: u64 = 10_000;

pub mod env {
    pub const LOGIN_IDENTIFIER_ENV_VAR: &str = "ACADEMIA_LOGIN_IDENTIFIER";
    pub const LOGIN_SECRET_ENV_VAR: &str = "ACADEMIA_LOGIN_SECRET";
}
