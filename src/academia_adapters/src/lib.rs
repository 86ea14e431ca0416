pub mod config;
pub mod http;
pub mod navigation;
pub mod notifications;
pub mod persistence;
pub mod telemetry;

pub use crate::config::{Settings, SettingsError};
pub use crate::http::ReqwestTransport;
pub use navigation::NavigationHistory;
pub use notifications::{NotificationCenter, NotificationRecord};
pub use persistence::{InMemoryStorage, JsonFileStorage, SessionStorage};
pub use telemetry::init_tracing;
