pub mod services;
pub mod storage;
pub mod transport;
