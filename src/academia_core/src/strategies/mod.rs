pub mod envelope;
pub mod route_admission;
