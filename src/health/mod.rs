pub mod health_check;
pub mod health_checks;
#[cfg(feature = "http")]
pub mod health_endpoint;
pub mod health_report;
pub mod health_status;
