pub mod health;
pub mod utils;

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "sftp")]
pub mod sftp;
#[cfg(feature = "ui")]
pub mod storage;
#[cfg(feature = "ui")]
pub mod ui;
