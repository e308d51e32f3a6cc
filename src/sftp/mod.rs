pub mod sftp_auth_method;
pub mod sftp_configuration;
pub mod sftp_configuration_error;
pub mod sftp_health_check;
pub mod sftp_private_key;
mod ssh_client;
