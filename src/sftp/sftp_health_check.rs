use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use russh::{client::Handle, keys::{HashAlg, PrivateKeyWithHashAlg}};
use russh_sftp::client::SftpSession;

use crate::{health::health_check::{HealthCheck, HealthCheckResult}, sftp::{sftp_auth_method::SftpAuthMethod, sftp_configuration::SftpConfiguration, ssh_client::SshClient}};

/// Verifies that an SFTP endpoint accepts a session, optionally creating a remote file.
pub struct SftpHealthCheck {
    configuration: SftpConfiguration,
    timeout: Duration,
    host_key_fingerprint: Option<String>,
}

impl SftpHealthCheck {
    pub fn new(configuration: SftpConfiguration) -> Self {
        SftpHealthCheck {
            configuration,
            timeout: Duration::from_secs(10),
            host_key_fingerprint: None,
        }
    }

    /// **Optional**
    ///
    /// Default: `10s`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// **Optional**
    ///
    /// Pins the server host key to a `SHA256:<base64>` fingerprint. A server presenting any other key is unhealthy.
    pub fn host_key_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.host_key_fingerprint = Some(fingerprint.into());
        self
    }

    pub fn configuration(&self) -> &SftpConfiguration {
        &self.configuration
    }

    async fn connect(&self) -> anyhow::Result<()> {
        let configuration = &self.configuration;
        let config = russh::client::Config::default();

        tracing::debug!("connecting to {}:{}", configuration.host(), configuration.port());
        let client = SshClient::new(configuration.host(), configuration.port(), self.host_key_fingerprint.clone());
        let mut session = russh::client::connect(Arc::new(config), (configuration.host(), configuration.port()), client).await?;

        if !Self::authenticate(&mut session, configuration).await? {
            return Err(anyhow::anyhow!("All authentication methods were rejected for user '{}'.", configuration.username()));
        }

        let channel = session.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream()).await?;

        let file_creation = configuration.file_creation();
        if file_creation.create_file {
            sftp.create(file_creation.remote_path.as_str()).await?;
            tracing::debug!("created remote file {}", file_creation.remote_path);
        }

        sftp.close().await?;
        session.disconnect(russh::Disconnect::ByApplication, "", "en").await?;
        tracing::debug!("connected to {}:{}", configuration.host(), configuration.port());
        Ok(())
    }

    /// Tries each method in registration order and stops at the first accepted one.
    async fn authenticate(session: &mut Handle<SshClient>, configuration: &SftpConfiguration) -> anyhow::Result<bool> {
        for method in configuration.authentication_methods() {
            let result = match method {
                SftpAuthMethod::Password { username, password } => {
                    session.authenticate_password(username.as_str(), password.as_str()).await?
                }
                SftpAuthMethod::PrivateKey { username, private_key } => {
                    let key = private_key.key();
                    let hash_alg = match key.algorithm() {
                        russh::keys::Algorithm::Rsa { .. } => Some(HashAlg::Sha256),
                        _ => None,
                    };
                    session.authenticate_publickey(username.as_str(), PrivateKeyWithHashAlg::new(key, hash_alg)).await?
                }
            };

            if result.success() {
                tracing::debug!("authenticated {} using {:?}", method.username(), method);
                return Ok(true);
            }
            tracing::debug!("authentication rejected for {:?}", method);
        }

        Ok(false)
    }
}

impl HealthCheck for SftpHealthCheck {
    fn check(&self) -> BoxFuture<'_, HealthCheckResult> {
        Box::pin(async move {
            match tokio::time::timeout(self.timeout, self.connect()).await {
                Ok(Ok(())) => HealthCheckResult::healthy(),
                Ok(Err(err)) => {
                    tracing::warn!("sftp check against {} failed: {:?}", self.configuration.host(), err);
                    HealthCheckResult::unhealthy(err.to_string())
                }
                Err(_) => HealthCheckResult::unhealthy(format!("Connection to {} timed out after {:?}.", self.configuration.host(), self.timeout)),
            }
        })
    }
}
