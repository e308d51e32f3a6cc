use russh::keys::{HashAlg, PublicKey};

/// Client handler for the SFTP check.
///
/// Without a pinned fingerprint any server key is accepted, since the check only verifies liveness.
/// With one, the session is refused unless the server presents a key with that SHA256 fingerprint.
pub struct SshClient {
    host: String,
    port: u16,
    host_key_fingerprint: Option<String>,
}

impl SshClient {
    pub fn new(host: impl Into<String>, port: u16, host_key_fingerprint: Option<String>) -> Self {
        SshClient {
            host: host.into(),
            port,
            host_key_fingerprint,
        }
    }

    /// `SHA256:<base64>` fingerprint, as printed by `ssh-keygen -l`.
    pub fn fingerprint(key: &PublicKey) -> String {
        key.fingerprint(HashAlg::Sha256).to_string()
    }
}

impl russh::client::Handler for SshClient {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, anyhow::Error> {
        let expected = match &self.host_key_fingerprint {
            Some(expected) => expected,
            None => return Ok(true),
        };

        let fingerprint = Self::fingerprint(server_public_key);
        if fingerprint == *expected {
            tracing::debug!("host key verified for {}:{}", self.host, self.port);
            return Ok(true);
        }

        tracing::warn!("host key mismatch for {}:{}, expected {} but got {}", self.host, self.port, expected, fingerprint);
        Ok(false)
    }
}
