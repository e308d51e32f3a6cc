pub struct HttpServerConfig {
    pub ip: String,
    pub port: u16,
}

impl HttpServerConfig {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        HttpServerConfig {
            ip: ip.into(),
            port,
        }
    }

    pub fn host(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
