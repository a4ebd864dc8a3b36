//! HTTP listener settings.

use clap::Args;

#[derive(Debug, Args)]
pub struct HttpConfig {
    /// Address the listener binds to
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the listener binds to
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698)]
    pub port: u16,
}

impl HttpConfig {
    /// `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
