use clap::{Parser, ValueEnum};
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDRESS: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

#[derive(Debug, Parser)]
pub struct Args {
    /// Listen address, either `:8080`, `8080` or `127.0.0.1:8080`.
    #[arg(long, env = "PORT")]
    pub port: Option<String>,
    #[arg(long)]
    #[arg(default_value_t = 3)]
    pub read_timeout_secs: u64,
    #[arg(long)]
    #[arg(default_value_t = 3)]
    pub write_timeout_secs: u64,
    /// Upper bound for the outbound image download. Unbounded when not set.
    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,
    #[arg(long)]
    #[arg(default_value_t = 20 * 1024 * 1024)]
    pub max_image_bytes: u64,
    #[arg(long)]
    #[arg(default_value_t = 10_000)]
    pub max_image_dimension: u32,
    #[arg(long, value_enum)]
    #[arg(default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
}

impl Args {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Resolves `PORT`, falling back to [`DEFAULT_LISTEN_ADDRESS`] when it isn't set.
    pub fn listen_address(&self) -> Result<SocketAddr, AddrParseError> {
        match self.port.as_deref().map(str::trim) {
            None | Some("") => {
                tracing::error!(
                    default = %DEFAULT_LISTEN_ADDRESS,
                    "The `PORT` environment variable isn't set. Falling back to the default address."
                );
                Ok(DEFAULT_LISTEN_ADDRESS)
            }
            Some(port) => parse_listen_address(port),
        }
    }
}

pub fn parse_listen_address(value: &str) -> Result<SocketAddr, AddrParseError> {
    if let Some(port) = value.strip_prefix(':') {
        return format!("{}:{}", Ipv4Addr::UNSPECIFIED, port).parse();
    }
    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        return format!("{}:{}", Ipv4Addr::UNSPECIFIED, value).parse();
    }
    value.parse()
}
