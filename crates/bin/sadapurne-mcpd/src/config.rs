use clap::{Parser, builder::BoolishValueParser};
use sadapurne_core::store::PostgrestConfig;
use std::error::Error;
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "sadapurne-mcpd", version, about = "Sadapurne verified producer daemon.")]
struct CliArgs {
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    supabase_anon_key: Option<String>,

    #[arg(
        long = "stdio",
        env = "SADAPURNE_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "SADAPURNE_API_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    api_serve: bool,

    #[arg(
        long,
        env = "SADAPURNE_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, env = "SADAPURNE_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "SADAPURNE_QUERY_TIMEOUT_SECS",
        default_value_t = DEFAULT_QUERY_TIMEOUT_SECS
    )]
    query_timeout_secs: u64,

    #[arg(
        long,
        env = "SADAPURNE_API_MAX_BODY_BYTES",
        default_value_t = DEFAULT_API_MAX_BODY_BYTES
    )]
    api_max_body_bytes: usize,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct SadapurneConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub enable_stdio: bool,
    pub api_serve: bool,
    pub mcp_serve: bool,
    pub api_addr: SocketAddr,
    pub mcp_http_addr: SocketAddr,
    pub query_timeout: Duration,
    pub api_max_body_bytes: usize,
}

impl fmt::Debug for SadapurneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SadapurneConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"<redacted>")
            .field("enable_stdio", &self.enable_stdio)
            .field("api_serve", &self.api_serve)
            .field("mcp_serve", &self.mcp_serve)
            .field("api_addr", &self.api_addr)
            .field("mcp_http_addr", &self.mcp_http_addr)
            .field("query_timeout", &self.query_timeout)
            .field("api_max_body_bytes", &self.api_max_body_bytes)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
    NothingToServe,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NothingToServe => write!(
                f,
                "no server enabled; set SADAPURNE_API_SERVE, SADAPURNE_MCP_SERVE or SADAPURNE_ENABLE_STDIO"
            ),
        }
    }
}

impl Error for ConfigError {}

impl SadapurneConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Connection settings for the `PostgREST` source.
    pub fn postgrest(&self) -> PostgrestConfig {
        PostgrestConfig::new(&self.supabase_url, &self.supabase_anon_key)
            .with_timeout(self.query_timeout)
    }
}

impl TryFrom<CliArgs> for SadapurneConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let supabase_url = args
            .supabase_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting("SUPABASE_URL"))?;
        let supabase_anon_key = args
            .supabase_anon_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting("SUPABASE_ANON_KEY"))?;

        if !(supabase_url.starts_with("http://") || supabase_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: "SUPABASE_URL",
                value: supabase_url,
            });
        }

        if args.query_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "SADAPURNE_QUERY_TIMEOUT_SECS",
                value: args.query_timeout_secs.to_string(),
            });
        }

        if !(args.api_serve || args.mcp_serve || args.enable_stdio) {
            return Err(ConfigError::NothingToServe);
        }

        let api_addr = resolve_api_addr(&args.host, args.port)?;

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            enable_stdio: args.enable_stdio,
            api_serve: args.api_serve,
            mcp_serve: args.mcp_serve,
            api_addr,
            mcp_http_addr: args.mcp_http_addr,
            query_timeout: Duration::from_secs(args.query_timeout_secs),
            api_max_body_bytes: args.api_max_body_bytes,
        })
    }
}

fn resolve_api_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let invalid = || ConfigError::InvalidSetting {
        name: "HOST",
        value: host.to_string(),
    };
    let host = host.trim();
    if host.is_empty() {
        return Err(invalid());
    }
    (host, port)
        .to_socket_addrs()
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)
}
