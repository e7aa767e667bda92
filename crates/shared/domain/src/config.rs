use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationsConfig,
    pub storefront: StorefrontConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
    /// Seconds granted to in-flight requests on shutdown.
    pub shutdown_grace_seconds: u64,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Tokio runtime sizing. `worker_threads = None` uses the available parallelism.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub worker_threads: Option<usize>,
    pub thread_name: String,
    pub stack_size: usize,
}

/// Log output. `directory` enables rolling files next to the console output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `compact`, `pretty` or `json`.
    pub format: String,
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub max_files: usize,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (not needed for unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Optional API security knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub identity: IdentityConfig,
}

/// Bearer-token verification settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: Option<String>,
    pub ttl_seconds: u64,
    pub clock_skew_seconds: u64,
}

/// Outbound notification channels.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Mailbox receiving new inquiry alerts.
    pub admin_email: Option<String>,
    /// Phone receiving new inquiry alerts.
    pub admin_phone: Option<String>,
    pub sms: SmsConfig,
    pub mail: MailConfig,
}

/// Twilio-compatible SMS provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    /// When disabled, messages are only written to the log.
    pub enabled: bool,
    pub api_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub timeout_seconds: u64,
    pub max_body_chars: usize,
    pub max_bulk_recipients: usize,
    pub rate_limit: RateLimitConfig,
}

/// Fixed-window limit applied per recipient.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_messages: u32,
    pub window_seconds: u64,
    /// Upper bound of tracked recipients.
    pub capacity: u64,
}

/// Transactional mail API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// When disabled, messages are only written to the log.
    pub enabled: bool,
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout_seconds: u64,
}

/// Public-facing storefront identity used in outgoing messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub name: String,
    pub base_url: String,
    pub currency: String,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5080,
            ssl: None,
            shutdown_grace_seconds: 30,
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { worker_threads: None, thread_name: "atelier-worker".to_owned(), stack_size: 3 << 20 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            filter: None,
            directory: None,
            max_files: 10,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "atelier".to_owned(),
            database: "storefront".to_owned(),
            credentials: None,
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "dev-only-change-me".to_owned(),
            issuer: "atelier".to_owned(),
            audience: None,
            ttl_seconds: 3600,
            clock_skew_seconds: 60,
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: "https://api.twilio.com".to_owned(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            timeout_seconds: 10,
            max_body_chars: 1600,
            max_bulk_recipients: 100,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_messages: 5, window_seconds: 3600, capacity: 50_000 }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: "https://api.resend.com".to_owned(),
            api_key: String::new(),
            from: "Atelier Concierge <concierge@atelier.example>".to_owned(),
            timeout_seconds: 10,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            name: "Atelier".to_owned(),
            base_url: "https://atelier.example".to_owned(),
            currency: "USD".to_owned(),
        }
    }
}
