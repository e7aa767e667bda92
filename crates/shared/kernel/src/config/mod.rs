use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "ATELIER_CONFIG";
/// Prefix of environment overrides (`ATELIER__DATABASE__URL` → `database.url`).
pub const ENV_PREFIX: &str = "ATELIER";
const DEFAULT_CONFIG_PATH: &str = "server";

#[atelier_derive::atelier_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file overlaid by `ATELIER__`-prefixed environment variables.
///
/// The file is `path` when given (and then must exist), otherwise the value of
/// `ATELIER_CONFIG`, otherwise an optional `server.{toml,json,yaml}` in the working
/// directory. Missing keys fall back to the `Default` of the target type when it is
/// marked `#[serde(default)]`.
///
/// # Errors
/// Fails when an explicitly requested file is missing, or when a value cannot be
/// deserialized into `T`.
///
/// # Example
/// ```rust
/// use atelier_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let explicit = path
        .map(|p| p.as_ref().to_path_buf())
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let required = explicit.is_some();
    let effective_path = explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    info!(path = %effective_path.display(), required, "Loading configuration");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
