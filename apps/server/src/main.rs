use anyhow::{Context, Result};
use atelier::domain::config::{ApiConfig, LoggingConfig};
use atelier::domain::roles::Role;
use atelier::kernel::config::load_config;
use atelier_logger::{LevelFilter, LogFormat, Logger};
use atelier_runtime::{RuntimeSettings, build_runtime};
use atelier_server::Server;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "atelier-server", version, about = "Atelier storefront API")]
struct Cli {
    /// Configuration file (defaults to `server.toml` in the working directory).
    #[arg(short, long, global = true, env = "ATELIER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print a signed access token for an operator account.
    IssueToken {
        #[arg(long)]
        subject: String,
        #[arg(long, value_parser = parse_role, default_value = "admin")]
        role: Role,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "staff" => Ok(Role::Staff),
        "customer" => Ok(Role::Customer),
        other => Err(format!("unknown role '{other}', expected admin, staff or customer")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg: ApiConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(cfg, port),
        Command::IssueToken { subject, role } => issue_token(&cfg, subject, role),
    }
}

fn serve(cfg: ApiConfig, port: Option<u16>) -> Result<()> {
    let _log = init_logger(&cfg.logging)?;

    let runtime = build_runtime(&RuntimeSettings::from_parts(
        cfg.runtime.worker_threads,
        cfg.runtime.stack_size,
        &cfg.runtime.thread_name,
    ))?;

    runtime.block_on(async move {
        let mut builder = Server::builder().config(cfg);
        if let Some(port) = port {
            builder = builder.port(port);
        }
        builder.build().await?.run().await
    })
}

fn issue_token(cfg: &ApiConfig, subject: String, role: Role) -> Result<()> {
    let identity = atelier::features::identity::build(cfg).context("Invalid identity settings")?;
    let token = identity.issue(subject, role).context("Failed to sign token")?;
    writeln!(std::io::stdout().lock(), "{token}")?;
    Ok(())
}

fn init_logger(cfg: &LoggingConfig) -> Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.level))?;
    let format: LogFormat = cfg.format.parse()?;

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).format(format).level(level);
    let builder = match &cfg.filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    let logger = match &cfg.directory {
        Some(directory) => builder.path(directory).max_files(cfg.max_files).json_file().init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["atelier-server"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none() || std::env::var_os("ATELIER_CONFIG").is_some());
    }

    #[test]
    fn issue_token_parses_role() {
        let cli = Cli::try_parse_from([
            "atelier-server",
            "issue-token",
            "--subject",
            "ops",
            "--role",
            "Staff",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::IssueToken { ref subject, role: Role::Staff }) if subject == "ops"
        ));

        let err =
            Cli::try_parse_from(["atelier-server", "issue-token", "--subject", "ops", "--role", "owner"]);
        assert!(err.is_err());
    }
}
