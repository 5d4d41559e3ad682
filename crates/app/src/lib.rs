//! Agent Store token tool composition root
//!
//! Wires configuration, storage selection and the auth gate into the
//! `agentstore-token` commands.

use std::path::PathBuf;

use agentstore_auth::{
    decode_payload, AuthConfig, AuthGate, FileStorage, GateDecision, NullStorage, TokenStorage,
};
use agentstore_common::Config;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "agentstore-token", version, about = "Manage the stored Agent Store bearer token")]
pub struct Cli {
    /// Token storage file (overrides AGENT_STORE_TOKEN_FILE)
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the stored token
    Get,

    /// Store a token, replacing any previous one
    Set {
        /// Token to store verbatim
        token: String,
    },

    /// Remove the stored token
    Remove,

    /// Print the decoded claims of a token (the stored one when omitted)
    Inspect {
        token: Option<String>,
    },

    /// Report whether an authenticated view would be shown
    Status,
}

/// What a command produced and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: Option<String>,
    pub success: bool,
}

impl Report {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            success: true,
        }
    }

    fn silent() -> Self {
        Self {
            output: None,
            success: true,
        }
    }

    fn failed(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            success: false,
        }
    }
}

/// Build the auth gate described by `config`.
///
/// Without a token file there is no persistent storage, so every command
/// behaves as if nothing were stored.
pub fn create_gate(config: &Config) -> AuthGate<Box<dyn TokenStorage>> {
    let storage: Box<dyn TokenStorage> = match &config.token_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using file-backed token storage");
            Box::new(FileStorage::new(path.clone()))
        }
        None => {
            tracing::debug!("No token file configured, storage unavailable");
            Box::new(NullStorage)
        }
    };

    AuthGate::new(storage, AuthConfig::from(config))
}

/// Run one command against `gate`
pub fn execute<S: TokenStorage>(gate: &AuthGate<S>, command: Command) -> anyhow::Result<Report> {
    let store = gate.store();

    let report = match command {
        Command::Get => match store.get_token() {
            Some(token) => Report::ok(token),
            None => Report {
                output: None,
                success: false,
            },
        },

        Command::Set { token } => match store.try_set_token(&token) {
            Ok(()) => Report::silent(),
            Err(e) => storage_failure("failed to store token", e.into()),
        },

        Command::Remove => match store.try_remove_token() {
            Ok(()) => Report::silent(),
            Err(e) => storage_failure("failed to remove token", e.into()),
        },

        Command::Inspect { token } => {
            let Some(token) = token.or_else(|| store.get_token()) else {
                return Ok(Report::failed("no token stored"));
            };

            match decode_payload(&token) {
                Ok(claims) => Report::ok(serde_json::to_string_pretty(&claims)?),
                Err(e) => Report::failed(format!("token does not decode: {}", e)),
            }
        }

        Command::Status => match gate.check() {
            GateDecision::Authenticated(claims) => {
                let subject = claims.subject().unwrap_or("unknown");
                let expires = claims
                    .expires_at()
                    .map(format_datetime)
                    .unwrap_or_else(|| "never".to_string());
                Report::ok(format!("authenticated (sub={}, expires {})", subject, expires))
            }
            GateDecision::RedirectToLogin { reason, login_path } => {
                Report::failed(format!("redirect to {}: {}", login_path, reason))
            }
        },
    };

    Ok(report)
}

fn storage_failure(context: &str, err: agentstore_common::Error) -> Report {
    tracing::debug!(error = %err, code = err.error_code(), "{}", context);
    Report::failed(format!("{}: [{}] {}", context, err.error_code(), err))
}

fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
