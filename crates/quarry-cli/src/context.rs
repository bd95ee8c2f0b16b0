//! Connection and scope resolution for CLI commands.
//!
//! The resolution chain per setting: command-line flag > environment >
//! `~/.config/quarry/config.toml`. Passwords never come from the config
//! file; `--password` or `QUARRY_PASSWORD` are the only sources. Read
//! commands need a connection; artifact commands also need a group and
//! tracker scope.

use std::fmt;

use quarry_client::config::UserConfig;
use quarry_client::{ClientError, HttpBinding, TrackerClient};

use crate::output::{CliError, OutputMode, render_error};

/// Errors from connection or scope resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError {
    /// Human-readable description.
    pub message: String,
    /// How to fix it.
    pub suggestion: String,
    /// Machine error code.
    pub code: &'static str,
}

impl ContextError {
    fn new(message: impl Into<String>, suggestion: impl Into<String>, code: &'static str) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            code,
        }
    }

    #[must_use]
    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(self.message.clone(), self.suggestion.clone(), self.code)
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ContextError {}

/// Global connection flags as parsed from the command line.
#[derive(Debug, Default)]
pub struct GlobalFlags {
    pub url: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub group: Option<i32>,
    pub tracker: Option<i32>,
}

/// Resolved connection settings for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("login", &self.login)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A fully resolved tracker address: project group plus tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub group_id: i32,
    pub tracker_id: i32,
}

/// Everything a command handler needs besides its own arguments.
#[derive(Debug)]
pub struct CliContext {
    url: Option<String>,
    login: Option<String>,
    password: Option<String>,
    group: Option<i32>,
    tracker: Option<i32>,
    report: Option<i32>,
    pub output: OutputMode,
}

impl CliContext {
    /// Merge flags, environment, and config into one context.
    #[must_use]
    pub fn gather(flags: GlobalFlags, config: &UserConfig, output: OutputMode) -> Self {
        let env_password = std::env::var("QUARRY_PASSWORD").ok();
        Self::gather_with(flags, env_password, config, output)
    }

    /// Core merge logic, separated from the environment for testability.
    fn gather_with(
        flags: GlobalFlags,
        env_password: Option<String>,
        config: &UserConfig,
        output: OutputMode,
    ) -> Self {
        Self {
            url: flags.url.or_else(|| config.url.clone()),
            login: flags.login.or_else(|| config.login.clone()),
            password: flags
                .password
                .or_else(|| env_password.filter(|value| !value.is_empty())),
            group: flags.group.or(config.group),
            tracker: flags.tracker.or(config.tracker),
            report: config.report,
            output,
        }
    }

    /// Resolve the connection settings, or say which one is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] naming the first missing setting.
    pub fn credentials(&self) -> Result<Credentials, ContextError> {
        let url = self.url.clone().ok_or_else(|| {
            ContextError::new(
                "no tracker URL configured",
                "Pass --url or set url in ~/.config/quarry/config.toml",
                "missing_url",
            )
        })?;
        let login = self.login.clone().ok_or_else(|| {
            ContextError::new(
                "no login name configured",
                "Pass --login or set login in ~/.config/quarry/config.toml",
                "missing_login",
            )
        })?;
        let password = self.password.clone().ok_or_else(|| {
            ContextError::new(
                "no password available",
                "Pass --password or set QUARRY_PASSWORD",
                "missing_password",
            )
        })?;
        Ok(Credentials {
            url,
            login,
            password,
        })
    }

    /// The selected project group id.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] when no group is selected.
    pub fn group_id(&self) -> Result<i32, ContextError> {
        self.group.ok_or_else(|| {
            ContextError::new(
                "no project group selected",
                "Pass --group or set group in ~/.config/quarry/config.toml",
                "missing_group",
            )
        })
    }

    /// The selected group and tracker ids.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] when either id is missing.
    pub fn scope(&self) -> Result<Scope, ContextError> {
        let group_id = self.group_id()?;
        let tracker_id = self.tracker.ok_or_else(|| {
            ContextError::new(
                "no tracker selected",
                "Pass --tracker or set tracker in ~/.config/quarry/config.toml",
                "missing_tracker",
            )
        })?;
        Ok(Scope {
            group_id,
            tracker_id,
        })
    }

    /// The default report id from the config file, when one is set.
    #[must_use]
    pub const fn default_report(&self) -> Option<i32> {
        self.report
    }
}

/// Resolve credentials, open a session, run `body`, close the session.
///
/// Sessions are per invocation; there is no token cache. Logout failures
/// are logged and swallowed, the command's own result wins. Resolution and
/// remote failures are rendered to stderr before they propagate, so `--json`
/// consumers see a structured error object.
///
/// # Errors
///
/// Propagates resolution errors, login failures, and `body`'s error.
pub fn run_connected<T>(
    ctx: &CliContext,
    body: impl FnOnce(&TrackerClient) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let credentials = match ctx.credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    let binding = HttpBinding::new(&credentials.url);
    let client = match TrackerClient::login(
        Box::new(binding),
        &credentials.login,
        &credentials.password,
    ) {
        Ok(client) => client,
        Err(err) => {
            render_error(ctx.output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    let result = body(&client);
    if let Err(err) = client.logout() {
        tracing::warn!(error = %err, "logout failed");
    }

    if let Err(ref err) = result {
        if let Some(client_err) = err.downcast_ref::<ClientError>() {
            render_error(ctx.output, &CliError::from(client_err))?;
        }
    }
    result
}
