//! Boolean flags for the standard errors.
//!
//! Every standard error has a legacy flag (`unauthorized`) and an explicit one
//! (`unauthorized_401`). Either one turns the error on. The validation error is
//! different: it is documented unless the caller opts out.

use crate::standard::StandardError;
use serde::{Deserialize, Serialize};

/// A boolean flag that remembers whether the caller set it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Flag {
    /// Not given by the caller.
    #[default]
    Unset,
    /// Set to `true`.
    Enabled,
    /// Set to `false`.
    Disabled,
}

impl Flag {
    /// Whether the caller set the flag to `true`.
    pub fn is_enabled(self) -> bool {
        self == Flag::Enabled
    }

    /// Whether the caller set the flag to `false`.
    pub fn is_disabled(self) -> bool {
        self == Flag::Disabled
    }
}

impl From<bool> for Flag {
    fn from(on: bool) -> Self {
        if on { Flag::Enabled } else { Flag::Disabled }
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Flag::Unset, Flag::from)
    }
}

impl From<Flag> for Option<bool> {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Unset => None,
            Flag::Enabled => Some(true),
            Flag::Disabled => Some(false),
        }
    }
}

/// The named flags of an error aggregation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorFlags {
    /// Legacy: include 401.
    pub unauthorized: bool,
    /// Include 401.
    pub unauthorized_401: bool,
    /// Legacy: include 403.
    pub forbidden: bool,
    /// Include 403.
    pub forbidden_403: bool,
    /// Legacy: include or exclude 422 (included when unset).
    pub validation_error: Flag,
    /// Include or exclude 422 (included when unset).
    pub validation_error_422: Flag,
    /// Legacy: include 500.
    pub internal_server_error: bool,
    /// Include 500.
    pub internal_server_error_500: bool,
}

impl ErrorFlags {
    /// All flags unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the legacy 401 flag.
    pub fn unauthorized(mut self, on: bool) -> Self {
        self.unauthorized = on;
        self
    }

    /// Set the explicit 401 flag.
    pub fn unauthorized_401(mut self, on: bool) -> Self {
        self.unauthorized_401 = on;
        self
    }

    /// Set the legacy 403 flag.
    pub fn forbidden(mut self, on: bool) -> Self {
        self.forbidden = on;
        self
    }

    /// Set the explicit 403 flag.
    pub fn forbidden_403(mut self, on: bool) -> Self {
        self.forbidden_403 = on;
        self
    }

    /// Set the legacy 422 flag. Accepts `bool`, `Option<bool>` or [`Flag`].
    pub fn validation_error(mut self, flag: impl Into<Flag>) -> Self {
        self.validation_error = flag.into();
        self
    }

    /// Set the explicit 422 flag. Accepts `bool`, `Option<bool>` or [`Flag`].
    pub fn validation_error_422(mut self, flag: impl Into<Flag>) -> Self {
        self.validation_error_422 = flag.into();
        self
    }

    /// Set the legacy 500 flag.
    pub fn internal_server_error(mut self, on: bool) -> Self {
        self.internal_server_error = on;
        self
    }

    /// Set the explicit 500 flag.
    pub fn internal_server_error_500(mut self, on: bool) -> Self {
        self.internal_server_error_500 = on;
        self
    }

    /// Whether 422 is documented.
    ///
    /// Suppressed only when one flag is disabled and the other is not enabled.
    pub fn includes_validation_error(&self) -> bool {
        let (legacy, explicit) = (self.validation_error, self.validation_error_422);
        let suppressed =
            (legacy.is_disabled() && !explicit.is_enabled()) || (explicit.is_disabled() && !legacy.is_enabled());
        !suppressed
    }

    /// Standard errors turned on by these flags, in status code order.
    pub fn resolve(&self) -> Vec<StandardError> {
        let enabled = StandardError::ALL
            .into_iter()
            .filter(|error| match error {
                StandardError::Unauthorized => self.unauthorized || self.unauthorized_401,
                StandardError::Forbidden => self.forbidden || self.forbidden_403,
                StandardError::ValidationError => self.includes_validation_error(),
                StandardError::InternalServerError => self.internal_server_error || self.internal_server_error_500,
            })
            .collect::<Vec<_>>();
        tracing::trace!(?enabled, "resolved standard error flags");
        enabled
    }
}

#[cfg(feature = "config")]
mod config {
    use super::ErrorFlags;
    use thiserror::Error;

    /// Errors from loading flags out of a config file.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("Invalid error flags: {0}")]
        Toml(#[from] toml::de::Error),
    }

    impl ErrorFlags {
        /// Load flags from TOML, e.g. `unauthorized_401 = true`.
        ///
        /// Unknown keys and non-boolean values are rejected.
        pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
            Ok(toml::from_str(source)?)
        }
    }
}

#[cfg(feature = "config")]
pub use config::ConfigError;
