//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance:
//! color and emoji support based on terminal capabilities and user
//! preferences, and the quiet switch.
//!
//! There is no process-wide verbosity toggle. Commands receive an
//! [`OutputConfig`] and ask it whether to print.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `--quiet` - Suppresses progress and informational output
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repohome::output::{OutputConfig, emoji};
//!
//! let out = OutputConfig::from_env_and_flag("auto", false);
//! out.status(format_args!("{} Cloning...", emoji(&out, "📥", "[CLONE]")));
//! ```

use std::env;
use std::fmt;

/// Output configuration for controlling colors, emojis and chattiness.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
    /// Whether informational output is suppressed.
    pub quiet: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flags.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    /// * `quiet` - The value of the --quiet CLI flag
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str, quiet: bool) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color, quiet }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Print an informational line to stdout unless quiet.
    pub fn status(&self, message: fmt::Arguments<'_>) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Style `text` as a success marker when colors are on.
    pub fn green(&self, text: &str) -> String {
        if self.use_color {
            console::style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style `text` as a failure marker when colors are on.
    pub fn red(&self, text: &str) -> String {
        if self.use_color {
            console::style(text).red().to_string()
        } else {
            text.to_string()
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self {
            use_color: true,
            quiet: false,
        }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self {
            use_color: false,
            quiet: false,
        }
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
