#![forbid(unsafe_code)]

//! Detection of ANSI color support.
//!
//! Detection is based on environment variables only:
//! - `NO_COLOR`: de-facto standard for disabling color
//! - `TERM=dumb` (or an empty `TERM` outside Windows): no escape sequences
//! - on Windows, whether the console accepts virtual terminal sequences
//!
//! When in doubt, color is off: a missing color is harmless, stray escape
//! bytes corrupt the output.

use std::env;

#[derive(Debug, Clone, Default)]
struct DetectInputs {
    no_color: bool,
    term: String,
    windows_ansi: Option<bool>,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            no_color: env::var_os("NO_COLOR").is_some(),
            term: env::var("TERM").unwrap_or_default(),
            windows_ansi: windows_ansi_support(),
        }
    }
}

#[cfg(windows)]
fn windows_ansi_support() -> Option<bool> {
    Some(crossterm::ansi_support::supports_ansi())
}

#[cfg(not(windows))]
fn windows_ansi_support() -> Option<bool> {
    None
}

/// Whether SGR color sequences may be written to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_inputs(&DetectInputs::from_env())
    }

    fn from_inputs(inputs: &DetectInputs) -> Self {
        let enabled = if inputs.no_color || inputs.term == "dumb" {
            false
        } else {
            match inputs.windows_ansi {
                Some(supported) => supported,
                None => !inputs.term.is_empty(),
            }
        };
        Self { enabled }
    }

    /// Support forced on or off.
    #[must_use]
    pub const fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// True if color sequences should be emitted.
    #[must_use]
    pub const fn enabled(self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(term: &str) -> DetectInputs {
        DetectInputs {
            term: term.to_string(),
            ..DetectInputs::default()
        }
    }

    #[test]
    fn xterm_has_color() {
        assert!(ColorSupport::from_inputs(&inputs("xterm-256color")).enabled());
    }

    #[test]
    fn no_color_wins() {
        let mut env = inputs("xterm-256color");
        env.no_color = true;
        assert!(!ColorSupport::from_inputs(&env).enabled());
    }

    #[test]
    fn dumb_and_missing_term_disable_color() {
        assert!(!ColorSupport::from_inputs(&inputs("dumb")).enabled());
        assert!(!ColorSupport::from_inputs(&inputs("")).enabled());
    }

    #[test]
    fn windows_console_decides_when_known() {
        let mut env = inputs("");
        env.windows_ansi = Some(true);
        assert!(ColorSupport::from_inputs(&env).enabled());
        env.windows_ansi = Some(false);
        env.term = "xterm".into();
        assert!(!ColorSupport::from_inputs(&env).enabled());
    }

    #[test]
    fn fixed_support_is_stable() {
        assert!(ColorSupport::fixed(true).enabled());
        assert!(!ColorSupport::fixed(false).enabled());
    }
}
