//! User-facing strings emitted by the field-value resolver.
//!
//! The tracker UI this client feeds is bilingual, so the handful of strings
//! the resolver can emit (the unknown-value placeholder and the date
//! patterns) live here, selected once per process from `QUARRY_LANG`.
//! Anything outside `en`/`fr` falls back to English.

use std::sync::OnceLock;

/// Message language for resolver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    /// Parse a `QUARRY_LANG` value. Matches the primary subtag only, so
    /// `fr_FR.UTF-8` selects French.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let primary = raw
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if primary == "fr" { Self::Fr } else { Self::En }
    }

    fn from_env() -> Self {
        std::env::var("QUARRY_LANG")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Placeholder shown when a select value has no matching option.
    #[must_use]
    pub const fn unknown_value(self) -> &'static str {
        match self {
            Self::En => "Unknown value",
            Self::Fr => "Valeur inconnue",
        }
    }

    /// `chrono` pattern for day-precision dates (close dates, date fields).
    #[must_use]
    pub const fn day_pattern(self) -> &'static str {
        match self {
            Self::En => "%Y-%m-%d",
            Self::Fr => "%d/%m/%Y",
        }
    }

    /// `chrono` pattern for minute-precision timestamps (open dates).
    #[must_use]
    pub const fn minute_pattern(self) -> &'static str {
        match self {
            Self::En => "%Y-%m-%d %H:%M",
            Self::Fr => "%d/%m/%Y %H:%M",
        }
    }
}

static LANG: OnceLock<Lang> = OnceLock::new();

/// The process-wide message language, read from `QUARRY_LANG` on first use.
#[must_use]
pub fn lang() -> Lang {
    *LANG.get_or_init(Lang::from_env)
}

/// Process-wide unknown-value placeholder.
#[must_use]
pub fn unknown_value() -> &'static str {
    lang().unknown_value()
}

/// Process-wide day-precision date pattern.
#[must_use]
pub fn day_pattern() -> &'static str {
    lang().day_pattern()
}

/// Process-wide minute-precision timestamp pattern.
#[must_use]
pub fn minute_pattern() -> &'static str {
    lang().minute_pattern()
}
