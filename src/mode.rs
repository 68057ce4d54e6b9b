//! Backend Framework Conventions
//!
//! A [`Mode`] names a bundle of conventions: which interpolation affixes a
//! backend uses and how it represents plural forms. Rails-style files use
//! `%{var}` placeholders and nested plural objects; Laravel-style files use
//! `:var` placeholders and pipe-delimited plural strings.

use serde::{Deserialize, Serialize};

/// Backend framework convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `%{var}` interpolation, key-based nested pluralization
    #[default]
    Rails,
    /// `:var` interpolation, pipe-delimited pluralization
    Laravel,
}

impl Mode {
    /// Parse from a string tag.
    ///
    /// Unrecognized tags fall back to [`Mode::Rails`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "laravel" => Self::Laravel,
            _ => Self::Rails,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rails => "rails",
            Self::Laravel => "laravel",
        }
    }

    /// Default interpolation affixes for this mode.
    pub fn interpolation_options(&self) -> InterpolationOptions {
        match self {
            Self::Rails => InterpolationOptions::rails(),
            Self::Laravel => InterpolationOptions::laravel(),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Placeholder affixes for one interpolation syntax.
///
/// An empty suffix means the placeholder has no closing delimiter and ends at
/// the first character outside the identifier class (Laravel's `:var` style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationOptions {
    /// Text immediately before the variable name
    pub prefix: String,
    /// Text immediately after the variable name (may be empty)
    pub suffix: String,
}

impl InterpolationOptions {
    /// Create options with explicit affixes.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Rails style: `%{name}`
    pub fn rails() -> Self {
        Self::new("%{", "}")
    }

    /// Laravel style: `:name`
    pub fn laravel() -> Self {
        Self::new(":", "")
    }

    /// Render a variable name in this syntax (e.g. `name` -> `%{name}`).
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }
}
