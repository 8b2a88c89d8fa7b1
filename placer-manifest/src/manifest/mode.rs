//! Generation modes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What kind of Go package is being planned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Type declarations only.
    Model,
    /// Types plus server-side request models.
    Fiber,
    /// A full client SDK.
    #[default]
    Client,
}

impl Mode {
    /// Returns the mode identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Model => "model",
            Mode::Fiber => "fiber",
            Mode::Client => "client",
        }
    }

    /// Returns true if in-lined request shapes are planned.
    pub fn places_requests(&self) -> bool {
        !matches!(self, Mode::Model)
    }

    /// Returns true if errors, clients and singleton helpers are planned.
    pub fn places_client(&self) -> bool {
        matches!(self, Mode::Client)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" => Ok(Mode::Model),
            "fiber" => Ok(Mode::Fiber),
            "client" => Ok(Mode::Client),
            _ => Err(format!(
                "unknown mode '{}', expected 'model', 'fiber' or 'client'",
                s
            )),
        }
    }
}
