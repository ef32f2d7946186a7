mod detect;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use detect::{detect_system_appearance, SystemAppearance};

/// OS-wide light/dark display setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Dark,
    Light,
}

impl Appearance {
    pub fn label(&self) -> &'static str {
        match self {
            Appearance::Dark => "dark",
            Appearance::Light => "light",
        }
    }

    pub fn all() -> &'static [Appearance] {
        &[Appearance::Dark, Appearance::Light]
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Appearance::Dark),
            "light" => Ok(Appearance::Light),
            other => Err(format!("unknown appearance: {other}")),
        }
    }
}

/// Anything that can report the current appearance.
///
/// Queried fresh on every evaluation; notifications carry no payload.
pub trait AppearanceSource: Send + Sync {
    fn current(&self) -> Appearance;
}

impl<T: AppearanceSource + ?Sized> AppearanceSource for Arc<T> {
    fn current(&self) -> Appearance {
        (**self).current()
    }
}
