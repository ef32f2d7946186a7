//! macOS system appearance detection

use std::process::Command;

use super::{Appearance, AppearanceSource};

/// Detect the macOS system appearance.
///
/// `defaults read -g AppleInterfaceStyle` prints `Dark` in dark mode and
/// fails when the key is absent (light mode). Any failure, including running
/// on a non-macOS host, reads as light.
pub fn detect_system_appearance() -> Appearance {
    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|output| {
            if output.status.success() {
                parse_interface_style(&String::from_utf8_lossy(&output.stdout))
            } else {
                Appearance::Light
            }
        })
        .unwrap_or(Appearance::Light)
}

fn parse_interface_style(stdout: &str) -> Appearance {
    if stdout.trim().eq_ignore_ascii_case("dark") {
        Appearance::Dark
    } else {
        Appearance::Light
    }
}

/// Appearance source backed by the macOS user defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAppearance;

impl AppearanceSource for SystemAppearance {
    fn current(&self) -> Appearance {
        detect_system_appearance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_system_appearance() {
        // Only checks that detection never panics
        let _ = detect_system_appearance();
    }

    #[test]
    fn test_parse_interface_style() {
        assert_eq!(parse_interface_style("Dark\n"), Appearance::Dark);
        assert_eq!(parse_interface_style("dark"), Appearance::Dark);
        assert_eq!(parse_interface_style(""), Appearance::Light);
        assert_eq!(parse_interface_style("Light"), Appearance::Light);
    }
}
