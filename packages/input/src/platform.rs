//! Platform capability flags and edit permission.

use serde::{Deserialize, Serialize};

/// Host platform family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Generic,
    /// Gecko-based hosts deliver their own Enter key event for a lone
    /// line break typed into the surface
    Gecko,
}

impl Platform {
    pub fn quirks(&self) -> PlatformQuirks {
        match self {
            Platform::Generic => PlatformQuirks::default(),
            Platform::Gecko => PlatformQuirks {
                duplicate_enter_key_event: true,
            },
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Platform::Generic),
            "gecko" | "firefox" => Ok(Platform::Gecko),
            other => Err(format!("Unknown platform: {}. Use: generic or gecko", other)),
        }
    }
}

/// Behavior differences the encoder has to work around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformQuirks {
    /// The platform already sends an Enter key event when a single line
    /// break is typed, so the encoder must not send another
    #[serde(default)]
    pub duplicate_enter_key_event: bool,
}

/// What the current user may do with the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    #[default]
    Edit,
    View,
}

impl Permission {
    pub fn can_edit(&self) -> bool {
        matches!(self, Permission::Edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_quirks() {
        assert!(!Platform::Generic.quirks().duplicate_enter_key_event);
        assert!(Platform::Gecko.quirks().duplicate_enter_key_event);
    }

    #[test]
    fn test_parse_platform() {
        assert_eq!("Gecko".parse::<Platform>(), Ok(Platform::Gecko));
        assert_eq!("firefox".parse::<Platform>(), Ok(Platform::Gecko));
        assert_eq!("generic".parse::<Platform>(), Ok(Platform::Generic));
        assert!("webkit".parse::<Platform>().is_err());
    }
}
