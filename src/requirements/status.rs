//! Requirement status types.

use std::fmt;

/// Where a requirement is installed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Apt,
    Npm,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Apt => write!(f, "apt"),
            Source::Npm => write!(f, "npm"),
        }
    }
}

/// The result of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementStatus {
    /// Installed and current (or currency was not checked).
    Satisfied { version: String },

    /// Installed, but a newer version is available.
    Outdated { installed: String, latest: String },

    /// Not installed. `latest` is known for npm packages.
    Missing { latest: Option<String> },
}

impl RequirementStatus {
    /// Status from an installed version and the latest available one.
    pub fn compare(installed: Option<String>, latest: Option<String>) -> Self {
        match (installed, latest) {
            (None, latest) => RequirementStatus::Missing { latest },
            (Some(installed), Some(latest)) if installed != latest => {
                RequirementStatus::Outdated { installed, latest }
            }
            (Some(version), _) => RequirementStatus::Satisfied { version },
        }
    }

    /// Check if this status is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, RequirementStatus::Missing { .. })
    }

    /// The installed version, if any.
    pub fn installed_version(&self) -> Option<&str> {
        match self {
            RequirementStatus::Satisfied { version } => Some(version),
            RequirementStatus::Outdated { installed, .. } => Some(installed),
            RequirementStatus::Missing { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_detects_missing() {
        let status = RequirementStatus::compare(None, Some("28.1.0".into()));
        assert!(status.is_missing());
        assert_eq!(status.installed_version(), None);
    }

    #[test]
    fn compare_detects_outdated() {
        let status = RequirementStatus::compare(Some("27.0.0".into()), Some("28.1.0".into()));
        assert_eq!(
            status,
            RequirementStatus::Outdated {
                installed: "27.0.0".into(),
                latest: "28.1.0".into()
            }
        );
        assert_eq!(status.installed_version(), Some("27.0.0"));
    }

    #[test]
    fn compare_current_is_satisfied() {
        let status = RequirementStatus::compare(Some("28.1.0".into()), Some("28.1.0".into()));
        assert_eq!(
            status,
            RequirementStatus::Satisfied {
                version: "28.1.0".into()
            }
        );
    }

    #[test]
    fn compare_without_latest_is_satisfied() {
        let status = RequirementStatus::compare(Some("8.5.1".into()), None);
        assert!(!status.is_missing());
    }

    #[test]
    fn source_display() {
        assert_eq!(Source::Apt.to_string(), "apt");
        assert_eq!(Source::Npm.to_string(), "npm");
    }
}
