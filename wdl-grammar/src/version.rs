//! Representation of supported WDL language versions.

use std::fmt;
use std::str::FromStr;

/// Represents a supported WDL language version.
// NOTE: it is expected that this enumeration is in increasing order of WDL versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportedVersion {
    /// The document is a `draft-2` document.
    ///
    /// Documents without a `version` directive are `draft-2` documents.
    Draft2,
    /// The document version is 1.0.
    V1,
    /// The document version is 2.0 (also known as `development`).
    V2,
}

impl SupportedVersion {
    /// Determines if the version has explicit `input` sections.
    ///
    /// In `draft-2` documents, task and workflow inputs are section-less
    /// declarations.
    pub fn has_input_section(&self) -> bool {
        *self >= Self::V1
    }

    /// Determines if the version supports `~{}` placeholders.
    pub fn has_tilde_placeholders(&self) -> bool {
        *self >= Self::V1
    }

    /// Determines if the version supports `${}` placeholders.
    pub fn has_dollar_placeholders(&self) -> bool {
        *self <= Self::V1
    }
}

impl fmt::Display for SupportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft2 => write!(f, "draft-2"),
            Self::V1 => write!(f, "1.0"),
            Self::V2 => write!(f, "development"),
        }
    }
}

impl FromStr for SupportedVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft-2" => Ok(Self::Draft2),
            "1.0" => Ok(Self::V1),
            "2.0" | "development" => Ok(Self::V2),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::SupportedVersion;

    #[test]
    fn versions_are_ordered() {
        assert!(SupportedVersion::Draft2 < SupportedVersion::V1);
        assert!(SupportedVersion::V1 < SupportedVersion::V2);
    }

    #[test]
    fn development_is_an_alias_for_two() {
        assert_eq!(
            SupportedVersion::from_str("development"),
            Ok(SupportedVersion::V2)
        );
        assert_eq!(SupportedVersion::from_str("2.0"), Ok(SupportedVersion::V2));
        assert!(SupportedVersion::from_str("1.3").is_err());
    }
}
