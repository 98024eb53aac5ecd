//! Office compatibility versions understood by the validator.

use serde::{Deserialize, Serialize};

/// A named validation profile corresponding to an Office release.
///
/// Versions are ordered: a later version understands every namespace an
/// earlier one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileFormatVersion {
    /// Office 2007 (ECMA-376 1st edition markup)
    Office2007,
    /// Office 2010
    Office2010,
    /// Office 2013
    Office2013,
    /// Office 2016
    Office2016,
    /// Office 2019
    Office2019,
}

impl FileFormatVersion {
    /// Every supported version, oldest first. Request indices refer to
    /// positions in this list.
    pub const ALL: [FileFormatVersion; 5] = [
        FileFormatVersion::Office2007,
        FileFormatVersion::Office2010,
        FileFormatVersion::Office2013,
        FileFormatVersion::Office2016,
        FileFormatVersion::Office2019,
    ];

    /// Highest valid request index.
    pub const MAX_INDEX: i64 = (Self::ALL.len() - 1) as i64;

    /// The newest supported version.
    pub const fn newest() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Look up a version by its request index.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Position of this version in [`FileFormatVersion::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Release year.
    pub fn year(self) -> u16 {
        match self {
            FileFormatVersion::Office2007 => 2007,
            FileFormatVersion::Office2010 => 2010,
            FileFormatVersion::Office2013 => 2013,
            FileFormatVersion::Office2016 => 2016,
            FileFormatVersion::Office2019 => 2019,
        }
    }

    /// Human-readable name, e.g. `Office 2013`.
    pub fn name(self) -> String {
        format!("Office {}", self.year())
    }

    /// Whether markup introduced in `other` is understood by this version.
    pub fn includes(self, other: FileFormatVersion) -> bool {
        self >= other
    }

    /// Pick the version for a parsed request index.
    ///
    /// Only indices strictly greater than zero select a version explicitly;
    /// anything else, including `0`, falls back to the newest version.
    pub fn select(parsed: Option<i64>) -> Self {
        match parsed {
            Some(n) if n > 0 && n <= Self::MAX_INDEX => Self::from_index(n).unwrap_or(Self::newest()),
            _ => Self::newest(),
        }
    }

    /// `0 = Office 2007, 1 = Office 2010, ...` for error messages and help text.
    pub fn mapping_description() -> String {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{} = {}", i, v.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FileFormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
