//! Named configuration layers.
//!
//! A [`Location`] only identifies a layer. How locations rank against each
//! other is decided by a [`crate::Precedence`] table, never by the order the
//! variants are declared in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One named source of configuration values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Registry defaults loaded as an explicit layer.
    Default,
    /// File shipped alongside the tool installation.
    Builtin,
    /// System-wide configuration file.
    Global,
    /// Per-user configuration file.
    User,
    /// Configuration file at the project root.
    Project,
    /// Prefixed environment variables.
    Env,
    /// Command-line flags.
    Cli,
}

impl Location {
    /// Every location, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::Builtin,
        Self::Global,
        Self::User,
        Self::Project,
        Self::Env,
        Self::Cli,
    ];

    /// Lowercase name used in messages and when parsing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Builtin => "builtin",
            Self::Global => "global",
            Self::User => "user",
            Self::Project => "project",
            Self::Env => "env",
            Self::Cli => "cli",
        }
    }

    /// Returns `true` for layers read from configuration files.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(
            self,
            Self::Builtin | Self::Global | Self::User | Self::Project
        )
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Default => 1,
            Self::Builtin => 1 << 1,
            Self::Global => 1 << 2,
            Self::User => 1 << 3,
            Self::Project => 1 << 4,
            Self::Env => 1 << 5,
            Self::Cli => 1 << 6,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ConfigError;

    /// Parse a lowercase location name.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::Location;
    /// assert_eq!("cli".parse::<Location>().ok(), Some(Location::Cli));
    /// assert!("disk".parse::<Location>().is_err());
    /// ```
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == name)
            .ok_or_else(|| ConfigError::InvalidLocation {
                name: name.to_owned(),
            })
    }
}

/// Compact set of [`Location`]s, used for the layers a key may be set on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct LocationSet(u8);

impl LocationSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every location.
    pub const ALL: Self = Self::of(&Location::ALL);

    /// Build a set from a slice of locations.
    #[must_use]
    pub const fn of(locations: &[Location]) -> Self {
        let mut bits = 0;
        let mut remaining = locations;
        while let [first, rest @ ..] = remaining {
            bits |= first.bit();
            remaining = rest;
        }
        Self(bits)
    }

    /// Returns a copy of the set without `location`.
    #[must_use]
    pub const fn without(self, location: Location) -> Self {
        Self(self.0 & !location.bit())
    }

    /// Returns a copy of the set including `location`.
    #[must_use]
    pub const fn with(self, location: Location) -> Self {
        Self(self.0 | location.bit())
    }

    /// Returns `true` when `location` is a member.
    #[must_use]
    pub const fn contains(self, location: Location) -> bool {
        self.0 & location.bit() != 0
    }

    /// Returns `true` when no location is a member.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Location> {
        Location::ALL
            .into_iter()
            .filter(move |location| self.contains(*location))
    }
}

impl FromIterator<Location> for LocationSet {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
