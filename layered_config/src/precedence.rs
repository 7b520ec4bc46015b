//! Explicit precedence table over configuration layers.

use crate::{ConfigError, ConfigResult, Location};

/// Ordered list of distinct locations, highest precedence first.
///
/// The table is data handed to [`crate::ConfigStack`]; it never changes once
/// a stack is built, so every resolution in a run agrees on the order.
///
/// # Examples
///
/// ```
/// use layered_config::{Location, Precedence};
///
/// let standard = Precedence::standard();
/// assert!(standard.outranks(Location::Cli, Location::Env));
/// assert!(standard.outranks(Location::Project, Location::User));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Precedence {
    order: Vec<Location>,
}

impl Precedence {
    /// `cli > env > project > user > global > builtin > default`.
    pub const STANDARD_ORDER: [Location; 7] = [
        Location::Cli,
        Location::Env,
        Location::Project,
        Location::User,
        Location::Global,
        Location::Builtin,
        Location::Default,
    ];

    /// The standard package-manager ordering, see [`Self::STANDARD_ORDER`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            order: Self::STANDARD_ORDER.to_vec(),
        }
    }

    /// Build a table from locations listed highest precedence first.
    ///
    /// Locations left out are unranked; a stack refuses layers for them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateLocation`] when a location is listed
    /// more than once.
    pub fn new(order: impl IntoIterator<Item = Location>) -> ConfigResult<Self> {
        let mut seen = Vec::new();
        for location in order {
            if seen.contains(&location) {
                return Err(ConfigError::DuplicateLocation { location });
            }
            seen.push(location);
        }
        Ok(Self { order: seen })
    }

    /// Rank of `location`; `0` is the highest precedence.
    #[must_use]
    pub fn rank(&self, location: Location) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == location)
    }

    /// Returns `true` when `location` is ranked.
    #[must_use]
    pub fn ranks(&self, location: Location) -> bool {
        self.rank(location).is_some()
    }

    /// Returns `true` when `higher` wins over `lower`.
    ///
    /// Unranked locations never win.
    #[must_use]
    pub fn outranks(&self, higher: Location, lower: Location) -> bool {
        match (self.rank(higher), self.rank(lower)) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Locations from highest to lowest precedence.
    pub fn highest_first(&self) -> impl DoubleEndedIterator<Item = Location> + '_ {
        self.order.iter().copied()
    }

    /// Locations from lowest to highest precedence.
    pub fn lowest_first(&self) -> impl Iterator<Item = Location> + '_ {
        self.highest_first().rev()
    }
}

impl Default for Precedence {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Precedence;
    use crate::{ConfigError, Location};

    #[test]
    fn standard_order_is_documented_order() {
        let order: Vec<_> = Precedence::standard().highest_first().collect();
        assert_eq!(order, Precedence::STANDARD_ORDER.to_vec());
    }

    #[rstest]
    #[case(Location::Cli, Location::Env)]
    #[case(Location::Env, Location::Project)]
    #[case(Location::Project, Location::User)]
    #[case(Location::User, Location::Global)]
    #[case(Location::Global, Location::Builtin)]
    #[case(Location::Builtin, Location::Default)]
    fn standard_pairs(#[case] higher: Location, #[case] lower: Location) {
        let table = Precedence::standard();
        assert!(table.outranks(higher, lower));
        assert!(!table.outranks(lower, higher));
    }

    #[test]
    fn custom_tables_drop_unlisted_locations() {
        let table = Precedence::new([Location::Project, Location::Cli]).expect("valid table");
        assert_eq!(table.rank(Location::Project), Some(0));
        assert!(table.outranks(Location::Project, Location::Cli));
        assert!(!table.ranks(Location::Env));
        assert!(!table.outranks(Location::Env, Location::Cli));
        assert_eq!(
            table.lowest_first().collect::<Vec<_>>(),
            vec![Location::Cli, Location::Project]
        );
    }

    #[test]
    fn duplicate_locations_are_rejected() {
        let err = Precedence::new([Location::Cli, Location::Env, Location::Cli])
            .expect_err("duplicate location");
        assert!(matches!(
            err,
            ConfigError::DuplicateLocation {
                location: Location::Cli
            }
        ));
    }
}
