use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Direction
///
/// Canonical sort direction shared by sort configuration, comparator
/// dispatch, and the view composer.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::Direction;
    use std::cmp::Ordering;

    #[test]
    fn asc_preserves_ordering() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Asc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn desc_reverses_ordering() {
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }
}
