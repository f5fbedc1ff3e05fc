//! Cardinality bounds.

use std::fmt;

use serde::Serialize;

/// A `(lower, upper)` bound on the number of values a property may hold on
/// a class. `upper == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cardinality {
    /// Minimum number of values.
    pub lower: u32,
    /// Maximum number of values, or `None` for unbounded.
    pub upper: Option<u32>,
}

impl Cardinality {
    /// `0..*`, the open-world default.
    pub const UNBOUNDED: Cardinality = Cardinality {
        lower: 0,
        upper: None,
    };

    /// Creates a bound pair.
    #[must_use]
    pub fn new(lower: u32, upper: Option<u32>) -> Self {
        Self { lower, upper }
    }

    /// Returns true if the lower bound is exactly one.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.lower == 1
    }

    /// Returns true if at most one value is allowed.
    #[must_use]
    pub fn is_single_valued(&self) -> bool {
        self.upper == Some(1)
    }

    /// Returns true if `count` values satisfy both bounds.
    #[must_use]
    pub fn admits(&self, count: usize) -> bool {
        let above_lower = count >= self.lower as usize;
        let below_upper = self.upper.map_or(true, |upper| count <= upper as usize);
        above_lower && below_upper
    }

    /// Returns true if `count` values stay within the upper bound.
    #[must_use]
    pub fn within_upper(&self, count: usize) -> bool {
        self.upper.map_or(true, |upper| count <= upper as usize)
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Formats as UML multiplicity, e.g. `0..*` or `1..1`.
impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}..{}", self.lower, upper),
            None => write!(f, "{}..*", self.lower),
        }
    }
}
