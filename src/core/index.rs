use std::fmt;

/// Zero-based position in a displayed list, built from the one-based value users type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for zero, which has no zero-based counterpart.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based.checked_sub(1).map(Self)
    }

    pub const fn from_zero_based(zero_based: usize) -> Self {
        Self(zero_based)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_zero_is_rejected() {
        assert_eq!(Index::from_one_based(0), None);
        assert_eq!(Index::from_one_based(3).map(Index::zero_based), Some(2));
    }
}
