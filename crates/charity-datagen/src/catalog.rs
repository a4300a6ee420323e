//! The fixed fund catalog.

use std::fmt;

/// Stable 1-based fund identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FundId(pub u32);

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fund a gift can be allocated to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fund {
    pub id: FundId,
    pub name: &'static str,
    /// Relative popularity. Only ratios between weights matter.
    pub weight: f64,
}

impl Fund {
    pub const fn new(id: u32, name: &'static str, weight: f64) -> Self {
        Self {
            id: FundId(id),
            name,
            weight,
        }
    }
}

/// The charity's funds, ordered by id.
pub static FUNDS: [Fund; 5] = [
    Fund::new(1, "General", 10.0),
    Fund::new(2, "Veterinary Assistance", 5.0),
    Fund::new(3, "Lobbying", 1.0),
    Fund::new(4, "Cat Sheltering", 2.0),
    Fund::new(5, "Dog Sheltering", 2.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_ordinal() {
        for (idx, fund) in FUNDS.iter().enumerate() {
            assert_eq!(fund.id, FundId(idx as u32 + 1));
        }
    }

    #[test]
    fn test_weights_positive() {
        assert!(FUNDS.iter().all(|f| f.weight > 0.0));
    }

    #[test]
    fn test_names() {
        let names: Vec<&str> = FUNDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "General",
                "Veterinary Assistance",
                "Lobbying",
                "Cat Sheltering",
                "Dog Sheltering"
            ]
        );
    }
}
