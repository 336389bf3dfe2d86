//! Household shape used when evaluating the credit formula

use serde::{Deserialize, Serialize};

/// Tax filing status of the household head
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingStatus {
    #[default]
    Single,
    Joint,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::Joint => "joint",
        }
    }
}

/// Household shape for a single benefit curve
///
/// Filing status is carried for labelling only; the refundable phase-in is
/// identical for single and joint filers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdShape {
    pub filing_status: FilingStatus,

    /// Number of CTC-qualifying children
    pub num_children: u8,
}

impl HouseholdShape {
    pub fn new(filing_status: FilingStatus, num_children: u8) -> Self {
        Self {
            filing_status,
            num_children,
        }
    }

    /// Single filer with `num_children` qualifying children
    pub fn single(num_children: u8) -> Self {
        Self::new(FilingStatus::Single, num_children)
    }

    /// Legend label, e.g. "1 child" or "3 children"
    pub fn label(&self) -> String {
        match self.num_children {
            1 => "1 child".to_string(),
            n => format!("{} children", n),
        }
    }
}

impl Default for HouseholdShape {
    fn default() -> Self {
        Self::single(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(HouseholdShape::single(1).label(), "1 child");
        assert_eq!(HouseholdShape::single(3).label(), "3 children");
        assert_eq!(HouseholdShape::default().num_children, 2);
        assert_eq!(HouseholdShape::default().filing_status.as_str(), "single");
    }
}
