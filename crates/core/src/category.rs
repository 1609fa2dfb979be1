//! Financial concepts that group the best practices.

use crate::error::CoreError;

/// Known category names, in display order.
pub mod names {
    pub const RISK_FREE_RATE: &str = "Risk-Free Rate";
    pub const COST_OF_DEBT: &str = "Cost of Debt";
    pub const COST_OF_EQUITY: &str = "Cost of Equity";
    pub const COST_OF_CAPITAL: &str = "Cost of Capital";
}

/// The set of all valid categories.
pub const VALID_CATEGORIES: &[&str] = &[
    names::RISK_FREE_RATE,
    names::COST_OF_DEBT,
    names::COST_OF_EQUITY,
    names::COST_OF_CAPITAL,
];

/// Category preselected when a student starts a new practice.
pub const DEFAULT_CATEGORY: &str = names::RISK_FREE_RATE;

/// Returns `true` if the given category is one of the known concepts.
///
/// Matching is exact: category names are stored and compared verbatim.
pub fn is_valid_category(category: &str) -> bool {
    VALID_CATEGORIES.contains(&category)
}

/// Validate a category name.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if is_valid_category(category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

pub fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
