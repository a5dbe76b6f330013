//! # Shipping Selection
//!
//! An ordered list of shipping methods plus the one currently chosen.
//!
//! ## Selection Rules
//! ```text
//! options = [Kara, Hava, Deniz]   selected = Kara   (derived default)
//!        │
//!        ▼ select(1)
//! options = [Kara, Hava, Deniz]   selected = Hava   (user choice)
//!        │
//!        ▼ set_options([Posta, Kargo])
//! options = [Posta, Kargo]        selected = Posta  (re-derived)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CartResult;
use crate::validation::validate_index;
use crate::DEFAULT_SHIPPING_OPTIONS;

/// Shipping options with a selection that defaults to the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSelector {
    options: Vec<String>,

    /// Index into `options`; `None` only when the list is empty.
    selected: Option<usize>,
}

impl ShippingSelector {
    pub fn new(options: Vec<String>) -> Self {
        let selected = Self::default_selection(&options);
        ShippingSelector { options, selected }
    }

    /// Selects `options[index]`.
    ///
    /// Fails with `InvalidArgument` when the index is out of range; the
    /// previous selection is kept.
    pub fn select(&mut self, index: usize) -> CartResult<&str> {
        let index = validate_index("shipping index", index, self.options.len())?;
        self.selected = Some(index);
        Ok(self.options[index].as_str())
    }

    /// Replaces the option list. The selection resets to the new first entry.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.selected = Self::default_selection(&options);
        self.options = options;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    fn default_selection(options: &[String]) -> Option<usize> {
        if options.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}

impl Default for ShippingSelector {
    fn default() -> Self {
        ShippingSelector::new(DEFAULT_SHIPPING_OPTIONS.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartError, ValidationError};

    #[test]
    fn test_defaults_to_first_option() {
        let selector = ShippingSelector::default();
        assert_eq!(selector.options(), ["Kara", "Hava", "Deniz"]);
        assert_eq!(selector.selected(), Some("Kara"));
    }

    #[test]
    fn test_select_by_index() {
        let mut selector = ShippingSelector::default();
        assert_eq!(selector.select(1).unwrap(), "Hava");
        assert_eq!(selector.selected(), Some("Hava"));
    }

    #[test]
    fn test_out_of_range_keeps_selection() {
        let mut selector = ShippingSelector::default();
        selector.select(2).unwrap();

        let err = selector.select(3).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::OutOfRange { value: 3, .. })
        ));
        assert_eq!(selector.selected(), Some("Deniz"));
    }

    #[test]
    fn test_new_options_reset_selection() {
        let mut selector = ShippingSelector::default();
        selector.select(1).unwrap();

        selector.set_options(vec!["Posta".to_string(), "Kargo".to_string()]);
        assert_eq!(selector.selected(), Some("Posta"));

        selector.select(1).unwrap();
        assert_eq!(selector.selected(), Some("Kargo"));
    }

    #[test]
    fn test_empty_options_have_no_selection() {
        let mut selector = ShippingSelector::new(Vec::new());
        assert_eq!(selector.selected(), None);
        assert!(selector.select(0).is_err());
    }
}
