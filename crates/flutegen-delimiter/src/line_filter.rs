//! Whole-line substitutions
//!
//! The convert-value entry keyed [`LINE_CONVERT_KEY`] lists literal
//! `from -> to` replacements applied to every raw data line, in order.

use flutegen_core::{ConvertValueMap, LINE_CONVERT_KEY};
use once_cell::sync::OnceCell;
use std::borrow::Cow;

/// Applies `$$LINE$$` substitutions to raw lines
#[derive(Debug, Default)]
pub struct LineDirectFilter {
    convert_values: Option<ConvertValueMap>,
    resolved: OnceCell<Vec<(String, String)>>,
}

impl LineDirectFilter {
    pub fn new(convert_values: Option<ConvertValueMap>) -> Self {
        Self {
            convert_values,
            resolved: OnceCell::new(),
        }
    }

    /// Apply every substitution to `line`
    pub fn filter<'l>(&self, line: &'l str) -> Cow<'l, str> {
        let substitutions = self.substitutions();
        if substitutions.is_empty() {
            return Cow::Borrowed(line);
        }
        let mut filtered = line.to_string();
        for (from, to) in substitutions {
            if filtered.contains(from.as_str()) {
                filtered = filtered.replace(from.as_str(), to);
            }
        }
        Cow::Owned(filtered)
    }

    /// Substitutions in application order, resolved once
    pub fn substitutions(&self) -> &[(String, String)] {
        self.resolved.get_or_init(|| {
            self.convert_values
                .as_ref()
                .and_then(|map| map.get(LINE_CONVERT_KEY))
                .map(|pairs| {
                    pairs
                        .iter()
                        .filter(|(from, _)| !from.is_empty())
                        .map(|(from, to)| (from.clone(), to.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// Whether the substitution list has been resolved
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}
