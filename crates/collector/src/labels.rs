//! Label classification
//!
//! Splits Kubernetes labels into dimension properties and tags.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(test)]
use mockall::automock;

/// Result of classifying a label set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLabels {
    /// Descriptive key/value metadata
    pub properties: BTreeMap<String, String>,

    /// Presence-only markers
    pub tags: BTreeSet<String>,
}

/// Partitions a resource's labels into properties and tags.
#[cfg_attr(test, automock)]
pub trait LabelClassifier: Send + Sync {
    /// Returns freshly allocated collections; callers are free to mutate them.
    fn classify(&self, labels: &BTreeMap<String, String>) -> ClassifiedLabels;
}

/// Labels with an empty value become tags, all others become properties.
/// Keys have `.` and `/` replaced with `_` in both cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabelClassifier;

impl LabelClassifier for DefaultLabelClassifier {
    fn classify(&self, labels: &BTreeMap<String, String>) -> ClassifiedLabels {
        let mut classified = ClassifiedLabels::default();
        for (label, value) in labels {
            let key = sanitize_property_name(label);
            if value.is_empty() {
                classified.tags.insert(key);
            } else {
                classified.properties.insert(key, value.clone());
            }
        }
        classified
    }
}

fn sanitize_property_name(name: &str) -> String {
    name.replace(['.', '/'], "_")
}

/// Lower-cases the first character of `s`, leaving the rest untouched.
/// Empty input is returned unchanged.
pub fn lowercase_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
