use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Metadata record used to enrich every datapoint carrying the same
/// dimension key/value pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension key, e.g. `kubernetes_uid`
    pub name: String,

    /// Dimension value the properties and tags attach to
    pub value: String,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub tags: BTreeSet<String>,
}
