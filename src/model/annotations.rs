//! Annotations — the key-value metadata on an association.

use std::collections::BTreeMap;
use super::Value;

/// Annotation names mapped to values. Ordered, so exports are stable.
pub type Annotations = BTreeMap<String, Value>;

/// Key of the annotation naming the producing module.
pub const SOURCE_MODULE_KEY: &str = "bio2bel";

/// Key of the annotation holding the network separation `s_AB`.
pub const SEPARATION_KEY: &str = "s_AB";
