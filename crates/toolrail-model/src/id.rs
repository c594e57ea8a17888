//! Stable identifiers for widgets and container regions.
//!
//! Both IDs are thin newtypes over strings so that callers can use whatever
//! naming scheme their chrome already has (`"history"`, `"nav-bar"`,
//! `"panel-menu"`, ...). They implement [`Borrow<str>`] so map lookups work
//! with plain `&str` keys without allocating.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable unique identifier for a customizable widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Create a widget ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a container region (a toolbar, the overflow panel,
/// the palette).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Create a container ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ContainerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ContainerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn widget_id_display_is_bare() {
        let id = WidgetId::new("history");
        assert_eq!(format!("{id}"), "history");
        assert_eq!(id.as_str(), "history");
    }

    #[test]
    fn container_id_from_str() {
        let id: ContainerId = "nav-bar".into();
        assert_eq!(id, ContainerId::new("nav-bar"));
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map: HashMap<WidgetId, u32> = HashMap::new();
        map.insert(WidgetId::new("preferences"), 1);
        assert_eq!(map.get("preferences"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn ids_order_lexically() {
        let mut ids = vec![ContainerId::new("palette"), ContainerId::new("nav-bar")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "nav-bar");
    }
}
