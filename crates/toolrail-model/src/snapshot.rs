//! Persisted layout schema v1 with versioning.
//!
//! A [`LayoutSnapshot`] is the opaque blob the engine hands to (and accepts
//! from) the persistence collaborator: container IDs mapped to their ordered
//! widget IDs, plus a schema version and a forward-compatible extension bag.
//!
//! # Schema Versioning Policy
//!
//! - **Additive fields** may be carried in `extensions` without a version
//!   bump.
//! - **Breaking changes** require incrementing [`LAYOUT_SCHEMA_VERSION`].
//! - Loaders reject unknown versions with actionable diagnostics.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::id::{ContainerId, WidgetId};
use crate::registry::WidgetRegistry;

/// Current layout snapshot schema version.
pub const LAYOUT_SCHEMA_VERSION: u16 = 1;

fn default_schema_version() -> u16 {
    LAYOUT_SCHEMA_VERSION
}

/// Persisted placement state: container → ordered widget IDs.
///
/// Forward-compatible: unknown fields land in `extensions` for
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Schema version for migration detection.
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    /// Ordered widget IDs per container, keyed by container ID.
    pub placements: BTreeMap<ContainerId, Vec<WidgetId>>,
    /// Forward-compatible extension bag.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

impl LayoutSnapshot {
    /// Create a v1 snapshot from a placement mapping.
    #[must_use]
    pub fn new(placements: BTreeMap<ContainerId, Vec<WidgetId>>) -> Self {
        Self {
            schema_version: LAYOUT_SCHEMA_VERSION,
            placements,
            extensions: BTreeMap::new(),
        }
    }

    /// Validate schema version and structural invariants.
    ///
    /// Structural invariant: a widget ID appears at most once across all
    /// containers.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version != LAYOUT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.schema_version,
                expected: LAYOUT_SCHEMA_VERSION,
            });
        }
        let mut seen: Vec<&WidgetId> = Vec::new();
        for seq in self.placements.values() {
            for widget in seq {
                if seen.contains(&widget) {
                    return Err(SnapshotError::DuplicatePlacement {
                        widget: widget.clone(),
                    });
                }
                seen.push(widget);
            }
        }
        Ok(())
    }

    /// Validate against a registry: every container must be declared and
    /// every widget registered, on top of [`validate`](Self::validate).
    pub fn validate_against(&self, registry: &WidgetRegistry) -> Result<(), SnapshotError> {
        self.validate()?;
        for (container, seq) in &self.placements {
            if !registry.has_container(container) {
                return Err(SnapshotError::UnknownContainer {
                    container: container.clone(),
                });
            }
            for widget in seq {
                if !registry.contains(widget) {
                    return Err(SnapshotError::UnknownWidget {
                        widget: widget.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total number of placed widgets.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.placements.values().map(Vec::len).sum()
    }

    /// Deterministic hash for state diagnostics.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.schema_version.hash(&mut hasher);
        for (container, seq) in &self.placements {
            container.as_str().hash(&mut hasher);
            for widget in seq {
                widget.as_str().hash(&mut hasher);
            }
        }
        for (k, v) in &self.extensions {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Errors from snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Schema version is not supported.
    UnsupportedVersion { found: u16, expected: u16 },
    /// A widget ID appears in more than one place.
    DuplicatePlacement { widget: WidgetId },
    /// A container in the snapshot was never declared.
    UnknownContainer { container: ContainerId },
    /// A widget in the snapshot is not registered.
    UnknownWidget { widget: WidgetId },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout schema version {found} (expected {expected})"
                )
            }
            Self::DuplicatePlacement { widget } => {
                write!(f, "widget {widget:?} is placed more than once")
            }
            Self::UnknownContainer { container } => {
                write!(f, "snapshot references unknown container {container:?}")
            }
            Self::UnknownWidget { widget } => {
                write!(f, "snapshot references unknown widget {widget:?}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetDef;

    fn snapshot() -> LayoutSnapshot {
        let mut placements = BTreeMap::new();
        placements.insert(
            ContainerId::new("nav-bar"),
            vec![WidgetId::new("preferences")],
        );
        placements.insert(
            ContainerId::new("panel-menu"),
            vec![WidgetId::new("history")],
        );
        LayoutSnapshot::new(placements)
    }

    fn registry() -> WidgetRegistry {
        let mut reg = WidgetRegistry::new();
        reg.add_container("nav-bar");
        reg.add_container("panel-menu");
        reg.register(WidgetDef::new("history", "panel-menu")).unwrap();
        reg.register(WidgetDef::new("preferences", "nav-bar")).unwrap();
        reg
    }

    // ---- Validation ----

    #[test]
    fn validate_ok() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn validate_wrong_version() {
        let mut snap = snapshot();
        snap.schema_version = 99;
        let err = snap.validate().unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion {
                found: 99,
                expected: 1
            }
        ));
    }

    #[test]
    fn validate_duplicate_placement() {
        let mut snap = snapshot();
        snap.placements
            .get_mut(&ContainerId::new("nav-bar"))
            .unwrap()
            .push(WidgetId::new("history"));
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicatePlacement { .. }));
    }

    #[test]
    fn validate_against_registry_ok() {
        assert!(snapshot().validate_against(&registry()).is_ok());
    }

    #[test]
    fn validate_against_unknown_container() {
        let mut snap = snapshot();
        snap.placements
            .insert(ContainerId::new("bookmarks-bar"), Vec::new());
        let err = snap.validate_against(&registry()).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownContainer { .. }));
    }

    #[test]
    fn validate_against_unknown_widget() {
        let mut snap = snapshot();
        snap.placements
            .get_mut(&ContainerId::new("nav-bar"))
            .unwrap()
            .push(WidgetId::new("zoom"));
        let err = snap.validate_against(&registry()).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownWidget { .. }));
    }

    // ---- Serialization ----

    #[test]
    fn serde_round_trip() {
        let snap = snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn serde_missing_optional_fields_default() {
        let json = r#"{
            "placements": {
                "nav-bar": ["preferences"],
                "panel-menu": ["history"]
            }
        }"#;
        let snap: LayoutSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.schema_version, LAYOUT_SCHEMA_VERSION);
        assert!(snap.extensions.is_empty());
        assert_eq!(snap.widget_count(), 2);
    }

    #[test]
    fn serde_extensions_preserved() {
        let json = r#"{
            "placements": {"nav-bar": []},
            "extensions": {"future_field": "value"}
        }"#;
        let snap: LayoutSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.extensions.get("future_field").unwrap(), "value");
    }

    // ---- Deterministic hashing ----

    #[test]
    fn state_hash_deterministic() {
        assert_eq!(snapshot().state_hash(), snapshot().state_hash());
    }

    #[test]
    fn state_hash_changes_with_order() {
        let snap = snapshot();
        let mut reordered = snap.clone();
        let seq = reordered
            .placements
            .get_mut(&ContainerId::new("nav-bar"))
            .unwrap();
        seq.push(WidgetId::new("zoom"));
        assert_ne!(snap.state_hash(), reordered.state_hash());
    }
}
