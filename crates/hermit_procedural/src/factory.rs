//! # Environment Factory
//!
//! Boundary between the generator and the game that owns real objects.
//!
//! ```text
//! generator defines:          game implements:
//! ┌─────────────────────────┐ ┌──────────────────────────┐
//! │ trait EnvironmentFactory│←│ impl EnvironmentFactory  │
//! └─────────────────────────┘ └──────────────────────────┘
//! ```
//!
//! The generator only decides *that* an element of some kind exists at some
//! position. Prefabs, sprites and physics stay on the game's side.

use std::collections::BTreeSet;

use hermit_shared::Vec2;

use crate::placement::{PlacementKind, PlacementRequest};

// ============================================================================
// BOUNDARY
// ============================================================================

/// Creates game objects for placement requests.
pub trait EnvironmentFactory {
    /// Parent object owning every element of one level.
    type Container;
    /// Handle to one created element.
    type Handle;

    /// Creates the root container for a new level.
    fn create_container(&mut self, name: &str) -> Self::Container;

    /// Creates one element under `parent`.
    ///
    /// Returns `None` when no asset is configured for `kind`. The request is
    /// then skipped; this is never fatal.
    fn create_environment_object(
        &mut self,
        kind: PlacementKind,
        position: Vec2,
        parent: &Self::Container,
    ) -> Option<Self::Handle>;
}

// ============================================================================
// RECORDING FACTORY
// ============================================================================

/// Container created by [`RecordingFactory`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordedContainer {
    /// Index in creation order.
    pub id: usize,
    /// Name passed by the generator.
    pub name: String,
}

/// Factory that records every request instead of creating objects.
///
/// Handles are indices into [`RecordingFactory::created`].
#[derive(Clone, Debug, Default)]
pub struct RecordingFactory {
    containers: Vec<String>,
    requests: Vec<PlacementRequest>,
    created: Vec<PlacementRequest>,
    missing: BTreeSet<PlacementKind>,
}

impl RecordingFactory {
    /// Creates a factory with every kind configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory that returns `None` for the given kinds.
    #[must_use]
    pub fn with_missing(kinds: impl IntoIterator<Item = PlacementKind>) -> Self {
        Self {
            missing: kinds.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Marks `kind` as unconfigured.
    pub fn mark_missing(&mut self, kind: PlacementKind) {
        self.missing.insert(kind);
    }

    /// Every request received, in order, including skipped ones.
    #[must_use]
    pub fn requests(&self) -> &[PlacementRequest] {
        &self.requests
    }

    /// Requests that produced a handle, in order.
    #[must_use]
    pub fn created(&self) -> &[PlacementRequest] {
        &self.created
    }

    /// Names of containers created so far.
    #[must_use]
    pub fn containers(&self) -> &[String] {
        &self.containers
    }

    /// Request behind a handle.
    #[must_use]
    pub fn resolve(&self, handle: usize) -> Option<&PlacementRequest> {
        self.created.get(handle)
    }

    /// Forgets everything recorded, keeping the missing-kind list.
    pub fn clear(&mut self) {
        self.containers.clear();
        self.requests.clear();
        self.created.clear();
    }
}

impl EnvironmentFactory for RecordingFactory {
    type Container = RecordedContainer;
    type Handle = usize;

    fn create_container(&mut self, name: &str) -> RecordedContainer {
        self.containers.push(name.to_owned());
        RecordedContainer {
            id: self.containers.len() - 1,
            name: name.to_owned(),
        }
    }

    fn create_environment_object(
        &mut self,
        kind: PlacementKind,
        position: Vec2,
        _parent: &RecordedContainer,
    ) -> Option<usize> {
        let request = PlacementRequest::new(kind, position);
        self.requests.push(request);
        if self.missing.contains(&kind) {
            return None;
        }
        self.created.push(request);
        Some(self.created.len() - 1)
    }
}
