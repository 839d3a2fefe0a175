//! Project persistence: named canvas snapshots in an in-memory store.
//!
//! A project is a name plus a [`CanvasData`] aggregate. The store hands out
//! sequential numeric ids and seeds itself with an "Untitled Canvas" so a
//! fresh session always has somewhere to draw.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::doc::CanvasData;

/// Unique identifier for a project.
pub type ProjectId = u64;

/// A named canvas snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub data: CanvasData,
}

/// Sparse update for a project. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CanvasData>,
}

/// Failure to decode a persisted canvas snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid canvas snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a persisted canvas snapshot from its JSON text.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] when the text is not a valid
/// [`CanvasData`] document.
pub fn decode_canvas_data(json: &str) -> Result<CanvasData, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// In-memory project store with sequential ids.
///
/// Iteration order is ascending id. The store starts with one seeded
/// project (id 1, "Untitled Canvas", empty canvas) and allocates ids
/// starting at 2.
#[derive(Debug)]
pub struct ProjectStore {
    projects: BTreeMap<ProjectId, Project>,
    next_id: ProjectId,
}

impl ProjectStore {
    /// Create a store seeded with the default project.
    #[must_use]
    pub fn new() -> Self {
        let mut projects = BTreeMap::new();
        projects.insert(
            1,
            Project {
                id: 1,
                name: "Untitled Canvas".to_owned(),
                data: CanvasData::default(),
            },
        );
        Self { projects, next_id: 2 }
    }

    /// Look up a project by id.
    #[must_use]
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// All projects, ascending by id.
    pub fn list(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    /// Create a project, returning the stored record.
    pub fn create(&mut self, name: String, data: CanvasData) -> &Project {
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, %name, "project created");
        self.projects.entry(id).or_insert(Project { id, name, data })
    }

    /// Shallow-merge a patch into an existing project.
    /// Returns the updated record, or `None` if the id is absent.
    pub fn update(&mut self, id: ProjectId, patch: ProjectPatch) -> Option<&Project> {
        let project = self.projects.get_mut(&id)?;
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(data) = patch.data {
            project.data = data;
        }
        debug!(id, "project updated");
        Some(project)
    }

    /// Remove a project by id. Returns `true` if it was present.
    pub fn delete(&mut self, id: ProjectId) -> bool {
        let removed = self.projects.remove(&id).is_some();
        if removed {
            debug!(id, "project deleted");
        }
        removed
    }

    /// Number of stored projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns `true` if the store holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}
