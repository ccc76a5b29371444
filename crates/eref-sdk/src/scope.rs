//! Workspace → project → collection scoping.
//!
//! Each scope level has its own factory, kept in a process-wide static. A
//! [`ScopePath`] places at most one node per level into a fixed three-slot
//! hierarchy; any level may be missing, but not all of them.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use eref_factory::RefFactory;
use eref_hierarchy::RefHierarchy;
use eref_list::RefList;
use eref_types::{EntityRef, Tagged};

use crate::error::{SdkError, SdkResult};

/// Tag of every scope ref, ordered from outermost to innermost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Workspace,
    Project,
    Collection,
}

impl ScopeKind {
    /// Slot index of this level inside a [`ScopePath`].
    pub fn level(self) -> usize {
        match self {
            Self::Workspace => 0,
            Self::Project => 1,
            Self::Collection => 2,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace => write!(f, "workspace"),
            Self::Project => write!(f, "project"),
            Self::Collection => write!(f, "collection"),
        }
    }
}

/// Payload of a project ref: the owning workspace and the project id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectKey {
    pub workspace: u64,
    pub id: u64,
}

pub type WorkspaceRef = EntityRef<ScopeKind, u64>;
pub type ProjectRef = EntityRef<ScopeKind, ProjectKey>;
pub type CollectionRef = EntityRef<ScopeKind, u64>;

pub static WORKSPACES: LazyLock<RefFactory<ScopeKind, u64, u64>> =
    LazyLock::new(|| RefFactory::make(ScopeKind::Workspace, |id: u64| id));

/// Projects are minted from raw ids or from an existing workspace ref
/// (`"in_workspace"`, taking `(WorkspaceRef, u64)`).
pub static PROJECTS: LazyLock<RefFactory<ScopeKind, (u64, u64), ProjectKey>> =
    LazyLock::new(|| {
        let ctor = |(workspace, id): (u64, u64)| ProjectKey { workspace, id };
        RefFactory::builder(ScopeKind::Project, ctor)
            .aux("in_workspace", |(workspace, id): (WorkspaceRef, u64)| ProjectKey {
                workspace: *workspace.data(),
                id,
            })
            .build()
    });

pub static COLLECTIONS: LazyLock<RefFactory<ScopeKind, u64, u64>> =
    LazyLock::new(|| RefFactory::make(ScopeKind::Collection, |id: u64| id));

/// One level of a [`ScopePath`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScopeNode {
    Workspace(WorkspaceRef),
    Project(ProjectRef),
    Collections(RefList<ScopeKind, u64>),
}

impl Tagged for ScopeNode {
    type Tag = ScopeKind;

    fn tag(&self) -> &ScopeKind {
        match self {
            Self::Workspace(r) => r.tag(),
            Self::Project(r) => r.tag(),
            Self::Collections(list) => list.tag(),
        }
    }
}

/// The scope an operation runs in.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopePath {
    hierarchy: RefHierarchy<ScopeNode>,
}

impl ScopePath {
    /// Assemble a path from its optional levels.
    ///
    /// Every present ref must carry the tag of its level; at least one level
    /// must be present.
    pub fn new(
        workspace: Option<WorkspaceRef>,
        project: Option<ProjectRef>,
        collections: Option<RefList<ScopeKind, u64>>,
    ) -> SdkResult<Self> {
        let slots = [
            workspace.map(ScopeNode::Workspace),
            project.map(ScopeNode::Project),
            collections.map(ScopeNode::Collections),
        ];
        for (node, expected) in slots.iter().zip([
            ScopeKind::Workspace,
            ScopeKind::Project,
            ScopeKind::Collection,
        ]) {
            if let Some(node) = node {
                let actual = *node.tag();
                if actual != expected {
                    debug!(%expected, %actual, "rejected misplaced scope ref");
                    return Err(SdkError::MisplacedScope { expected, actual });
                }
            }
        }
        let hierarchy = RefHierarchy::new(slots)?;
        Ok(Self { hierarchy })
    }

    /// Scope a single collection set inside a project.
    pub fn collections(project: ProjectRef, ids: impl IntoIterator<Item = u64>) -> SdkResult<Self> {
        let refs = ids.into_iter().map(|id| COLLECTIONS.create(id));
        let collections = RefList::new(refs)?;
        Self::new(None, Some(project), Some(collections))
    }

    pub fn hierarchy(&self) -> &RefHierarchy<ScopeNode> {
        &self.hierarchy
    }

    pub fn workspace(&self) -> Option<&WorkspaceRef> {
        match self.hierarchy.get_ref(&ScopeKind::Workspace) {
            Some(ScopeNode::Workspace(r)) => Some(r),
            _ => None,
        }
    }

    pub fn project(&self) -> Option<&ProjectRef> {
        match self.hierarchy.get_ref(&ScopeKind::Project) {
            Some(ScopeNode::Project(r)) => Some(r),
            _ => None,
        }
    }

    pub fn collection_list(&self) -> Option<&RefList<ScopeKind, u64>> {
        match self.hierarchy.get_ref(&ScopeKind::Collection) {
            Some(ScopeNode::Collections(list)) => Some(list),
            _ => None,
        }
    }

    /// Kind of the outermost present level.
    pub fn root_kind(&self) -> ScopeKind {
        *self.hierarchy.root().tag()
    }

    /// Kind of the innermost present level.
    pub fn leaf_kind(&self) -> ScopeKind {
        *self.hierarchy.leaf().tag()
    }
}
