//! The [`RefHierarchy`] structure and its lookups.
//!
//! A hierarchy is a fixed-length list of slots ordered from the outermost
//! scope (root) to the innermost (leaf). Any slot may be absent as long as
//! at least one is occupied.
//!
//! # Invariants
//!
//! - At least one slot is occupied, so [`RefHierarchy::root`] and
//!   [`RefHierarchy::leaf`] are always defined.
//! - Occupied slots keep their original positions and order.
//! - Nothing changes after construction.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use eref_types::Tagged;

use crate::config::{DuplicateTagPolicy, HierarchyConfig};
use crate::error::{HierarchyError, HierarchyResult};

/// Ordered root-to-leaf path of tagged nodes with optional levels.
#[derive(Clone, Debug, PartialEq)]
pub struct RefHierarchy<N> {
    /// Occupied slots as `(position, node)`, in slot order.
    nodes: Vec<(usize, N)>,
    /// Total number of slots, absent ones included.
    depth: usize,
}

impl<N> RefHierarchy<N>
where
    N: Tagged,
    N::Tag: PartialEq + fmt::Debug,
{
    /// Build a hierarchy from positional slots with the default configuration.
    ///
    /// Fails with [`HierarchyError::Empty`] when every slot is absent.
    pub fn new<I>(slots: I) -> HierarchyResult<Self>
    where
        I: IntoIterator<Item = Option<N>>,
    {
        Self::with_config(slots, &HierarchyConfig::default())
    }

    /// Build a hierarchy from positional slots.
    pub fn with_config<I>(slots: I, config: &HierarchyConfig) -> HierarchyResult<Self>
    where
        I: IntoIterator<Item = Option<N>>,
    {
        let mut depth = 0;
        let mut nodes = Vec::new();
        for (position, slot) in slots.into_iter().enumerate() {
            depth = position + 1;
            if let Some(node) = slot {
                nodes.push((position, node));
            }
        }

        if nodes.is_empty() {
            debug!(depth, "rejected hierarchy without nodes");
            return Err(HierarchyError::Empty);
        }
        if config.duplicate_tags == DuplicateTagPolicy::Reject {
            check_unique_tags(&nodes)?;
        }

        Ok(Self { nodes, depth })
    }

    /// Build a dense hierarchy from the present entries of `refs`.
    ///
    /// Absent entries are dropped, so slot positions of the result follow
    /// the present entries only. Returns `None` when nothing is present.
    pub fn from_optional_refs<I>(refs: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<N>>,
    {
        let nodes: Vec<(usize, N)> = refs.into_iter().flatten().enumerate().collect();
        if nodes.is_empty() {
            return None;
        }
        let depth = nodes.len();
        Some(Self { nodes, depth })
    }

    /// [`RefHierarchy::from_optional_refs`] with an explicit configuration.
    pub fn from_optional_refs_with<I>(
        refs: I,
        config: &HierarchyConfig,
    ) -> HierarchyResult<Option<Self>>
    where
        I: IntoIterator<Item = Option<N>>,
    {
        let present: Vec<N> = refs.into_iter().flatten().collect();
        if present.is_empty() {
            return Ok(None);
        }
        Self::with_config(present.into_iter().map(Some), config).map(Some)
    }
}

fn check_unique_tags<N>(nodes: &[(usize, N)]) -> HierarchyResult<()>
where
    N: Tagged,
    N::Tag: PartialEq + fmt::Debug,
{
    for (i, (first, node)) in nodes.iter().enumerate() {
        if let Some((second, _)) = nodes[i + 1..]
            .iter()
            .find(|(_, other)| other.tag() == node.tag())
        {
            debug!(tag = ?node.tag(), first, second, "rejected hierarchy with duplicate tag");
            return Err(HierarchyError::DuplicateTag {
                tag: format!("{:?}", node.tag()),
                first: *first,
                second: *second,
            });
        }
    }
    Ok(())
}

impl<N: Tagged> RefHierarchy<N> {
    /// The outermost occupied node.
    pub fn root(&self) -> &N {
        &self.nodes[0].1
    }

    /// The innermost occupied node.
    pub fn leaf(&self) -> &N {
        &self.nodes[self.nodes.len() - 1].1
    }

    /// The outermost occupied node carrying `tag`.
    pub fn get_ref<Q>(&self, tag: &Q) -> Option<&N>
    where
        N::Tag: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(tag).map(|(_, node)| node)
    }

    /// Slot position of the outermost occupied node carrying `tag`.
    pub fn position_of<Q>(&self, tag: &Q) -> Option<usize>
    where
        N::Tag: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(tag).map(|(position, _)| *position)
    }

    pub fn contains_tag<Q>(&self, tag: &Q) -> bool
    where
        N::Tag: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(tag).is_some()
    }

    fn find<Q>(&self, tag: &Q) -> Option<&(usize, N)>
    where
        N::Tag: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.nodes.iter().find(|(_, node)| node.has_tag(tag))
    }
}

impl<N> RefHierarchy<N> {
    /// Occupied nodes in slot order.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    /// Every slot in order, absent ones as `None`.
    pub fn slots(&self) -> impl Iterator<Item = Option<&N>> + '_ {
        (0..self.depth).map(|position| self.node_at(position))
    }

    /// The node in slot `position`, if occupied.
    pub fn node_at(&self, position: usize) -> Option<&N> {
        self.nodes
            .binary_search_by_key(&position, |(p, _)| *p)
            .ok()
            .map(|i| &self.nodes[i].1)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a hierarchy holds at least one node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of slots, absent ones included.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Iterator over the occupied nodes of a [`RefHierarchy`].
#[derive(Clone, Debug)]
pub struct Iter<'a, N> {
    inner: std::slice::Iter<'a, (usize, N)>,
}

impl<'a, N> Iterator for Iter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        self.inner.next().map(|(_, node)| node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<N> DoubleEndedIterator for Iter<'_, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, node)| node)
    }
}

impl<N> ExactSizeIterator for Iter<'_, N> {}

impl<'a, N> IntoIterator for &'a RefHierarchy<N> {
    type Item = &'a N;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Serialize> Serialize for RefHierarchy<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.slots())
    }
}

impl<'de, N> Deserialize<'de> for RefHierarchy<N>
where
    N: Deserialize<'de> + Tagged,
    N::Tag: PartialEq + fmt::Debug,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let slots = Vec::<Option<N>>::deserialize(deserializer)?;
        RefHierarchy::new(slots).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RefNode;
    use eref_list::RefList;
    use eref_types::EntityRef;

    const WORKSPACE: &str = "WORKSPACE";
    const PROJECT: &str = "PROJECT";
    const COLLECTION: &str = "COLLECTION";

    type Ref = EntityRef<&'static str, u64>;

    fn workspace() -> Ref {
        EntityRef::create(WORKSPACE, 1)
    }

    fn project() -> Ref {
        EntityRef::create(PROJECT, 2)
    }

    fn collection() -> Ref {
        EntityRef::create(COLLECTION, 3)
    }

    fn collect(h: &RefHierarchy<Ref>) -> Vec<Ref> {
        h.iter().cloned().collect()
    }

    // ---- construction ----

    #[test]
    fn fails_without_slots() {
        let err = RefHierarchy::<Ref>::new([]).unwrap_err();
        assert_eq!(err, HierarchyError::Empty);
        assert_eq!(err.to_string(), "ref hierarchy must contain at least one node");
    }

    #[test]
    fn fails_when_every_slot_is_absent() {
        let err = RefHierarchy::<Ref>::new([None, None]).unwrap_err();
        assert_eq!(err, HierarchyError::Empty);
    }

    #[test]
    fn single_occupied_slot_is_root_and_leaf() {
        let h = RefHierarchy::new([None, Some(project()), None]).unwrap();
        assert_eq!(h.root(), &project());
        assert_eq!(h.leaf(), &project());
        assert_eq!(h.len(), 1);
        assert_eq!(h.depth(), 3);
    }

    // ---- fully occupied ----

    #[test]
    fn full_hierarchy_root_and_leaf() {
        let h = RefHierarchy::new([Some(workspace()), Some(project()), Some(collection())]).unwrap();
        assert_eq!(h.root(), &workspace());
        assert_eq!(h.leaf(), &collection());
    }

    #[test]
    fn full_hierarchy_lookups() {
        let h = RefHierarchy::new([Some(workspace()), Some(project()), Some(collection())]).unwrap();
        assert_eq!(h.get_ref(WORKSPACE), Some(&workspace()));
        assert_eq!(h.get_ref(PROJECT), Some(&project()));
        assert_eq!(h.get_ref(COLLECTION), Some(&collection()));
        assert_eq!(h.get_ref("USER"), None);
    }

    #[test]
    fn full_hierarchy_iterates_in_order() {
        let h = RefHierarchy::new([Some(workspace()), Some(project()), Some(collection())]).unwrap();
        assert_eq!(collect(&h), vec![workspace(), project(), collection()]);
        assert_eq!(h.iter().len(), 3);
        assert_eq!(h.iter().next_back(), Some(&collection()));
    }

    // ---- absent root ----

    #[test]
    fn absent_root_slot() {
        let h = RefHierarchy::new([None, Some(project()), Some(collection())]).unwrap();
        assert_eq!(h.root(), &project());
        assert_eq!(h.leaf(), &collection());
        assert_eq!(h.get_ref(WORKSPACE), None);
        assert_eq!(h.get_ref(PROJECT), Some(&project()));
        assert_eq!(collect(&h), vec![project(), collection()]);
    }

    // ---- absent leaf ----

    #[test]
    fn absent_leaf_slot() {
        let h = RefHierarchy::new([Some(workspace()), Some(project()), None]).unwrap();
        assert_eq!(h.root(), &workspace());
        assert_eq!(h.leaf(), &project());
        assert_eq!(h.get_ref(COLLECTION), None);
        assert_eq!(collect(&h), vec![workspace(), project()]);
    }

    // ---- positions ----

    #[test]
    fn positions_survive_absent_slots() {
        let h = RefHierarchy::new([None, Some(project()), None, Some(collection())]).unwrap();
        assert_eq!(h.position_of(PROJECT), Some(1));
        assert_eq!(h.position_of(COLLECTION), Some(3));
        assert_eq!(h.position_of(WORKSPACE), None);
        assert!(h.contains_tag(PROJECT));
        assert!(!h.contains_tag(WORKSPACE));

        let slots: Vec<Option<&Ref>> = h.slots().collect();
        assert_eq!(slots, vec![None, Some(&project()), None, Some(&collection())]);
        assert_eq!(h.node_at(3), Some(&collection()));
        assert_eq!(h.node_at(9), None);
    }

    // ---- from_optional_refs ----

    #[test]
    fn from_optional_refs_without_refs_is_none() {
        assert!(RefHierarchy::<Ref>::from_optional_refs([None]).is_none());
        assert!(RefHierarchy::<Ref>::from_optional_refs(std::iter::empty()).is_none());
    }

    #[test]
    fn from_optional_refs_builds_dense_hierarchy() {
        let source = vec![None, Some(project()), Some(collection())];
        let h = RefHierarchy::from_optional_refs(source).unwrap();
        assert_eq!(h.root(), &project());
        assert_eq!(h.leaf(), &collection());
        assert_eq!(h.get_ref(WORKSPACE), None);
        assert_eq!(h.get_ref(COLLECTION), Some(&collection()));
        assert_eq!(collect(&h), vec![project(), collection()]);
        // Absent entries leave no positional trace.
        assert_eq!(h.depth(), 2);
        assert_eq!(h.position_of(PROJECT), Some(0));
    }

    #[test]
    fn from_optional_refs_accepts_lazy_iterators() {
        let source = (0..3u64).map(|i| (i > 0).then(|| EntityRef::create(PROJECT, i)));
        let h = RefHierarchy::from_optional_refs(source).unwrap();
        assert_eq!(*h.root().data(), 1);
        assert_eq!(*h.leaf().data(), 2);
    }

    // ---- duplicate tags ----

    #[test]
    fn duplicate_tags_resolve_to_first_match_by_default() {
        let first = EntityRef::create(PROJECT, 10);
        let second = EntityRef::create(PROJECT, 20);
        let h = RefHierarchy::new([Some(first.clone()), Some(second)]).unwrap();
        assert_eq!(h.get_ref(PROJECT), Some(&first));
    }

    #[test]
    fn duplicate_tags_rejected_by_strict_config() {
        let config = HierarchyConfig::strict();
        let slots = [
            Some(workspace()),
            None,
            Some(EntityRef::create(WORKSPACE, 9)),
        ];
        let err = RefHierarchy::with_config(slots, &config).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::DuplicateTag {
                tag: "\"WORKSPACE\"".into(),
                first: 0,
                second: 2,
            }
        );

        let ok = RefHierarchy::with_config([Some(workspace()), Some(project())], &config);
        assert!(ok.is_ok());
    }

    #[test]
    fn from_optional_refs_with_honors_config() {
        let config = HierarchyConfig::strict();
        let refs = [Some(project()), None, Some(project())];
        assert!(RefHierarchy::from_optional_refs_with(refs, &config).is_err());
        assert_eq!(
            RefHierarchy::<Ref>::from_optional_refs_with([None], &config),
            Ok(None)
        );
    }

    // ---- list nodes ----

    #[test]
    fn list_nodes_participate_by_tag() {
        type Node = RefNode<&'static str, u64>;
        let collections = RefList::new([
            EntityRef::create(COLLECTION, 3),
            EntityRef::create(COLLECTION, 4),
        ])
        .unwrap();
        let h: RefHierarchy<Node> = RefHierarchy::new([
            Some(Node::from(workspace())),
            None,
            Some(Node::from(collections)),
        ])
        .unwrap();

        let leaf = h.leaf();
        assert!(leaf.is_list());
        assert!(leaf.contains(&EntityRef::create(COLLECTION, 4)));
        assert_eq!(h.get_ref(COLLECTION).map(|n| n.refs().len()), Some(2));
        assert!(h.get_ref(PROJECT).is_none());
    }

    // ---- serde ----

    #[test]
    fn serde_keeps_positions() {
        let h: RefHierarchy<EntityRef<String, u64>> = RefHierarchy::new([
            None,
            Some(EntityRef::create("project".to_string(), 2)),
        ])
        .unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"[null,{"tag":"project","data":2}]"#);

        let parsed: RefHierarchy<EntityRef<String, u64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, h);
        assert!(serde_json::from_str::<RefHierarchy<EntityRef<String, u64>>>("[null]").is_err());
    }
}
