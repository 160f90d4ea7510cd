use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::config::MenuEntry;

/// Index of a node inside a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A menu entry together with its place in the hierarchy.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub entry: MenuEntry,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Malformed menu configuration. Either error rejects the whole menu.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("menu key `{0}` is declared more than once")]
    DuplicateKey(String),
    #[error("menu branches form a cycle: {}", .0.join(" -> "))]
    CyclicHierarchy(Vec<String>),
}

/// The menu forest built from a flat entry list.
///
/// Nodes are stored in declaration order; parent and child links are indices,
/// so the forest owns every node exactly once. A tree is built per menu load
/// and replaced, never patched.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    roots: Vec<NodeId>,
}

impl MenuTree {
    /// Builds the forest from `entries`, linking each entry under the entry
    /// its `branch` names. Sibling order follows declaration order.
    pub fn build(entries: Vec<MenuEntry>) -> Result<Self, MenuError> {
        let mut index: HashMap<String, NodeId> = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key.clone(), NodeId(position)).is_some() {
                return Err(MenuError::DuplicateKey(entry.key.clone()));
            }
        }

        let parents: Vec<Option<NodeId>> = entries
            .iter()
            .map(|entry| {
                entry
                    .branch
                    .as_deref()
                    .and_then(|branch| index.get(branch).copied())
            })
            .collect();

        if let Some(chain) = find_cycle(&parents, &entries) {
            return Err(MenuError::CyclicHierarchy(chain));
        }

        let mut nodes: Vec<MenuNode> = entries
            .into_iter()
            .zip(parents.iter().copied())
            .map(|(entry, parent)| MenuNode {
                entry,
                parent,
                children: Vec::new(),
            })
            .collect();

        let mut roots = Vec::new();
        for (position, parent) in parents.into_iter().enumerate() {
            match parent {
                Some(parent) => nodes[parent.0].children.push(NodeId(position)),
                None => roots.push(NodeId(position)),
            }
        }

        Ok(Self { nodes, roots })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &MenuNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The entry declared first in the configuration, regardless of nesting.
    pub fn first_declared(&self) -> Option<&MenuEntry> {
        self.nodes.first().map(|node| &node.entry)
    }

    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.entry.key == key)
            .map(NodeId)
    }

    /// The first node, in display order, that points at `file`.
    pub fn find_by_file(&self, file: &str) -> Option<NodeId> {
        self.walk()
            .find(|(id, _)| self.node(*id).entry.file == file)
            .map(|(id, _)| id)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.node(parent).parent;
        }
        chain
    }

    /// Depth-first pre-order traversal yielding each node with its depth.
    pub fn walk(&self) -> Walk<'_> {
        let stack = self.roots.iter().rev().map(|id| (*id, 0)).collect();
        Walk { tree: self, stack }
    }

    /// A nested, owned copy of the forest, suitable for serialization.
    pub fn export(&self) -> Vec<ExportedNode> {
        self.roots.iter().map(|id| self.export_node(*id)).collect()
    }

    fn export_node(&self, id: NodeId) -> ExportedNode {
        let node = self.node(id);
        ExportedNode {
            key: node.entry.key.clone(),
            file: node.entry.file.clone(),
            titles: node.entry.titles.clone(),
            children: node
                .children
                .iter()
                .map(|child| self.export_node(*child))
                .collect(),
        }
    }
}

/// Iterator returned by [`MenuTree::walk`].
pub struct Walk<'a> {
    tree: &'a MenuTree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let children = self.tree.children(id);
        self.stack
            .extend(children.iter().rev().map(|child| (*child, depth + 1)));
        Some((id, depth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedNode {
    pub key: String,
    pub file: String,
    pub titles: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExportedNode>,
}

/// Follows every parent chain and returns the keys of the first loop found.
fn find_cycle(parents: &[Option<NodeId>], entries: &[MenuEntry]) -> Option<Vec<String>> {
    // 0 = unvisited, 1 = on the chain being followed, 2 = known to reach a root
    let mut mark = vec![0u8; parents.len()];
    for start in 0..parents.len() {
        if mark[start] != 0 {
            continue;
        }
        let mut chain = Vec::new();
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            match mark[current] {
                2 => break,
                1 => {
                    let from = chain.iter().position(|id| *id == current).unwrap_or(0);
                    let mut keys: Vec<String> = chain[from..]
                        .iter()
                        .map(|id: &usize| entries[*id].key.clone())
                        .collect();
                    keys.push(entries[current].key.clone());
                    return Some(keys);
                }
                _ => {
                    mark[current] = 1;
                    chain.push(current);
                    cursor = parents[current].map(NodeId::index);
                }
            }
        }
        for id in chain {
            mark[id] = 2;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, branch: Option<&str>) -> MenuEntry {
        MenuEntry {
            key: key.to_string(),
            file: format!("{key}.md"),
            branch: branch.map(str::to_string),
            titles: BTreeMap::new(),
            detail: None,
        }
    }

    fn keys_in_order(tree: &MenuTree) -> Vec<(String, usize)> {
        tree.walk()
            .map(|(id, depth)| (tree.node(id).entry.key.clone(), depth))
            .collect()
    }

    #[test]
    fn builds_nested_forest_in_declaration_order() {
        let tree = MenuTree::build(vec![
            entry("a", None),
            entry("b", None),
            entry("a1", Some("a")),
            entry("a1x", Some("a1")),
            entry("a2", Some("a")),
            entry("b1", Some("b")),
        ])
        .unwrap();

        assert_eq!(
            keys_in_order(&tree),
            vec![
                ("a".into(), 0),
                ("a1".into(), 1),
                ("a1x".into(), 2),
                ("a2".into(), 1),
                ("b".into(), 0),
                ("b1".into(), 1),
            ]
        );
    }

    #[test]
    fn child_declared_before_parent_is_still_linked() {
        let tree = MenuTree::build(vec![entry("child", Some("parent")), entry("parent", None)]).unwrap();
        assert_eq!(tree.roots().len(), 1);
        let parent = tree.find_by_key("parent").unwrap();
        assert_eq!(tree.children(parent), &[tree.find_by_key("child").unwrap()]);
    }

    #[test]
    fn dangling_branch_becomes_root() {
        let tree = MenuTree::build(vec![entry("a", None), entry("orphan", Some("missing"))]).unwrap();
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.node(tree.roots()[1]).entry.key, "orphan");
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = MenuTree::build(vec![entry("a", None), entry("a", None)]).unwrap_err();
        assert_eq!(err, MenuError::DuplicateKey("a".into()));
    }

    #[test]
    fn cycle_is_rejected_with_chain() {
        let err = MenuTree::build(vec![
            entry("root", None),
            entry("x", Some("z")),
            entry("y", Some("x")),
            entry("z", Some("y")),
        ])
        .unwrap_err();
        match err {
            MenuError::CyclicHierarchy(chain) => {
                assert_eq!(chain.first(), chain.last());
                assert_eq!(chain.len(), 4);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let err = MenuTree::build(vec![entry("a", Some("a"))]).unwrap_err();
        assert_eq!(err, MenuError::CyclicHierarchy(vec!["a".into(), "a".into()]));
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let tree = MenuTree::build(vec![
            entry("a", None),
            entry("b", Some("a")),
            entry("c", Some("b")),
        ])
        .unwrap();
        let c = tree.find_by_key("c").unwrap();
        let names: Vec<_> = tree
            .ancestors(c)
            .into_iter()
            .map(|id| tree.node(id).entry.key.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn first_declared_ignores_nesting() {
        let tree = MenuTree::build(vec![entry("child", Some("parent")), entry("parent", None)]).unwrap();
        assert_eq!(tree.first_declared().unwrap().key, "child");
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = MenuTree::build(Vec::new()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.walk().count(), 0);
    }
}
