use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unchecked,
    Partial,
    Checked,
}

impl SelectionState {
    /// State a click produces. Partial collapses to Checked.
    pub fn toggled(self) -> Self {
        match self {
            SelectionState::Unchecked | SelectionState::Partial => SelectionState::Checked,
            SelectionState::Checked => SelectionState::Unchecked,
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            SelectionState::Checked
        } else {
            SelectionState::Unchecked
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub state: SelectionState,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Arena of scanned entries. Node 0 is the scanned root directory; parents
/// are referenced by index only.
#[derive(Debug, Clone, Default)]
pub struct SelectionTree {
    root: PathBuf,
    nodes: Vec<Node>,
    index: HashMap<PathBuf, NodeId>,
}

impl SelectionTree {
    pub fn new(root: &Path) -> Self {
        let mut tree = SelectionTree {
            root: root.to_path_buf(),
            nodes: Vec::new(),
            index: HashMap::new(),
        };
        tree.push_node(root.to_path_buf(), "./".to_string(), true, None);
        tree
    }

    /// Appends a child under `parent`. Children must be added in display
    /// order; the caller is responsible for sorting.
    pub fn add_child(&mut self, parent: NodeId, path: PathBuf, is_dir: bool) -> Option<NodeId> {
        if !self.nodes.get(parent)?.is_dir {
            return None;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let id = self.push_node(path, name, is_dir, Some(parent));
        self.nodes[parent].children.push(id);
        Some(id)
    }

    fn push_node(
        &mut self,
        path: PathBuf,
        name: String,
        is_dir: bool,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.index.insert(path.clone(), id);
        self.nodes.push(Node {
            path,
            name,
            is_dir,
            state: SelectionState::Checked,
            children: Vec::new(),
            parent,
        });
        id
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn state_of(&self, path: &Path) -> Option<SelectionState> {
        self.find(path).map(|id| self.nodes[id].state)
    }

    /// Flips the node the user clicked and restores the tree invariant.
    /// Returns the node's new state.
    pub fn toggle(&mut self, id: NodeId) -> Option<SelectionState> {
        let new_state = self.nodes.get(id)?.state.toggled();
        self.apply_state_and_propagate_down(id, new_state);
        self.update_all_parent_states_from_child(id);
        Some(new_state)
    }

    pub fn set_subtree(&mut self, id: NodeId, checked: bool) {
        if id >= self.nodes.len() {
            return;
        }
        self.apply_state_and_propagate_down(id, SelectionState::from_checked(checked));
        self.update_all_parent_states_from_child(id);
    }

    fn apply_state_and_propagate_down(&mut self, id: NodeId, new_state: SelectionState) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current];
            node.state = new_state;
            stack.extend(node.children.iter().copied());
        }
    }

    fn recalculate_parent_state(&mut self, parent: NodeId) {
        let children = &self.nodes[parent].children;
        if children.is_empty() {
            return;
        }

        let mut checked = 0;
        let mut partial = 0;
        for &child in children {
            match self.nodes[child].state {
                SelectionState::Checked => checked += 1,
                SelectionState::Partial => partial += 1,
                SelectionState::Unchecked => {}
            }
        }
        let total = children.len();
        self.nodes[parent].state = if checked == total {
            SelectionState::Checked
        } else if checked > 0 || partial > 0 {
            SelectionState::Partial
        } else {
            SelectionState::Unchecked
        };
    }

    fn update_all_parent_states_from_child(&mut self, child: NodeId) {
        let mut current = self.nodes[child].parent;
        while let Some(parent) = current {
            self.recalculate_parent_state(parent);
            current = self.nodes[parent].parent;
        }
    }

    /// Node ids in depth-first pre-order, children in insertion order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    pub fn checked_files(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| {
                let node = &self.nodes[id];
                !node.is_dir && node.state == SelectionState::Checked
            })
            .collect()
    }

    pub fn relative_path(&self, id: NodeId) -> Option<&Path> {
        let node = self.nodes.get(id)?;
        Some(node.path.strip_prefix(&self.root).unwrap_or(&node.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ./
    // ├─ a.py
    // ├─ src/
    // │  ├─ lib.rs
    // │  └─ nested/
    // │     ├─ x.c
    // │     └─ y.c
    // └─ z.md
    fn sample_tree() -> SelectionTree {
        let root = Path::new("/proj");
        let mut tree = SelectionTree::new(root);
        tree.add_child(0, root.join("a.py"), false).unwrap();
        let src = tree.add_child(0, root.join("src"), true).unwrap();
        tree.add_child(src, root.join("src/lib.rs"), false).unwrap();
        let nested = tree.add_child(src, root.join("src/nested"), true).unwrap();
        tree.add_child(nested, root.join("src/nested/x.c"), false).unwrap();
        tree.add_child(nested, root.join("src/nested/y.c"), false).unwrap();
        tree.add_child(0, root.join("z.md"), false).unwrap();
        tree
    }

    fn id(tree: &SelectionTree, rel: &str) -> NodeId {
        tree.find(&Path::new("/proj").join(rel)).unwrap()
    }

    fn file_descendants(tree: &SelectionTree, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = tree.node(id).unwrap().children.clone();
        while let Some(child) = stack.pop() {
            let node = tree.node(child).unwrap();
            if node.is_dir {
                stack.extend(node.children.iter().copied());
            } else {
                out.push(child);
            }
        }
        out
    }

    fn assert_consistent(tree: &SelectionTree) {
        for id in 0..tree.len() {
            let node = tree.node(id).unwrap();
            if !node.is_dir {
                assert_ne!(node.state, SelectionState::Partial, "file {:?}", node.path);
                continue;
            }
            let files = file_descendants(tree, id);
            let checked = files
                .iter()
                .filter(|&&f| tree.node(f).unwrap().state == SelectionState::Checked)
                .count();
            let expected = if checked == files.len() {
                SelectionState::Checked
            } else if checked == 0 {
                SelectionState::Unchecked
            } else {
                SelectionState::Partial
            };
            assert_eq!(node.state, expected, "directory {:?}", node.path);
        }
    }

    #[test]
    fn new_tree_is_fully_checked() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 8);
        assert!(
            (0..tree.len()).all(|i| tree.node(i).unwrap().state == SelectionState::Checked)
        );
        assert_consistent(&tree);
    }

    #[test]
    fn toggling_a_file_only_touches_ancestors() {
        let mut tree = sample_tree();
        let x = id(&tree, "src/nested/x.c");
        assert_eq!(tree.toggle(x), Some(SelectionState::Unchecked));

        assert_eq!(tree.node(x).unwrap().state, SelectionState::Unchecked);
        assert_eq!(tree.node(id(&tree, "src/nested/y.c")).unwrap().state, SelectionState::Checked);
        assert_eq!(tree.node(id(&tree, "src/nested")).unwrap().state, SelectionState::Partial);
        assert_eq!(tree.node(id(&tree, "src")).unwrap().state, SelectionState::Partial);
        assert_eq!(tree.node(0).unwrap().state, SelectionState::Partial);
        assert_eq!(tree.node(id(&tree, "a.py")).unwrap().state, SelectionState::Checked);
        assert_consistent(&tree);
    }

    #[test]
    fn toggling_a_directory_propagates_down_and_up() {
        let mut tree = sample_tree();
        let src = id(&tree, "src");
        tree.toggle(src);

        for f in file_descendants(&tree, src) {
            assert_eq!(tree.node(f).unwrap().state, SelectionState::Unchecked);
        }
        assert_eq!(tree.node(id(&tree, "src/nested")).unwrap().state, SelectionState::Unchecked);
        assert_eq!(tree.node(0).unwrap().state, SelectionState::Partial);
        assert_consistent(&tree);
    }

    #[test]
    fn unchecking_every_file_unchecks_the_root() {
        let mut tree = sample_tree();
        for rel in ["a.py", "src/lib.rs", "src/nested/x.c", "src/nested/y.c", "z.md"] {
            let file = id(&tree, rel);
            tree.toggle(file);
        }
        assert_eq!(tree.node(0).unwrap().state, SelectionState::Unchecked);
        assert!(tree.checked_files().is_empty());
        assert_consistent(&tree);
    }

    #[test]
    fn partial_directory_toggles_to_checked() {
        let mut tree = sample_tree();
        tree.toggle(id(&tree, "src/lib.rs"));
        let src = id(&tree, "src");
        assert_eq!(tree.node(src).unwrap().state, SelectionState::Partial);

        assert_eq!(tree.toggle(src), Some(SelectionState::Checked));
        for f in file_descendants(&tree, src) {
            assert_eq!(tree.node(f).unwrap().state, SelectionState::Checked);
        }
        assert_eq!(tree.node(0).unwrap().state, SelectionState::Checked);
        assert_consistent(&tree);
    }

    #[test]
    fn double_toggle_restores_descendants() {
        let mut tree = sample_tree();
        let nested = id(&tree, "src/nested");
        let before: Vec<_> = (0..tree.len()).map(|i| tree.node(i).unwrap().state).collect();

        tree.toggle(nested);
        tree.toggle(nested);

        let after: Vec<_> = (0..tree.len()).map(|i| tree.node(i).unwrap().state).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn invariant_holds_across_a_toggle_sequence() {
        let mut tree = sample_tree();
        // Deterministic walk over every node, several rounds with different strides.
        for stride in [1usize, 3, 5, 2] {
            let mut i = 0;
            for _ in 0..tree.len() * 2 {
                tree.toggle(i % tree.len());
                assert_consistent(&tree);
                i += stride;
            }
        }
    }

    #[test]
    fn set_subtree_forces_a_definite_state() {
        let mut tree = sample_tree();
        tree.toggle(id(&tree, "z.md"));
        tree.set_subtree(0, true);
        assert_eq!(tree.checked_files().len(), 5);
        tree.set_subtree(0, false);
        assert!(tree.checked_files().is_empty());
        assert_consistent(&tree);
    }

    #[test]
    fn checked_files_follow_preorder() {
        let mut tree = sample_tree();
        tree.toggle(id(&tree, "src/nested/y.c"));
        let rels: Vec<_> = tree
            .checked_files()
            .into_iter()
            .map(|f| tree.relative_path(f).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rels,
            vec![
                PathBuf::from("a.py"),
                PathBuf::from("src/lib.rs"),
                PathBuf::from("src/nested/x.c"),
                PathBuf::from("z.md"),
            ]
        );
    }

    #[test]
    fn state_lookup_by_path() {
        let mut tree = sample_tree();
        tree.toggle(id(&tree, "a.py"));
        assert_eq!(
            tree.state_of(Path::new("/proj/a.py")),
            Some(SelectionState::Unchecked)
        );
        assert_eq!(tree.state_of(Path::new("/proj/missing")), None);
    }

    #[test]
    fn out_of_range_and_file_parents_are_rejected() {
        let mut tree = sample_tree();
        assert_eq!(tree.toggle(99), None);
        let a = id(&tree, "a.py");
        assert!(tree.add_child(a, PathBuf::from("/proj/a.py/oops"), false).is_none());
    }

    #[test]
    fn default_tree_is_empty() {
        let tree = SelectionTree::default();
        assert!(tree.is_empty());
        assert!(tree.preorder().is_empty());
        assert!(tree.checked_files().is_empty());
    }
}
