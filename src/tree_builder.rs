use crate::selection::{NodeId, SelectionTree};

/// Build pretty tree-style labels in **O(n)**, one per node in pre-order.
///
/// The root renders as `./`, directories get a trailing `/`.
pub fn build_tree_labels(tree: &SelectionTree) -> Vec<(NodeId, String)> {
    let mut labels = Vec::with_capacity(tree.len());
    if tree.is_empty() {
        return labels;
    }

    // Each stack entry carries the prefix inherited from its ancestors, i.e.
    // one "│  " or "   " column per ancestor below the root.
    let mut stack: Vec<(NodeId, String, bool)> = vec![(0, String::new(), true)];
    while let Some((id, inherited, is_last)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };

        let child_prefix = if node.parent.is_none() {
            labels.push((id, "./".to_string()));
            String::new()
        } else {
            let branch = if is_last { "└─ " } else { "├─ " };
            let suffix = if node.is_dir { "/" } else { "" };
            labels.push((id, format!("{}{}{}{}", inherited, branch, node.name, suffix)));
            format!("{}{}", inherited, if is_last { "   " } else { "│  " })
        };

        let count = node.children.len();
        for (pos, &child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_prefix.clone(), pos + 1 == count));
        }
    }
    labels
}
