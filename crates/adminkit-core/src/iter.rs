use crate::form::{Form, FormBuilder, FormView};

///
/// TreeNode
///
/// Shared traversal surface over the form definition tree and the
/// post-render view tree. Both adapters feed the same search core.
///

pub trait TreeNode: Sized {
    fn node_name(&self) -> &str;
    fn child_nodes(&self) -> &[Self];
}

impl TreeNode for FormBuilder {
    fn node_name(&self) -> &str {
        self.name()
    }

    fn child_nodes(&self) -> &[Self] {
        self.children()
    }
}

impl TreeNode for FormView {
    fn node_name(&self) -> &str {
        self.name()
    }

    fn child_nodes(&self) -> &[Self] {
        self.children()
    }
}

impl TreeNode for Form {
    fn node_name(&self) -> &str {
        self.name()
    }

    fn child_nodes(&self) -> &[Self] {
        self.children()
    }
}

///
/// TreeIter
///
/// Pre-order, self-first, depth-first, left-to-right traversal yielding
/// `(name, node)` pairs. Every node is visited exactly once.
///

pub struct TreeIter<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: TreeNode> TreeIter<'a, N> {
    #[must_use]
    pub fn new(root: &'a N) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, N: TreeNode> Iterator for TreeIter<'a, N> {
    type Item = (&'a str, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // children pushed in reverse so siblings pop left-to-right
        for child in node.child_nodes().iter().rev() {
            self.stack.push(child);
        }

        Some((node.node_name(), node))
    }
}

/// Locate the first node named `target` in pre-order, self-first,
/// depth-first, left-to-right order. Matching is by exact name equality
/// and is not path-qualified: when two nodes at different depths share a
/// name, the first one encountered in traversal order wins. That
/// ambiguity is preserved deliberately for compatibility with existing
/// form layouts.
///
/// Returns `None` when no node matches; the caller decides whether that
/// is fatal.
#[must_use]
pub fn find_by_name<'a, N: TreeNode>(root: &'a N, target: &str) -> Option<&'a N> {
    TreeIter::new(root)
        .find(|(name, _)| *name == target)
        .map(|(_, node)| node)
}

///
/// TESTS
///
