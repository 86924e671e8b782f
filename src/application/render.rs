/*
Text rendering of a view tree via termtree.

Containers are shown with a trailing '/', so an empty container is still
distinguishable from a plain view.
 */
use termtree::Tree;
use tracing::instrument;

use crate::application::ViewTree;
use crate::domain::ViewNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for ViewNode {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .map(|c| c.snapshot().iter().map(|n| n.to_tree_string()).collect())
            .unwrap_or_default();

        Tree::new(self.to_string()).with_leaves(leaves)
    }
}

impl TreeNodeConvert for ViewTree {
    #[instrument(level = "debug", skip(self), fields(tree = %self.name()))]
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.views().iter().map(|n| n.to_tree_string()).collect();
        Tree::new(self.name().to_string()).with_leaves(leaves)
    }
}
