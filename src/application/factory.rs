//! Default construction of views from requests.

use tracing::debug;

use crate::application::{ApplicationResult, ViewTree};
use crate::domain::{validate_name, CreateMode, DomainError, NodeRequest, ViewNode};
use crate::infrastructure::traits::NodeFactory;

/// Builds leaf, container and copied views.
///
/// Copies resolve their source through the tree being added to, so the usual
/// shadowing rules decide which view is copied when names repeat.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestNodeFactory;

impl NodeFactory for RequestNodeFactory {
    fn construct(&self, request: &NodeRequest, parent: &ViewTree) -> ApplicationResult<ViewNode> {
        let name = validate_name(&request.name)?;
        debug!("construct: name={} mode={:?}", name, request.mode);

        let node = match &request.mode {
            CreateMode::Leaf => ViewNode::leaf(name),
            CreateMode::Container => ViewNode::container(name),
            CreateMode::CopyOf(source) => parent
                .resolve(source)
                .map(|src| src.deep_copy(name))
                .ok_or_else(|| {
                    DomainError::malformed(name, format!("no view named '{source}' to copy"))
                })?,
        };
        Ok(node)
    }
}
