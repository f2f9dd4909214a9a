//! Node visitor plumbing for route-aware validation.

use crate::{error::ErrorTree, node::ValidateNode};

///
/// Visitor
///

pub trait Visitor {
    fn enter(&mut self, key: &str);
    fn exit(&mut self);
    fn check(&mut self, node: &dyn ValidateNode);
}

///
/// ValidateVisitor
///
/// Runs each node's local validation and aggregates failures under the
/// dotted route accumulated while descending.
///

#[derive(Debug, Default)]
pub struct ValidateVisitor {
    pub errors: ErrorTree,
    route: Vec<String>,
}

impl ValidateVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self) -> String {
        self.route.join(".")
    }
}

impl Visitor for ValidateVisitor {
    fn enter(&mut self, key: &str) {
        self.route.push(key.to_string());
    }

    fn exit(&mut self) {
        self.route.pop();
    }

    fn check(&mut self, node: &dyn ValidateNode) {
        if let Err(tree) = node.validate() {
            let route = self.route();
            self.errors.merge_under(&route, tree);
        }
    }
}
