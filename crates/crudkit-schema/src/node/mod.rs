mod attribute;
mod kind;
mod store;

pub use attribute::{Allowed, AttributeSpec};
pub use kind::KindSchema;
pub use store::SchemaStore;

use crate::{error::ErrorTree, visit::Visitor};

///
/// ValidateNode
///

pub trait ValidateNode {
    /// Check local structural invariants.
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// VisitableNode
///

pub trait VisitableNode: ValidateNode {
    /// Route segment this node contributes to error paths.
    fn route_key(&self) -> String {
        String::new()
    }

    /// Drive the visitor into child nodes.
    fn drive<V: Visitor>(&self, _: &mut V) {}

    fn accept<V: Visitor>(&self, v: &mut V)
    where
        Self: Sized,
    {
        let key = self.route_key();
        if key.is_empty() {
            v.check(self);
            self.drive(v);
        } else {
            v.enter(&key);
            v.check(self);
            self.drive(v);
            v.exit();
        }
    }
}
