//! Element model: nodes, their children, and borrowed views into a tree.

pub(crate) mod children;
pub(crate) mod element;
pub(crate) mod item_ref;

pub use children::Children;
pub use element::{Access, Detail, DocElement, DocKind, Heritage, Meta, ParentRef, Returns};
pub use item_ref::ElementRef;
