//! The arena-backed element tree.
//!
//! A [`Document`] owns every element in a slot addressed by a stable
//! [`NodeId`]. Typed [`Handle`]s point at slots, parents are a per-slot
//! lookup and each container keeps its children in [`Children`] lists whose
//! discipline decides ordering and uniqueness.
//!
//! Which child kinds a container accepts is expressed statically by the
//! [`Holds`] trait, so `document.add(link, bind)` only compiles for pairs the
//! language allows.

mod children;
mod document;
mod element;
mod handle;
mod key;
mod reference;

pub use children::{Children, Discipline};
pub use document::{Ancestors, Document};
pub use element::{Element, ElementKind, Holds};
pub use handle::{
    CompositionNode, Constituent, Handle, Interface, LayoutDescriptor, NodeId, ReferenceTarget,
    TestRule,
};
pub use key::{KeyPart, SortKey};
pub use reference::{Parameterized, Reference};

pub(crate) use element::Composite;

/// Implements [`Holds`] for one (container, child) pair backed by the given
/// field path.
macro_rules! holds {
    ($parent:ty => $($field:ident).+ : $child:ty) => {
        impl $crate::model::Holds<$child> for $parent {
            fn children(&self) -> &$crate::model::Children {
                &self.$($field).+
            }

            fn children_mut(&mut self) -> &mut $crate::model::Children {
                &mut self.$($field).+
            }
        }
    };
}

/// Implements `Composite` by listing the child collections of a container
/// in canonical order.
macro_rules! composite {
    ($ty:ty { $( $($field:ident).+ ),+ $(,)? }) => {
        impl $crate::model::Composite for $ty {
            fn child_lists(&self) -> Vec<&$crate::model::Children> {
                vec![$( &self.$($field).+ ),+]
            }

            fn child_lists_mut(&mut self) -> Vec<&mut $crate::model::Children> {
                vec![$( &mut self.$($field).+ ),+]
            }
        }
    };
}

pub(crate) use composite;
pub(crate) use holds;
