use std::{fmt, hash::Hash, marker::PhantomData};

use crate::model::Element;

/// Stable index of an element slot in a [`Document`](crate::model::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A [`NodeId`] known to address an element of kind `T`.
///
/// `T` is either a concrete element type or one of the family markers
/// ([`CompositionNode`], [`Interface`], ...) used by references whose target
/// may be one of several kinds.
pub struct Handle<T> {
    id: NodeId,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            marker: PhantomData,
        }
    }

    pub fn id(self) -> NodeId {
        self.id
    }
}

// Manual impls: deriving would require `T` to implement each trait.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id.0).finish()
    }
}

impl<T> From<Handle<T>> for NodeId {
    fn from(handle: Handle<T>) -> Self {
        handle.id
    }
}

/// Kinds of element a reference may resolve to.
pub trait ReferenceTarget: 'static {
    /// Returns `true` if `element` is of this kind.
    fn accepts(element: &Element) -> bool;
}

/// Media, context or switch.
pub enum CompositionNode {}

/// Property or port: the anchor a bind or port attaches to.
pub enum Interface {}

/// Descriptor or descriptor switch.
pub enum LayoutDescriptor {}

/// Rule or composite rule.
pub enum TestRule {}

/// Target of a bind rule: a node of a switch or a descriptor of a
/// descriptor switch.
pub enum Constituent {}

impl ReferenceTarget for CompositionNode {
    fn accepts(element: &Element) -> bool {
        matches!(
            element,
            Element::Media(_) | Element::Context(_) | Element::Switch(_)
        )
    }
}

impl ReferenceTarget for Interface {
    fn accepts(element: &Element) -> bool {
        matches!(element, Element::Property(_) | Element::Port(_))
    }
}

impl ReferenceTarget for LayoutDescriptor {
    fn accepts(element: &Element) -> bool {
        matches!(
            element,
            Element::Descriptor(_) | Element::DescriptorSwitch(_)
        )
    }
}

impl ReferenceTarget for TestRule {
    fn accepts(element: &Element) -> bool {
        matches!(element, Element::Rule(_) | Element::CompositeRule(_))
    }
}

impl ReferenceTarget for Constituent {
    fn accepts(element: &Element) -> bool {
        CompositionNode::accepts(element) || matches!(element, Element::Descriptor(_))
    }
}
