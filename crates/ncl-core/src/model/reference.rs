use std::fmt;

use crate::{
    elements::ConnectorParam,
    identifier::Id,
    model::{Handle, NodeId},
};

enum Target<T> {
    Pending,
    Resolved(Handle<T>),
    Unresolved,
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Target<T> {}

impl<T> PartialEq for Target<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::Resolved(left), Target::Resolved(right)) => left == right,
            (Target::Pending, Target::Pending) | (Target::Unresolved, Target::Unresolved) => true,
            _ => false,
        }
    }
}

/// A reference attribute: an identifier that points at another element.
///
/// A reference starts as a placeholder carrying only the identifier. The
/// resolver pass either links it to the element with that identifier in the
/// attribute's lookup scope, or marks it unresolved and records a warning.
///
/// # Examples
///
/// ```
/// use ncl_core::{elements::CausalConnector, identifier::Id, model::Reference};
///
/// let reference: Reference<CausalConnector> = Reference::placeholder(Id::parse("onBeginStart").unwrap());
/// assert!(reference.is_placeholder());
/// assert!(reference.target().is_none());
/// ```
pub struct Reference<T> {
    id: Id,
    target: Target<T>,
}

impl<T> Reference<T> {
    /// A reference waiting for resolution.
    pub fn placeholder(id: Id) -> Self {
        Self {
            id,
            target: Target::Pending,
        }
    }

    /// A reference already linked to `target`, whose identifier is `id`.
    pub fn resolved(id: Id, target: Handle<T>) -> Self {
        Self {
            id,
            target: Target::Resolved(target),
        }
    }

    /// The identifier this reference was created with.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The resolved element, if resolution succeeded.
    pub fn target(&self) -> Option<Handle<T>> {
        match self.target {
            Target::Resolved(handle) => Some(handle),
            Target::Pending | Target::Unresolved => None,
        }
    }

    /// The resolved element's slot, if resolution succeeded.
    pub fn target_id(&self) -> Option<NodeId> {
        self.target().map(Handle::id)
    }

    /// Returns `true` before the resolver has visited this reference.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.target, Target::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.target, Target::Resolved(_))
    }

    /// Returns `true` if the resolver found no matching element.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.target, Target::Unresolved)
    }

    /// The identifier still to look up, or `None` if already resolved.
    pub(crate) fn pending_id(&self) -> Option<Id> {
        match self.target {
            Target::Resolved(_) => None,
            Target::Pending | Target::Unresolved => Some(self.id),
        }
    }

    pub(crate) fn settle(&mut self, found: Option<NodeId>) {
        self.target = match found {
            Some(id) => Target::Resolved(Handle::new(id)),
            None => Target::Unresolved,
        };
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Reference<T> {}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.target == other.target
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Reference");
        debug.field("id", &self.id);
        match self.target {
            Target::Pending => debug.field("target", &"pending"),
            Target::Resolved(handle) => debug.field("target", &handle),
            Target::Unresolved => debug.field("target", &"unresolved"),
        };
        debug.finish()
    }
}

/// A value given literally or through a connector parameter (`$name`).
///
/// Holding both in one enum makes the literal and the parameterized forms
/// mutually exclusive: assigning one replaces the other.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameterized<T> {
    Value(T),
    Param(Reference<ConnectorParam>),
}

impl<T> Parameterized<T> {
    /// A parameter placeholder for the connector parameter `name`.
    pub fn param(name: Id) -> Self {
        Parameterized::Param(Reference::placeholder(name))
    }

    /// The literal value, if this is not parameterized.
    pub fn value(&self) -> Option<&T> {
        match self {
            Parameterized::Value(value) => Some(value),
            Parameterized::Param(_) => None,
        }
    }

    /// The parameter reference, if this is parameterized.
    pub fn as_param(&self) -> Option<&Reference<ConnectorParam>> {
        match self {
            Parameterized::Value(_) => None,
            Parameterized::Param(reference) => Some(reference),
        }
    }

    pub(crate) fn as_param_mut(&mut self) -> Option<&mut Reference<ConnectorParam>> {
        match self {
            Parameterized::Value(_) => None,
            Parameterized::Param(reference) => Some(reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::CausalConnector;

    #[test]
    fn test_reference_states() {
        let id = Id::parse("conn").unwrap();
        let mut reference: Reference<CausalConnector> = Reference::placeholder(id);

        assert!(reference.is_placeholder());
        assert_eq!(reference.pending_id(), Some(id));

        reference.settle(None);
        assert!(reference.is_unresolved());
        // Unresolved references are retried on the next pass.
        assert_eq!(reference.pending_id(), Some(id));

        reference.settle(Some(NodeId::new(4)));
        assert!(reference.is_resolved());
        assert_eq!(reference.target_id(), Some(NodeId::new(4)));
        assert_eq!(reference.pending_id(), None);
    }

    #[test]
    fn test_parameterized_accessors() {
        let literal: Parameterized<u32> = Parameterized::Value(3);
        assert_eq!(literal.value(), Some(&3));
        assert!(literal.as_param().is_none());

        let param: Parameterized<u32> = Parameterized::param(Id::parse("delayParam").unwrap());
        assert!(param.value().is_none());
        assert_eq!(param.as_param().map(Reference::id), Id::parse("delayParam").ok());
    }
}
