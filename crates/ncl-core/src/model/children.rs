use crate::model::NodeId;

/// How a child collection orders its members and treats duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Sorted by each child's [`SortKey`](crate::model::SortKey); a child
    /// whose key equals an existing member's key is rejected.
    Keyed,
    /// Insertion order; the same element cannot appear twice.
    Ordered,
    /// At most one member; adding replaces the current occupant.
    Single,
}

/// A child collection of a container.
///
/// Membership changes go through [`Document`](crate::model::Document), which
/// keeps parent links in step with the lists.
#[derive(Debug, Clone)]
pub struct Children {
    discipline: Discipline,
    items: Vec<NodeId>,
}

impl Children {
    pub fn keyed() -> Self {
        Self::new(Discipline::Keyed)
    }

    pub fn ordered() -> Self {
        Self::new(Discipline::Ordered)
    }

    pub fn single() -> Self {
        Self::new(Discipline::Single)
    }

    fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            items: Vec::new(),
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Members in iteration order.
    pub fn ids(&self) -> &[NodeId] {
        &self.items
    }

    /// The occupant of a single slot, or the first member of a list.
    pub fn first(&self) -> Option<NodeId> {
        self.items.first().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    pub(crate) fn insert(&mut self, position: usize, id: NodeId) {
        self.items.insert(position, id);
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.items.push(id);
    }

    /// Put `id` in a single slot, returning the displaced occupant.
    pub(crate) fn replace(&mut self, id: NodeId) -> Option<NodeId> {
        let previous = self.items.pop();
        self.items.clear();
        self.items.push(id);
        previous
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> bool {
        match self.items.iter().position(|member| *member == id) {
            Some(position) => {
                self.items.remove(position);
                true
            }
            None => false,
        }
    }
}
