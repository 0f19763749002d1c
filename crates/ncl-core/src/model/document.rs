use std::{
    any::type_name,
    iter,
    ops::{Index, IndexMut},
};

use log::trace;

use crate::{
    config::ModelConfig,
    elements::Ncl,
    error::{Diagnostic, Diagnostics},
    model::{Discipline, Element, ElementKind, Handle, Holds, NodeId, SortKey},
};

#[derive(Debug, Clone)]
struct Slot {
    parent: Option<NodeId>,
    diagnostics: Diagnostics,
    element: Element,
}

/// An NCL document: the arena owning every element.
///
/// Elements are created with [`Document::create`], which returns a typed
/// [`Handle`], and attached to containers with [`Document::add`]. An element
/// has at most one parent; the parent is a lookup ([`Document::parent`])
/// rather than a stored back-pointer.
///
/// # Example
///
/// ```
/// # use ncl_core::{elements::{Body, Media}, identifier::Id, model::Document};
/// let mut doc = Document::new();
/// let root = doc.root();
/// let body = doc.create(Body::new());
/// assert!(doc.add(root, body));
///
/// let mut media = Media::new();
/// media.set_id(Id::parse("video").unwrap());
/// let media = doc.create(media);
/// assert!(doc.add(body, media));
/// assert!(doc.has_id::<_, Media>(body, "video"));
/// assert_eq!(doc.parent(media), Some(body.id()));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    root: Handle<Ncl>,
    config: ModelConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty `<ncl>` root.
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            root: Handle::new(NodeId::new(0)),
            config,
        };
        doc.root = doc.create(Ncl::new());
        doc
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The `<ncl>` root element.
    pub fn root(&self) -> Handle<Ncl> {
        self.root
    }

    /// Number of elements created in this document, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores `element` in a new, detached slot.
    pub fn create<T: ElementKind>(&mut self, element: T) -> Handle<T> {
        let id = NodeId::new(self.slots.len());
        self.slots.push(Slot {
            parent: None,
            diagnostics: Diagnostics::new(),
            element: element.into(),
        });
        Handle::new(id)
    }

    pub fn element(&self, id: impl Into<NodeId>) -> Option<&Element> {
        self.slots.get(id.into().index()).map(|slot| &slot.element)
    }

    pub fn element_mut(&mut self, id: impl Into<NodeId>) -> Option<&mut Element> {
        self.slots
            .get_mut(id.into().index())
            .map(|slot| &mut slot.element)
    }

    pub fn get<T: ElementKind>(&self, handle: Handle<T>) -> Option<&T> {
        self.element(handle).and_then(T::from_element)
    }

    pub fn get_mut<T: ElementKind>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.element_mut(handle).and_then(T::from_element_mut)
    }

    /// A typed handle for `id`, if it addresses an element of kind `T`.
    pub fn cast<T: ElementKind>(&self, id: NodeId) -> Option<Handle<T>> {
        self.element(id)
            .and_then(T::from_element)
            .map(|_| Handle::new(id))
    }

    pub fn parent(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.slots.get(id.into().index()).and_then(|slot| slot.parent)
    }

    /// The parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: impl Into<NodeId>) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Diagnostics recorded for `id` and its descendants by the last
    /// resolution or validation pass.
    pub fn diagnostics(&self, id: impl Into<NodeId>) -> Option<&Diagnostics> {
        self.slots
            .get(id.into().index())
            .map(|slot| &slot.diagnostics)
    }

    pub fn errors(&self, id: impl Into<NodeId>) -> &[Diagnostic] {
        self.diagnostics(id)
            .map(Diagnostics::errors)
            .unwrap_or_default()
    }

    pub fn warnings(&self, id: impl Into<NodeId>) -> &[Diagnostic] {
        self.diagnostics(id)
            .map(Diagnostics::warnings)
            .unwrap_or_default()
    }

    pub(crate) fn diagnostics_mut(&mut self, id: NodeId) -> Option<&mut Diagnostics> {
        self.slots
            .get_mut(id.index())
            .map(|slot| &mut slot.diagnostics)
    }

    /// Every child of `id`, across all of its collections, in canonical
    /// order.
    pub fn child_ids(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        self.element(id)
            .map(|element| {
                element
                    .child_lists()
                    .into_iter()
                    .flat_map(|list| list.ids().iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Adds `child` to the collection `parent` keeps for children of kind
    /// `C`.
    ///
    /// Returns `false`, leaving the document unchanged, when the child is
    /// already a member, when a key-ordered collection already holds a child
    /// with an equal key, when the new child would make `parent` (or one of
    /// its ancestors) equal to a sibling, or when the insertion would make
    /// an element its own ancestor. Adding to a single slot replaces the
    /// occupant, whose parent link is cleared.
    ///
    /// With [`ModelConfig::detach_on_add`] the child is first removed from
    /// its previous container.
    pub fn add<P, C>(&mut self, parent: Handle<P>, child: Handle<C>) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        let (parent_id, child_id) = (parent.id(), child.id());
        if self.get(child).is_none() {
            return false;
        }
        if parent_id == child_id || self.ancestors(parent_id).any(|id| id == child_id) {
            trace!(parent:? = parent_id, child:? = child_id; "Rejected child that would create a cycle");
            return false;
        }

        let Some(list) = self.get(parent).map(|p| <P as Holds<C>>::children(p)) else {
            return false;
        };
        if list.contains(child_id) {
            return false;
        }
        let discipline = list.discipline();
        let key = self.sort_key(child_id);
        let position = match discipline {
            Discipline::Keyed => match self.keyed_position(list.ids(), &key) {
                Some(position) => position,
                None => {
                    trace!(parent:? = parent_id, child:? = child_id; "Rejected duplicate child");
                    return false;
                }
            },
            Discipline::Ordered | Discipline::Single => 0,
        };

        let Some(list) = self.get_mut(parent).map(|p| <P as Holds<C>>::children_mut(p)) else {
            return false;
        };
        let displaced = match discipline {
            Discipline::Keyed => {
                list.insert(position, child_id);
                None
            }
            Discipline::Ordered => {
                list.push(child_id);
                None
            }
            Discipline::Single => list.replace(child_id),
        };

        // The new child changes the keys of `parent` and its ancestors.
        let chain: Vec<NodeId> = iter::once(parent_id).chain(self.ancestors(parent_id)).collect();
        if chain.iter().any(|id| self.has_equal_sibling(*id)) {
            if let Some(list) = self.get_mut(parent).map(|p| <P as Holds<C>>::children_mut(p)) {
                list.remove(child_id);
                if let Some(displaced) = displaced {
                    list.replace(displaced);
                }
            }
            trace!(parent:? = parent_id, child:? = child_id; "Rejected child that makes its container a duplicate");
            return false;
        }

        let previous = self.parent(child_id);
        if self.config.detach_on_add() {
            if let Some(previous) = previous {
                self.detach(previous, child_id);
            }
        }
        if let Some(displaced) = displaced {
            self.clear_parent(displaced, parent_id);
        }
        if let Some(slot) = self.slots.get_mut(child_id.index()) {
            slot.parent = Some(parent_id);
        }

        self.reposition_chain(parent_id);
        if let Some(previous) = previous.filter(|_| self.config.detach_on_add()) {
            self.reposition_chain(previous);
        }
        true
    }

    /// Applies `change` to an element and moves it, and every element
    /// enclosing it, to where its new key belongs.
    ///
    /// Changing an attached element through `IndexMut` skips this step;
    /// changes to attributes a key-ordered collection compares on belong
    /// here. Returns `false`, undoing the change, when the element or one of
    /// its ancestors would end up equal to a sibling.
    ///
    /// # Example
    ///
    /// ```
    /// # use ncl_core::{elements::{Body, Media}, identifier::Id, model::Document};
    /// let mut doc = Document::new();
    /// let body = doc.create(Body::new());
    /// let video = doc.create(Media::new());
    /// let audio = doc.create(Media::new());
    /// assert!(doc.update(video, |m| m.set_id(Id::parse("video").unwrap())));
    /// assert!(doc.add(body, video));
    /// assert!(doc.add(body, audio));
    ///
    /// assert!(!doc.update(audio, |m| m.set_id(Id::parse("video").unwrap())));
    /// assert!(doc.update(audio, |m| m.set_id(Id::parse("zaudio").unwrap())));
    /// assert_eq!(doc.children::<_, Media>(body), [video.id(), audio.id()]);
    /// ```
    pub fn update<T: ElementKind>(
        &mut self,
        handle: Handle<T>,
        change: impl FnOnce(&mut T),
    ) -> bool {
        let id = handle.id();
        let Some(before) = self.element(id).cloned() else {
            return false;
        };
        let Some(element) = self.get_mut(handle) else {
            return false;
        };
        change(element);
        if self.reposition_chain(id) {
            return true;
        }

        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.element = before;
        }
        self.reposition_chain(id);
        trace!(node:? = id; "Rejected change that makes an element a duplicate");
        false
    }

    /// Moves `id` to where its current key belongs in the key-ordered
    /// collection holding it.
    ///
    /// Returns `false` when another member of that collection has an equal
    /// key; `id` then sits next to it.
    pub fn reposition(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        let Some((parent, index, others)) = self.keyed_siblings(id) else {
            return true;
        };
        let key = self.sort_key(id);
        let (position, unique) = match others.binary_search_by(|m| self.sort_key(*m).cmp(&key)) {
            Ok(position) => (position, false),
            Err(position) => (position, true),
        };
        if let Some(slot) = self.slots.get_mut(parent.index()) {
            if let Some(list) = slot.element.child_lists_mut().into_iter().nth(index) {
                list.remove(id);
                list.insert(position, id);
            }
        }
        unique
    }

    /// Removes `child` from `parent` and clears its parent link.
    ///
    /// Returns `false` if `child` was not a member.
    pub fn remove<P, C>(&mut self, parent: Handle<P>, child: Handle<C>) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        let removed = self
            .get_mut(parent)
            .is_some_and(|p| <P as Holds<C>>::children_mut(p).remove(child.id()));
        if removed {
            self.clear_parent(child.id(), parent.id());
            self.reposition_chain(parent.id());
        }
        removed
    }

    /// Removes the child of kind `C` whose id (or name) is `id`.
    pub fn remove_id<P, C>(&mut self, parent: Handle<P>, id: &str) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        match self.find_child::<P, C>(parent, id) {
            Some(child) => self.remove(parent, child),
            None => false,
        }
    }

    pub fn has<P, C>(&self, parent: Handle<P>, child: Handle<C>) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        self.children::<P, C>(parent).contains(&child.id())
    }

    /// Returns `true` if `parent` holds a child of kind `C` whose id (or
    /// name) is `id`.
    pub fn has_id<P, C>(&self, parent: Handle<P>, id: &str) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        self.find_child::<P, C>(parent, id).is_some()
    }

    /// Returns `true` if `parent` holds at least one child of kind `C`.
    pub fn has_any<P, C>(&self, parent: Handle<P>) -> bool
    where
        P: Holds<C>,
        C: ElementKind,
    {
        self.children::<P, C>(parent)
            .iter()
            .any(|child| self.cast::<C>(*child).is_some())
    }

    /// The collection `parent` keeps for children of kind `C`. Collections
    /// shared by several kinds (the nodes of a context) list all of them.
    pub fn children<P, C>(&self, parent: Handle<P>) -> &[NodeId]
    where
        P: Holds<C>,
        C: ElementKind,
    {
        self.get(parent)
            .map(|p| <P as Holds<C>>::children(p).ids())
            .unwrap_or_default()
    }

    /// The child of kind `C` whose id (or name) is `id`.
    pub fn find_child<P, C>(&self, parent: Handle<P>, id: &str) -> Option<Handle<C>>
    where
        P: Holds<C>,
        C: ElementKind,
    {
        self.children::<P, C>(parent).iter().find_map(|child| {
            let element = self.element(*child)?;
            let label = element.label()?;
            (C::from_element(element).is_some() && label == id).then(|| Handle::new(*child))
        })
    }

    /// Where `key` belongs in a key-ordered list, or `None` when a member
    /// already has an equal key.
    fn keyed_position(&self, ids: &[NodeId], key: &SortKey) -> Option<usize> {
        ids.binary_search_by(|member| self.sort_key(*member).cmp(key))
            .err()
    }

    /// Repositions `id` and each of its ancestors, nearest first.
    fn reposition_chain(&mut self, id: NodeId) -> bool {
        let chain: Vec<NodeId> = iter::once(id).chain(self.ancestors(id)).collect();
        chain
            .into_iter()
            .fold(true, |unique, id| self.reposition(id) && unique)
    }

    /// The key-ordered list holding `id` in its parent: the parent, the
    /// list's position among the parent's child lists and the other members.
    fn keyed_siblings(&self, id: NodeId) -> Option<(NodeId, usize, Vec<NodeId>)> {
        let parent = self.parent(id)?;
        let element = self.element(parent)?;
        element
            .child_lists()
            .into_iter()
            .enumerate()
            .find_map(|(index, list)| {
                (list.discipline() == Discipline::Keyed && list.contains(id)).then(|| {
                    let others = list.ids().iter().copied().filter(|m| *m != id).collect();
                    (parent, index, others)
                })
            })
    }

    fn has_equal_sibling(&self, id: NodeId) -> bool {
        let Some((_, _, others)) = self.keyed_siblings(id) else {
            return false;
        };
        let key = self.sort_key(id);
        others.iter().any(|other| self.sort_key(*other) == key)
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(slot) = self.slots.get_mut(parent.index()) {
            for list in slot.element.child_lists_mut() {
                list.remove(child);
            }
        }
        self.clear_parent(child, parent);
    }

    fn clear_parent(&mut self, child: NodeId, parent: NodeId) {
        if let Some(slot) = self.slots.get_mut(child.index()) {
            if slot.parent == Some(parent) {
                slot.parent = None;
            }
        }
    }
}

/// Iterator over the parent chain of an element.
pub struct Ancestors<'doc> {
    doc: &'doc Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

impl<T: ElementKind> Index<Handle<T>> for Document {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `handle` does not address an element of kind `T` in this
    /// document.
    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(element) => element,
            None => panic!("{handle:?} does not address a {}", type_name::<T>()),
        }
    }
}

impl<T: ElementKind> IndexMut<Handle<T>> for Document {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        match self.get_mut(handle) {
            Some(element) => element,
            None => panic!("{handle:?} does not address a {}", type_name::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        elements::{Bind, Body, Context, Head, Link, Media, Property, SetAttribute, Switch},
        identifier::Id,
    };

    fn media(doc: &mut Document, id: &str) -> Handle<Media> {
        let mut media = Media::new();
        media.set_id(Id::parse(id).unwrap());
        doc.create(media)
    }

    fn context(doc: &mut Document, id: &str) -> Handle<Context> {
        let mut context = Context::new();
        context.set_id(Id::parse(id).unwrap());
        doc.create(context)
    }

    #[test]
    fn test_new_document_has_root() {
        let doc = Document::new();

        assert_eq!(doc.node_count(), 1);
        assert!(doc.get(doc.root()).is_some());
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_keyed_children_are_sorted() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let zeta = media(&mut doc, "zeta");
        let alpha = media(&mut doc, "alpha");
        let middle = context(&mut doc, "middle");

        assert!(doc.add(body, zeta));
        assert!(doc.add(body, alpha));
        assert!(doc.add(body, middle));

        assert_eq!(
            doc.children::<_, Media>(body),
            [alpha.id(), middle.id(), zeta.id()]
        );
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let first = media(&mut doc, "video");
        let second = context(&mut doc, "video");

        assert!(doc.add(body, first));
        assert!(!doc.add(body, second));
        assert!(!doc.add(body, first));

        assert_eq!(doc[body].nodes().len(), 1);
        assert_eq!(doc.parent(second), None);
    }

    #[test]
    fn test_add_detaches_from_previous_parent() {
        let mut doc = Document::new();
        let outer = context(&mut doc, "outer");
        let inner = context(&mut doc, "inner");
        let video = media(&mut doc, "video");

        assert!(doc.add(outer, video));
        assert!(doc.add(inner, video));

        assert!(!doc.has(outer, video));
        assert!(doc.has(inner, video));
        assert_eq!(doc.parent(video), Some(inner.id()));
    }

    #[test]
    fn test_add_without_detaching() {
        let mut doc = Document::with_config(ModelConfig::new(false));
        let outer = context(&mut doc, "outer");
        let inner = context(&mut doc, "inner");
        let video = media(&mut doc, "video");

        assert!(doc.add(outer, video));
        assert!(doc.add(inner, video));

        assert!(doc.has(outer, video));
        assert_eq!(doc.parent(video), Some(inner.id()));
    }

    #[test]
    fn test_single_slot_replaces_occupant() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.create(Head::new());
        let second = doc.create(Head::new());

        assert!(doc.add(root, first));
        assert!(doc.add(root, second));

        assert_eq!(doc[root].head().ids(), [second.id()]);
        assert_eq!(doc.parent(first), None);
        assert_eq!(doc.parent(second), Some(root.id()));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let outer = context(&mut doc, "outer");
        let inner = context(&mut doc, "inner");

        assert!(doc.add(outer, inner));
        assert!(!doc.add(inner, outer));
        assert!(!doc.add(outer, outer));
        assert_eq!(doc.ancestors(inner).collect::<Vec<_>>(), [outer.id()]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let video = media(&mut doc, "video");
        let menu = doc.create(Switch::new());

        assert!(doc.add(body, video));
        assert!(doc.add(body, menu));
        assert!(doc.has_id::<_, Media>(body, "video"));
        assert!(!doc.has_id::<_, Context>(body, "video"));
        assert!(doc.has_any::<_, Media>(body));
        assert!(!doc.has_any::<_, Link>(body));

        assert!(doc.remove_id::<_, Media>(body, "video"));
        assert!(!doc.remove_id::<_, Media>(body, "video"));
        assert_eq!(doc.parent(video), None);
        assert!(!doc.has_any::<_, Media>(body));
    }

    #[test]
    fn test_named_children_use_name_as_label() {
        let mut doc = Document::new();
        let video = media(&mut doc, "video");
        let mut property = Property::new();
        property.set_name(Id::parse("bounds").unwrap());
        let property = doc.create(property);

        assert!(doc.add(video, property));
        assert_eq!(doc.find_child::<_, Property>(video, "bounds"), Some(property));
        assert!(doc.remove(video, property));
        assert!(!doc.remove(video, property));
    }

    fn bind(doc: &mut Document, component: &str) -> Handle<Bind> {
        let mut bind = Bind::new();
        bind.set_attribute("role", "start").unwrap();
        bind.set_attribute("component", component).unwrap();
        doc.create(bind)
    }

    fn link_with_binds(doc: &mut Document, components: &[&str]) -> Handle<Link> {
        let link = doc.create(Link::new());
        for component in components {
            let bind = bind(doc, component);
            assert!(doc.add(link, bind));
        }
        link
    }

    #[test]
    fn test_growing_link_moves_to_its_place() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let short = link_with_binds(&mut doc, &["a"]);
        let long = link_with_binds(&mut doc, &["a", "b"]);
        assert!(doc.add(body, long));
        assert!(doc.add(body, short));
        assert_eq!(doc[body].links().ids(), [short.id(), long.id()]);

        let bind = bind(&mut doc, "c");
        assert!(doc.add(short, bind));
        assert_eq!(doc[body].links().ids(), [long.id(), short.id()]);

        assert!(doc.remove(short, bind));
        assert_eq!(doc[body].links().ids(), [short.id(), long.id()]);
    }

    #[test]
    fn test_child_making_container_a_duplicate_is_rejected() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let first = link_with_binds(&mut doc, &["a", "b"]);
        let second = link_with_binds(&mut doc, &["a"]);
        assert!(doc.add(body, first));
        assert!(doc.add(body, second));

        let bind = bind(&mut doc, "b");

        assert!(!doc.add(second, bind));
        assert_eq!(doc[second].binds().len(), 1);
        assert_eq!(doc.parent(bind), None);
        assert_eq!(doc[body].links().len(), 2);
    }

    #[test]
    fn test_update_keeps_order_and_rejects_duplicates() {
        let mut doc = Document::new();
        let body = doc.create(Body::new());
        let alpha = media(&mut doc, "alpha");
        let beta = media(&mut doc, "beta");
        assert!(doc.add(body, alpha));
        assert!(doc.add(body, beta));

        assert!(doc.update(alpha, |m| m.set_id(Id::parse("omega").unwrap())));
        assert_eq!(doc.children::<_, Media>(body), [beta.id(), alpha.id()]);

        assert!(!doc.update(alpha, |m| m.set_id(Id::parse("beta").unwrap())));
        assert_eq!(doc[alpha].id().unwrap(), "omega");
        assert_eq!(doc.children::<_, Media>(body), [beta.id(), alpha.id()]);
    }

    #[test]
    fn test_cast_checks_kind() {
        let mut doc = Document::new();
        let video = media(&mut doc, "video");

        assert_eq!(doc.cast::<Media>(video.id()), Some(video));
        assert_eq!(doc.cast::<Context>(video.id()), None);
        assert_eq!(doc.element(video).map(Element::tag), Some("media"));
    }
}
