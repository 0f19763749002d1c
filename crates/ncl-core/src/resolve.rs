//! Reference resolution.
//!
//! Resolution runs once construction is complete, as a preorder walk over
//! the whole tree. Each reference attribute still holding a placeholder is
//! looked up in the scope its attribute implies:
//!
//! - the base collections of `<head>` (connectors, rules, descriptors,
//!   transitions), reached through a [`ResolutionContext`] built once per
//!   pass,
//! - the children of one container (a switch's default component, a port's
//!   component),
//! - or every element nested in the body (a rule's tested property, a
//!   context's `refer`).
//!
//! A miss leaves the reference unresolved and records one warning on the
//! referencing element. Diagnostics produced below a container are merged
//! into it on the way back up.

use log::{debug, info, trace};

use crate::{
    elements::{
        Bind, BindRule, CompoundAction, CompoundCondition, Context, Descriptor, DescriptorSwitch,
        Head, Link, Media, Param, Port, Rule, SimpleAction, SimpleCondition, Switch,
    },
    error::{Diagnostic, Diagnostics, ErrorCode},
    identifier::Id,
    model::{Document, Element, ElementKind, NodeId, Reference, ReferenceTarget},
};

/// The document-level collections base-scoped references resolve against.
#[derive(Debug, Clone, Copy, Default)]
struct ResolutionContext {
    body: Option<NodeId>,
    connector_base: Option<NodeId>,
    rule_base: Option<NodeId>,
    descriptor_base: Option<NodeId>,
    transition_base: Option<NodeId>,
}

impl ResolutionContext {
    fn new(doc: &Document) -> Self {
        let ncl = doc.get(doc.root());
        let head = ncl
            .and_then(|ncl| ncl.head().first())
            .and_then(|id| doc.cast::<Head>(id))
            .and_then(|head| doc.get(head));
        Self {
            body: ncl.and_then(|ncl| ncl.body().first()),
            connector_base: head.and_then(|head| head.connector_base().first()),
            rule_base: head.and_then(|head| head.rule_base().first()),
            descriptor_base: head.and_then(|head| head.descriptor_base().first()),
            transition_base: head.and_then(|head| head.transition_base().first()),
        }
    }
}

/// The enclosing elements that scope local references.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    composition: Option<NodeId>,
    connector: Option<NodeId>,
    link: Option<NodeId>,
}

/// Where a reference is looked up.
#[derive(Debug, Clone, Copy)]
enum Search {
    /// The children of a container.
    Children(Option<NodeId>),
    /// A container or one of its children.
    SelfOrChildren(Option<NodeId>),
    /// Every element nested in a container, in preorder.
    Descendants(Option<NodeId>),
}

struct Resolver<'doc> {
    doc: &'doc mut Document,
    context: ResolutionContext,
}

impl Resolver<'_> {
    fn resolve_node(&mut self, id: NodeId, scope: Scope) -> Diagnostics {
        let mut produced = Diagnostics::new();
        self.resolve_own(id, scope, &mut produced);

        let inner = self.enter(id, scope);
        for child in self.doc.child_ids(id) {
            let from_child = self.resolve_node(child, inner);
            produced.merge(&from_child);
        }

        if let Some(diagnostics) = self.doc.diagnostics_mut(id) {
            diagnostics.retain(|d| !d.code().is_some_and(|code| code.is_resolution()));
            diagnostics.merge(&produced);
        }
        produced
    }

    fn enter(&self, id: NodeId, scope: Scope) -> Scope {
        match self.doc.element(id) {
            Some(Element::Body(_) | Element::Context(_)) => Scope {
                composition: Some(id),
                ..scope
            },
            Some(Element::CausalConnector(_)) => Scope {
                connector: Some(id),
                ..scope
            },
            Some(Element::Link(_)) => Scope {
                link: Some(id),
                ..scope
            },
            _ => scope,
        }
    }

    fn resolve_own(&mut self, id: NodeId, scope: Scope, produced: &mut Diagnostics) {
        let context = self.context;
        match self.doc.element(id) {
            Some(Element::Rule(_)) => self.settle(
                id,
                "var",
                Rule::var_mut,
                Search::Descendants(context.body),
                produced,
            ),
            Some(Element::Descriptor(_)) => {
                let transitions = Search::Children(context.transition_base);
                self.settle(
                    id,
                    "transIn",
                    |d: &mut Descriptor| d.transitions_mut().into_iter().next().flatten(),
                    transitions,
                    produced,
                );
                self.settle(
                    id,
                    "transOut",
                    |d: &mut Descriptor| d.transitions_mut().into_iter().nth(1).flatten(),
                    transitions,
                    produced,
                );
            }
            Some(Element::DescriptorSwitch(_)) => self.settle(
                id,
                "defaultDescriptor",
                DescriptorSwitch::default_descriptor_mut,
                Search::Children(Some(id)),
                produced,
            ),
            Some(Element::BindRule(_)) => {
                self.settle(
                    id,
                    "rule",
                    BindRule::rule_mut,
                    Search::Descendants(context.rule_base),
                    produced,
                );
                let parent = self.doc.parent(id);
                self.settle(
                    id,
                    "constituent",
                    BindRule::constituent_mut,
                    Search::Children(parent),
                    produced,
                );
            }
            Some(Element::SimpleCondition(_)) => {
                for (index, attribute) in ["key", "delay"].into_iter().enumerate() {
                    self.settle(
                        id,
                        attribute,
                        |c: &mut SimpleCondition| c.params_mut().into_iter().nth(index).flatten(),
                        Search::Children(scope.connector),
                        produced,
                    );
                }
            }
            Some(Element::CompoundCondition(_)) => self.settle(
                id,
                "delay",
                |c: &mut CompoundCondition| c.params_mut().into_iter().next().flatten(),
                Search::Children(scope.connector),
                produced,
            ),
            Some(Element::SimpleAction(_)) => {
                let attributes = [
                    "value",
                    "delay",
                    "repeat",
                    "repeatDelay",
                    "duration",
                    "by",
                ];
                for (index, attribute) in attributes.into_iter().enumerate() {
                    self.settle(
                        id,
                        attribute,
                        |a: &mut SimpleAction| a.params_mut().into_iter().nth(index).flatten(),
                        Search::Children(scope.connector),
                        produced,
                    );
                }
            }
            Some(Element::CompoundAction(_)) => self.settle(
                id,
                "delay",
                |a: &mut CompoundAction| a.params_mut().into_iter().next().flatten(),
                Search::Children(scope.connector),
                produced,
            ),
            Some(Element::Media(_)) => self.settle(
                id,
                "descriptor",
                Media::descriptor_mut,
                Search::Children(context.descriptor_base),
                produced,
            ),
            Some(Element::Port(_)) => {
                self.settle(
                    id,
                    "component",
                    Port::component_mut,
                    Search::Children(scope.composition),
                    produced,
                );
                let component = self.component_of(id);
                self.settle(
                    id,
                    "interface",
                    Port::interface_mut,
                    Search::Children(component),
                    produced,
                );
            }
            Some(Element::Context(_)) => self.settle(
                id,
                "refer",
                Context::refer_mut,
                Search::Descendants(context.body),
                produced,
            ),
            Some(Element::Switch(_)) => self.settle(
                id,
                "defaultComponent",
                Switch::default_component_mut,
                Search::Children(Some(id)),
                produced,
            ),
            Some(Element::Link(_)) => self.settle(
                id,
                "xconnector",
                Link::xconnector_mut,
                Search::Children(context.connector_base),
                produced,
            ),
            Some(Element::Bind(_)) => {
                self.settle(
                    id,
                    "component",
                    Bind::component_mut,
                    Search::SelfOrChildren(scope.composition),
                    produced,
                );
                let component = self.component_of(id);
                self.settle(
                    id,
                    "interface",
                    Bind::interface_mut,
                    Search::Children(component),
                    produced,
                );
                self.settle(
                    id,
                    "descriptor",
                    Bind::descriptor_mut,
                    Search::Children(context.descriptor_base),
                    produced,
                );
            }
            Some(Element::Param(_)) => {
                let connector = self.connector_of(scope.link);
                self.settle(
                    id,
                    "name",
                    Param::name_mut,
                    Search::Children(connector),
                    produced,
                );
            }
            Some(
                Element::Ncl(_)
                | Element::Head(_)
                | Element::Body(_)
                | Element::RuleBase(_)
                | Element::CompositeRule(_)
                | Element::TransitionBase(_)
                | Element::Transition(_)
                | Element::DescriptorBase(_)
                | Element::DescriptorParam(_)
                | Element::ConnectorBase(_)
                | Element::CausalConnector(_)
                | Element::ConnectorParam(_)
                | Element::Property(_)
                | Element::Meta(_)
                | Element::Metadata(_)
                | Element::ImportBase(_),
            )
            | None => {}
        }
    }

    /// The resolved component of a port or bind.
    fn component_of(&self, id: NodeId) -> Option<NodeId> {
        let component = match self.doc.element(id)? {
            Element::Port(port) => port.component(),
            Element::Bind(bind) => bind.component(),
            _ => None,
        };
        component.and_then(Reference::target_id)
    }

    /// The resolved connector of a link.
    fn connector_of(&self, link: Option<NodeId>) -> Option<NodeId> {
        match self.doc.element(link?)? {
            Element::Link(link) => link.xconnector().and_then(Reference::target_id),
            _ => None,
        }
    }

    /// Resolves one reference attribute of `node` if it still needs it.
    fn settle<E, T>(
        &mut self,
        node: NodeId,
        attribute: &'static str,
        reference: impl Fn(&mut E) -> Option<&mut Reference<T>>,
        search: Search,
        produced: &mut Diagnostics,
    ) where
        E: ElementKind,
        T: ReferenceTarget,
    {
        let pending = self
            .doc
            .element_mut(node)
            .and_then(E::from_element_mut)
            .and_then(|element| reference(element))
            .and_then(|reference| reference.pending_id());
        let Some(target) = pending else {
            return;
        };

        let found = self.search::<T>(search, target);
        if let Some(reference) = self
            .doc
            .element_mut(node)
            .and_then(E::from_element_mut)
            .and_then(|element| reference(element))
        {
            reference.settle(found.flatten());
        }

        match found {
            Some(Some(found)) => {
                trace!(node:?, attribute, target:?, found:?; "Resolved reference");
            }
            Some(None) => {
                trace!(node:?, attribute, target:?; "Unresolved reference");
                produced.emit(
                    Diagnostic::warning(format!(
                        "unresolved reference `{target}` in attribute `{attribute}`"
                    ))
                    .with_code(ErrorCode::E300),
                );
            }
            None => {
                trace!(node:?, attribute, target:?; "No lookup scope for reference");
                produced.emit(
                    Diagnostic::warning(format!(
                        "cannot resolve `{target}` in attribute `{attribute}`: nothing to look it up in"
                    ))
                    .with_code(ErrorCode::E301),
                );
            }
        }
    }

    /// Looks `target` up; `None` when the scope itself is missing.
    fn search<T: ReferenceTarget>(&self, search: Search, target: Id) -> Option<Option<NodeId>> {
        let found = match search {
            Search::Children(container) => {
                let container = container?;
                self.doc
                    .child_ids(container)
                    .into_iter()
                    .find(|child| self.matches::<T>(*child, target))
            }
            Search::SelfOrChildren(container) => {
                let container = container?;
                if self.matches::<T>(container, target) {
                    Some(container)
                } else {
                    self.doc
                        .child_ids(container)
                        .into_iter()
                        .find(|child| self.matches::<T>(*child, target))
                }
            }
            Search::Descendants(container) => self.find_descendant::<T>(container?, target),
        };
        Some(found)
    }

    fn find_descendant<T: ReferenceTarget>(&self, container: NodeId, target: Id) -> Option<NodeId> {
        self.doc.child_ids(container).into_iter().find_map(|child| {
            if self.matches::<T>(child, target) {
                Some(child)
            } else {
                self.find_descendant::<T>(child, target)
            }
        })
    }

    fn matches<T: ReferenceTarget>(&self, id: NodeId, target: Id) -> bool {
        self.doc
            .element(id)
            .is_some_and(|element| T::accepts(element) && element.label() == Some(target))
    }
}

impl Document {
    /// Links every pending or unresolved reference to its target.
    ///
    /// References already resolved are left alone, so running the pass again
    /// only retries the misses. Each miss records a warning on the
    /// referencing element and, merged upward, on every element enclosing
    /// it; warnings left by an earlier pass are replaced. Returns the
    /// diagnostics produced for the whole tree.
    pub fn resolve(&mut self) -> Diagnostics {
        info!("Resolving references");
        let context = ResolutionContext::new(self);
        let root = self.root().id();

        let mut resolver = Resolver { doc: self, context };
        let produced = resolver.resolve_node(root, Scope::default());

        debug!(warnings = produced.warnings().len(); "References resolved");
        produced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{Attributes, DocumentBuilder},
        elements::{Body, CausalConnector, ConnectorBase, Property},
        model::Handle,
    };

    /// Feeds `(tag, attributes, depth)` triples as start and end events.
    fn build(events: &[(&str, &[(&str, &str)], usize)]) -> Document {
        let mut builder = DocumentBuilder::new();
        for (tag, attributes, depth) in events {
            while builder.depth() > *depth {
                builder.end_element();
            }
            let attributes: Attributes = attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            builder.start_element(tag, &attributes);
        }
        while builder.depth() > 0 {
            builder.end_element();
        }
        builder.finish()
    }

    fn body(doc: &Document) -> Handle<Body> {
        let id = doc[doc.root()].body().first().unwrap();
        doc.cast(id).unwrap()
    }

    #[test]
    fn test_forward_reference_to_connector() {
        // The body, holding the link, comes before the head in the source.
        let doc = build(&[
            ("ncl", &[], 0),
            ("body", &[], 1),
            ("link", &[("id", "l1"), ("xconnector", "onBeginStart")], 2),
            ("head", &[], 1),
            ("connectorBase", &[], 2),
            ("causalConnector", &[("id", "onBeginStart")], 3),
        ]);

        let body = body(&doc);
        let link = doc.find_child::<_, Link>(body, "l1").unwrap();
        let reference = doc[link].xconnector().unwrap();

        assert!(reference.is_resolved());
        let connector = doc.cast::<CausalConnector>(reference.target_id().unwrap());
        assert_eq!(doc[connector.unwrap()].id(), Some(reference.id()));
        assert!(doc.warnings(doc.root()).is_empty());
    }

    #[test]
    fn test_unresolved_reference_warns_once() {
        let mut doc = build(&[
            ("ncl", &[], 0),
            ("head", &[], 1),
            ("connectorBase", &[], 2),
            ("body", &[], 1),
            ("link", &[("id", "l1"), ("xconnector", "missing")], 2),
        ]);

        let body = body(&doc);
        let link = doc.find_child::<_, Link>(body, "l1").unwrap();
        assert!(doc[link].xconnector().unwrap().is_unresolved());

        let warnings = doc.warnings(link);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E300));
        assert_eq!(doc.warnings(body).len(), 1);
        assert_eq!(doc.warnings(doc.root()).len(), 1);

        // Another pass retries the miss without touching resolved references.
        let produced = doc.resolve();
        assert_eq!(produced.warnings().len(), 1);
        assert_eq!(doc.warnings(link).len(), 1);
        assert_eq!(doc.warnings(body).len(), 1);
        assert_eq!(doc.warnings(doc.root()).len(), 1);
    }

    #[test]
    fn test_retried_miss_clears_its_warning() {
        let mut doc = build(&[
            ("ncl", &[], 0),
            ("head", &[], 1),
            ("connectorBase", &[], 2),
            ("body", &[], 1),
            ("link", &[("id", "l1"), ("xconnector", "late")], 2),
        ]);
        let link = doc.find_child::<_, Link>(body(&doc), "l1").unwrap();
        assert_eq!(doc.warnings(link).len(), 1);

        let head = doc[doc.root()].head().first().and_then(|id| doc.cast::<Head>(id)).unwrap();
        let base = doc[head]
            .connector_base()
            .first()
            .and_then(|id| doc.cast::<ConnectorBase>(id))
            .unwrap();
        let mut connector = CausalConnector::new();
        connector.set_id(Id::parse("late").unwrap());
        let connector = doc.create(connector);
        assert!(doc.add(base, connector));

        assert!(doc.resolve().is_empty());
        assert_eq!(doc[link].xconnector().unwrap().target(), Some(connector));
        assert!(doc.warnings(link).is_empty());
        assert!(doc.warnings(doc.root()).is_empty());
    }

    #[test]
    fn test_missing_base_is_reported() {
        let doc = build(&[
            ("ncl", &[], 0),
            ("body", &[], 1),
            ("media", &[("id", "video"), ("descriptor", "dVideo")], 2),
        ]);

        let body = body(&doc);
        let media = doc.find_child::<_, Media>(body, "video").unwrap();

        assert!(doc[media].descriptor().unwrap().is_unresolved());
        assert_eq!(doc.warnings(media)[0].code(), Some(ErrorCode::E301));
    }

    #[test]
    fn test_ports_resolve_component_and_interface() {
        let doc = build(&[
            ("ncl", &[], 0),
            ("body", &[], 1),
            ("port", &[("id", "entry"), ("component", "video"), ("interface", "bounds")], 2),
            ("media", &[("id", "video")], 2),
            ("property", &[("name", "bounds")], 3),
        ]);

        let body = body(&doc);
        let video = doc.find_child::<_, Media>(body, "video").unwrap();
        let bounds = doc.find_child::<_, Property>(video, "bounds").unwrap();
        let port = doc.cast::<Port>(doc[body].ports().first().unwrap()).unwrap();

        assert_eq!(doc[port].component().unwrap().target_id(), Some(video.id()));
        assert_eq!(doc[port].interface().unwrap().target_id(), Some(bounds.id()));
    }

    #[test]
    fn test_params_resolve_against_link_connector() {
        let doc = build(&[
            ("ncl", &[], 0),
            ("head", &[], 1),
            ("connectorBase", &[], 2),
            ("causalConnector", &[("id", "onKeySelection")], 3),
            ("connectorParam", &[("name", "keyCode")], 4),
            ("simpleCondition", &[("role", "onSelection"), ("key", "$keyCode")], 4),
            ("simpleAction", &[("role", "start")], 4),
            ("body", &[], 1),
            ("media", &[("id", "video")], 2),
            ("link", &[("id", "l1"), ("xconnector", "onKeySelection")], 2),
            ("bind", &[("role", "onSelection"), ("component", "video")], 3),
            ("bindParam", &[("name", "keyCode"), ("value", "RED")], 4),
        ]);

        assert!(doc.warnings(doc.root()).is_empty());

        let body = body(&doc);
        let link = doc.find_child::<_, Link>(body, "l1").unwrap();
        let bind = doc.cast::<Bind>(doc[link].binds().first().unwrap()).unwrap();
        let param = doc.cast::<Param>(doc[bind].params().first().unwrap()).unwrap();
        assert!(doc[param].name().unwrap().is_resolved());
        assert!(doc[bind].component().unwrap().is_resolved());
    }

    #[test]
    fn test_bind_may_target_enclosing_context() {
        let doc = build(&[
            ("ncl", &[], 0),
            ("body", &[], 1),
            ("context", &[("id", "scene")], 2),
            ("link", &[("id", "l1")], 3),
            ("bind", &[("role", "onBegin"), ("component", "scene")], 4),
        ]);

        let body = body(&doc);
        let scene = doc.find_child::<_, Context>(body, "scene").unwrap();
        let link = doc.find_child::<_, Link>(scene, "l1").unwrap();
        let bind = doc.cast::<Bind>(doc[link].binds().first().unwrap()).unwrap();

        assert_eq!(doc[bind].component().unwrap().target_id(), Some(scene.id()));
    }

    #[test]
    fn test_rule_var_and_switch_constituents() {
        let doc = build(&[
            ("ncl", &[], 0),
            ("head", &[], 1),
            ("ruleBase", &[], 2),
            ("rule", &[("id", "rEn"), ("var", "language"), ("comparator", "eq"), ("value", "en")], 3),
            ("body", &[], 1),
            ("media", &[("id", "settings"), ("type", "application/x-ginga-settings")], 2),
            ("property", &[("name", "language")], 3),
            ("switch", &[("id", "menu")], 2),
            ("bindRule", &[("rule", "rEn"), ("constituent", "en")], 3),
            ("media", &[("id", "en")], 3),
        ]);

        assert!(doc.warnings(doc.root()).is_empty(), "{:?}", doc.warnings(doc.root()));

        let body = body(&doc);
        let switch = doc.find_child::<_, Switch>(body, "menu").unwrap();
        let rule_bind = doc.cast::<BindRule>(doc[switch].bind_rules().first().unwrap()).unwrap();
        let en = doc.find_child::<_, Media>(switch, "en").unwrap();

        assert!(doc[rule_bind].rule().unwrap().is_resolved());
        assert_eq!(doc[rule_bind].constituent().unwrap().target_id(), Some(en.id()));
    }
}
