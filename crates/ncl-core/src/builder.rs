//! Incremental document construction from start/end element events.
//!
//! [`DocumentBuilder`] is the construction adapter an event source drives:
//! one [`DocumentBuilder::start_element`] call per start tag, one
//! [`DocumentBuilder::end_element`] call per end tag, and a final
//! [`DocumentBuilder::finish`] that runs reference resolution. References
//! may point at elements that have not been seen yet; they are stored as
//! placeholders until `finish`.
//!
//! Construction never stops at a bad input. Unknown tags and attributes are
//! recorded as warnings and malformed values as errors, on the element being
//! built and on every element enclosing it.

use indexmap::IndexMap;
use log::{debug, info, trace};

use crate::{
    config::ModelConfig,
    elements::{
        Bind, Body, CausalConnector, CompositeRule, CompoundAction, CompoundCondition,
        ConnectorBase, Context, Descriptor, DescriptorBase, DescriptorSwitch, Head, Link, Media,
        Metadata, Ncl, RdfElement, RuleBase, SetAttribute, Switch, TransitionBase,
    },
    error::{Diagnostic, ErrorCode},
    factory::{DefaultFactory, ElementFactory},
    identifier::Id,
    model::{Document, Element, ElementKind, Handle, Holds, NodeId, Reference},
};

/// Attribute name → value mapping of one start tag, in source order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// An element of the tree, added to its parent when it closes.
    Node(NodeId, Option<Pending>),
    /// A pseudo-element setting an attribute of its parent.
    Leaf,
    /// An element of the RDF tree of the given metadata.
    Rdf(NodeId),
    /// An unknown element and everything inside it.
    Skip,
}

/// A child waiting for its end tag to be added to `parent`.
#[derive(Debug, Clone, Copy)]
struct Pending {
    parent: NodeId,
    add: fn(&mut Document, NodeId, NodeId) -> bool,
}

fn add_child<P, C>(document: &mut Document, parent: NodeId, child: NodeId) -> bool
where
    P: Holds<C>,
    C: ElementKind,
{
    document.add(Handle::<P>::new(parent), Handle::<C>::new(child))
}

/// Builds a [`Document`] from a sequence of element events.
///
/// An element joins its parent when its end tag arrives, once the children
/// its key is derived from are known.
///
/// # Example
///
/// ```
/// # use ncl_core::builder::{Attributes, DocumentBuilder};
/// let mut builder = DocumentBuilder::new();
/// builder.start_element("ncl", &Attributes::from([("id".to_string(), "doc".to_string())]));
/// builder.start_element("body", &Attributes::new());
/// builder.end_element();
/// builder.end_element();
///
/// let document = builder.finish();
/// assert_eq!(document[document.root()].body().len(), 1);
/// ```
#[derive(Debug)]
pub struct DocumentBuilder<F = DefaultFactory> {
    document: Document,
    factory: F,
    stack: Vec<Frame>,
    /// Open RDF elements, innermost last.
    rdf: Vec<RdfElement>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a builder using [`DefaultFactory`] and the default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self::with_factory(DefaultFactory, config)
    }
}

impl<F: ElementFactory> DocumentBuilder<F> {
    /// Creates a builder obtaining every element from `factory`.
    pub fn with_factory(factory: F, config: ModelConfig) -> Self {
        Self {
            document: Document::with_config(config),
            factory,
            stack: Vec::new(),
            rdf: Vec::new(),
        }
    }

    /// The document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Nesting depth of the element currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Handles a start tag.
    pub fn start_element(&mut self, tag: &str, attributes: &Attributes) {
        let frame = match self.stack.last().copied() {
            None if tag == "ncl" => self.open_root(attributes),
            None => {
                self.report(
                    None,
                    Diagnostic::warning(format!("expected `ncl` root element, found `{tag}`"))
                        .with_code(ErrorCode::E103),
                );
                Frame::Skip
            }
            Some(Frame::Node(parent, _)) => self.open_child(parent, tag, attributes),
            Some(Frame::Rdf(metadata)) => self.open_rdf(metadata, tag, attributes),
            Some(Frame::Leaf) => {
                self.report(
                    None,
                    Diagnostic::warning(format!("unexpected element `{tag}`"))
                        .with_code(ErrorCode::E103),
                );
                Frame::Skip
            }
            Some(Frame::Skip) => Frame::Skip,
        };
        trace!(tag, frame:?; "Started element");
        self.stack.push(frame);
    }

    /// Handles an end tag, closing the innermost open element.
    pub fn end_element(&mut self) {
        match self.stack.pop() {
            Some(Frame::Node(child, Some(pending))) => self.close(child, pending),
            Some(Frame::Rdf(metadata)) => self.close_rdf(metadata),
            Some(_) => {}
            None => debug!("Ignoring end of element with nothing open"),
        }
    }

    /// Signals the end of construction: resolves every reference and
    /// returns the document.
    ///
    /// Diagnostics recorded while building and resolving are available on
    /// the root through [`Document::diagnostics`].
    pub fn finish(mut self) -> Document {
        if !self.stack.is_empty() {
            debug!(open = self.stack.len(); "Finishing with unclosed elements");
        }
        while !self.stack.is_empty() {
            self.end_element();
        }
        let mut document = self.document;
        info!(nodes = document.node_count(); "Construction finished");
        document.resolve();
        document
    }

    fn open_root(&mut self, attributes: &Attributes) -> Frame {
        let root = self.document.root();
        let problems = match self.document.get_mut(root) {
            Some(ncl) => apply_attributes(ncl, "ncl", attributes),
            None => Vec::new(),
        };
        for problem in problems {
            self.report(Some(root.id()), problem);
        }
        Frame::Node(root.id(), None)
    }

    fn open_child(&mut self, parent: NodeId, tag: &str, attributes: &Attributes) -> Frame {
        let parent_tag = self.document.element(parent).map_or("", Element::tag);
        match (parent_tag, tag) {
            ("ncl", "head") => self.attach::<Ncl, _>(parent, tag, F::create_head, attributes),
            ("ncl", "body") => self.attach::<Ncl, _>(parent, tag, F::create_body, attributes),

            ("head", "ruleBase") => {
                self.attach::<Head, _>(parent, tag, F::create_rule_base, attributes)
            }
            ("head", "transitionBase") => {
                self.attach::<Head, _>(parent, tag, F::create_transition_base, attributes)
            }
            ("head", "descriptorBase") => {
                self.attach::<Head, _>(parent, tag, F::create_descriptor_base, attributes)
            }
            ("head", "connectorBase") => {
                self.attach::<Head, _>(parent, tag, F::create_connector_base, attributes)
            }

            ("ruleBase", "importBase") => {
                self.attach::<RuleBase, _>(parent, tag, F::create_import_base, attributes)
            }
            ("transitionBase", "importBase") => {
                self.attach::<TransitionBase, _>(parent, tag, F::create_import_base, attributes)
            }
            ("descriptorBase", "importBase") => {
                self.attach::<DescriptorBase, _>(parent, tag, F::create_import_base, attributes)
            }
            ("connectorBase", "importBase") => {
                self.attach::<ConnectorBase, _>(parent, tag, F::create_import_base, attributes)
            }

            ("ruleBase", "rule") => {
                self.attach::<RuleBase, _>(parent, tag, F::create_rule, attributes)
            }
            ("ruleBase", "compositeRule") => {
                self.attach::<RuleBase, _>(parent, tag, F::create_composite_rule, attributes)
            }
            ("compositeRule", "rule") => {
                self.attach::<CompositeRule, _>(parent, tag, F::create_rule, attributes)
            }
            ("compositeRule", "compositeRule") => {
                self.attach::<CompositeRule, _>(parent, tag, F::create_composite_rule, attributes)
            }

            ("transitionBase", "transition") => {
                self.attach::<TransitionBase, _>(parent, tag, F::create_transition, attributes)
            }

            ("descriptorBase", "descriptor") => {
                self.attach::<DescriptorBase, _>(parent, tag, F::create_descriptor, attributes)
            }
            ("descriptorBase", "descriptorSwitch") => self.attach::<DescriptorBase, _>(
                parent,
                tag,
                F::create_descriptor_switch,
                attributes,
            ),
            ("descriptor", "descriptorParam") => {
                self.attach::<Descriptor, _>(parent, tag, F::create_descriptor_param, attributes)
            }
            ("descriptorSwitch", "bindRule") => self.attach::<DescriptorSwitch, _>(
                parent,
                tag,
                F::create_descriptor_bind_rule,
                attributes,
            ),
            ("descriptorSwitch", "descriptor") => {
                self.attach::<DescriptorSwitch, _>(parent, tag, F::create_descriptor, attributes)
            }
            ("descriptorSwitch", "defaultDescriptor") => {
                self.open_default(parent, tag, "descriptor", attributes)
            }

            ("connectorBase", "causalConnector") => {
                self.attach::<ConnectorBase, _>(parent, tag, F::create_causal_connector, attributes)
            }
            ("causalConnector", "connectorParam") => {
                self.attach::<CausalConnector, _>(parent, tag, F::create_connector_param, attributes)
            }
            ("causalConnector", "simpleCondition") => self.attach::<CausalConnector, _>(
                parent,
                tag,
                F::create_simple_condition,
                attributes,
            ),
            ("causalConnector", "compoundCondition") => self.attach::<CausalConnector, _>(
                parent,
                tag,
                F::create_compound_condition,
                attributes,
            ),
            ("causalConnector", "simpleAction") => {
                self.attach::<CausalConnector, _>(parent, tag, F::create_simple_action, attributes)
            }
            ("causalConnector", "compoundAction") => self.attach::<CausalConnector, _>(
                parent,
                tag,
                F::create_compound_action,
                attributes,
            ),
            ("compoundCondition", "simpleCondition") => self.attach::<CompoundCondition, _>(
                parent,
                tag,
                F::create_simple_condition,
                attributes,
            ),
            ("compoundCondition", "compoundCondition") => self.attach::<CompoundCondition, _>(
                parent,
                tag,
                F::create_compound_condition,
                attributes,
            ),
            ("compoundAction", "simpleAction") => {
                self.attach::<CompoundAction, _>(parent, tag, F::create_simple_action, attributes)
            }
            ("compoundAction", "compoundAction") => {
                self.attach::<CompoundAction, _>(parent, tag, F::create_compound_action, attributes)
            }

            ("body", "meta") => self.attach::<Body, _>(parent, tag, F::create_meta, attributes),
            ("body", "metadata") => {
                self.attach::<Body, _>(parent, tag, F::create_metadata, attributes)
            }
            ("context", "meta") => {
                self.attach::<Context, _>(parent, tag, F::create_meta, attributes)
            }
            ("context", "metadata") => {
                self.attach::<Context, _>(parent, tag, F::create_metadata, attributes)
            }
            ("metadata", _) => self.open_rdf(parent, tag, attributes),

            ("body", "port") => self.attach::<Body, _>(parent, tag, F::create_port, attributes),
            ("body", "property") => {
                self.attach::<Body, _>(parent, tag, F::create_property, attributes)
            }
            ("body", "media") => self.attach::<Body, _>(parent, tag, F::create_media, attributes),
            ("body", "context") => {
                self.attach::<Body, _>(parent, tag, F::create_context, attributes)
            }
            ("body", "switch") => {
                self.attach::<Body, _>(parent, tag, F::create_switch, attributes)
            }
            ("body", "link") => self.attach::<Body, _>(parent, tag, F::create_link, attributes),

            ("context", "port") => {
                self.attach::<Context, _>(parent, tag, F::create_port, attributes)
            }
            ("context", "property") => {
                self.attach::<Context, _>(parent, tag, F::create_property, attributes)
            }
            ("context", "media") => {
                self.attach::<Context, _>(parent, tag, F::create_media, attributes)
            }
            ("context", "context") => {
                self.attach::<Context, _>(parent, tag, F::create_context, attributes)
            }
            ("context", "switch") => {
                self.attach::<Context, _>(parent, tag, F::create_switch, attributes)
            }
            ("context", "link") => {
                self.attach::<Context, _>(parent, tag, F::create_link, attributes)
            }

            ("media", "property") => {
                self.attach::<Media, _>(parent, tag, F::create_property, attributes)
            }

            ("switch", "bindRule") => {
                self.attach::<Switch, _>(parent, tag, F::create_switch_bind_rule, attributes)
            }
            ("switch", "media") => {
                self.attach::<Switch, _>(parent, tag, F::create_media, attributes)
            }
            ("switch", "context") => {
                self.attach::<Switch, _>(parent, tag, F::create_context, attributes)
            }
            ("switch", "switch") => {
                self.attach::<Switch, _>(parent, tag, F::create_switch, attributes)
            }
            ("switch", "defaultComponent") => {
                self.open_default(parent, tag, "component", attributes)
            }

            ("link", "linkParam") => {
                self.attach::<Link, _>(parent, tag, F::create_link_param, attributes)
            }
            ("link", "bind") => self.attach::<Link, _>(parent, tag, F::create_bind, attributes),
            ("bind", "bindParam") => {
                self.attach::<Bind, _>(parent, tag, F::create_bind_param, attributes)
            }

            _ => {
                debug!(parent = parent_tag, tag; "Skipping unexpected element");
                self.report(
                    None,
                    Diagnostic::warning(format!("unexpected element `{tag}` in `{parent_tag}`"))
                        .with_code(ErrorCode::E103),
                );
                Frame::Skip
            }
        }
    }

    /// Creates a child with `create` and applies its attributes. The child
    /// is added to `parent` by [`Self::close`].
    fn attach<P, C>(
        &mut self,
        parent: NodeId,
        tag: &str,
        create: impl FnOnce(&F) -> C,
        attributes: &Attributes,
    ) -> Frame
    where
        P: Holds<C>,
        C: ElementKind + SetAttribute,
    {
        let mut element = create(&self.factory);
        let problems = apply_attributes(&mut element, tag, attributes);
        let child = self.document.create(element);
        for problem in problems {
            self.report(Some(child.id()), problem);
        }

        let pending = Pending {
            parent,
            add: add_child::<P, C>,
        };
        Frame::Node(child.id(), Some(pending))
    }

    fn close(&mut self, child: NodeId, pending: Pending) {
        if (pending.add)(&mut self.document, pending.parent, child) {
            return;
        }
        let tag = self.document.element(child).map_or("element", Element::tag);
        self.report(
            None,
            Diagnostic::error(format!("duplicate `{tag}` element"))
                .with_code(ErrorCode::E104)
                .with_help("elements of this kind must differ in their identifying attributes"),
        );
    }

    /// Opens an element of the RDF tree of `metadata`. Its attributes are
    /// kept as written.
    fn open_rdf(&mut self, metadata: NodeId, tag: &str, attributes: &Attributes) -> Frame {
        let element = attributes
            .iter()
            .fold(RdfElement::new(tag), |element, (name, value)| {
                element.with_attribute(name.as_str(), value.as_str())
            });
        self.rdf.push(element);
        Frame::Rdf(metadata)
    }

    /// Closes the innermost RDF element, nesting it in the enclosing one or
    /// storing it on `metadata` at the top of the tree.
    fn close_rdf(&mut self, metadata: NodeId) {
        let Some(element) = self.rdf.pop() else {
            return;
        };
        match self.rdf.last_mut() {
            Some(parent) => parent.push_child(element),
            None => {
                let handle = Handle::<Metadata>::new(metadata);
                if let Some(metadata) = self.document.get_mut(handle) {
                    metadata.push(element);
                }
            }
        }
    }

    /// Handles `<defaultDescriptor descriptor='…'/>` and
    /// `<defaultComponent component='…'/>`.
    fn open_default(
        &mut self,
        parent: NodeId,
        tag: &str,
        attribute: &str,
        attributes: &Attributes,
    ) -> Frame {
        let mut problems = Vec::new();
        let mut target = None;
        for (name, value) in attributes {
            if name != attribute {
                problems.push(unknown_attribute(tag, name));
                continue;
            }
            match Id::parse(value) {
                Ok(id) => target = Some(id),
                Err(err) => problems.push(err.into()),
            }
        }

        if let Some(id) = target {
            match self.document.element_mut(parent) {
                Some(Element::DescriptorSwitch(switch)) => {
                    switch.set_default_descriptor(Reference::placeholder(id))
                }
                Some(Element::Switch(switch)) => {
                    switch.set_default_component(Reference::placeholder(id))
                }
                _ => {}
            }
        }
        for problem in problems {
            self.report(None, problem);
        }
        Frame::Leaf
    }

    /// Records `diagnostic` on `node` and on every open element.
    fn report(&mut self, node: Option<NodeId>, diagnostic: Diagnostic) {
        let open = self.stack.iter().filter_map(|frame| match frame {
            Frame::Node(id, _) => Some(*id),
            Frame::Leaf | Frame::Rdf(_) | Frame::Skip => None,
        });
        let targets: Vec<NodeId> = node.into_iter().chain(open).collect();
        for target in targets {
            if let Some(diagnostics) = self.document.diagnostics_mut(target) {
                diagnostics.emit(diagnostic.clone());
            }
        }
    }
}

fn apply_attributes<E: SetAttribute>(
    element: &mut E,
    tag: &str,
    attributes: &Attributes,
) -> Vec<Diagnostic> {
    let mut problems = Vec::new();
    for (name, value) in attributes {
        match element.set_attribute(name, value) {
            Ok(true) => {}
            Ok(false) => problems.push(unknown_attribute(tag, name)),
            Err(err) => problems.push(Diagnostic::from(err)),
        }
    }
    problems
}

fn unknown_attribute(tag: &str, name: &str) -> Diagnostic {
    Diagnostic::warning(format!("unknown attribute `{name}` on `{tag}`"))
        .with_code(ErrorCode::E102)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        elements::{ImportBase, Property},
        factory::{
            CompositionFactory, ConnectorFactory, DescriptorBaseFactory, DocumentFactory,
            HeadFactory, LinkFactory, RuleBaseFactory, TransitionBaseFactory,
        },
    };

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn body(document: &Document) -> Handle<Body> {
        let root = document.root();
        let id = document[root].body().first().unwrap();
        document.cast(id).unwrap()
    }

    #[test]
    fn test_builds_nested_tree() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[("id", "doc")]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("media", &attrs(&[("id", "video"), ("src", "video.mp4")]));
        builder.start_element("property", &attrs(&[("name", "bounds")]));
        builder.end_element();
        builder.end_element();
        builder.end_element();
        builder.end_element();
        assert_eq!(builder.depth(), 0);

        let document = builder.finish();
        let body = body(&document);
        let video = document.find_child::<_, Media>(body, "video").unwrap();

        assert_eq!(document[video].src(), Some("video.mp4"));
        assert!(document.has_id::<_, Property>(video, "bounds"));
        assert_eq!(document[document.root()].id().unwrap(), "doc");
        assert!(document.diagnostics(document.root()).unwrap().is_empty());
    }

    #[test]
    fn test_metadata_keeps_its_rdf_tree() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("meta", &attrs(&[("name", "title"), ("content", "News")]));
        builder.end_element();
        builder.start_element("metadata", &attrs(&[]));
        builder.start_element("rdf:RDF", &attrs(&[]));
        builder.start_element("rdf:Description", &attrs(&[("rdf:about", "news")]));
        builder.start_element("dc:creator", &attrs(&[]));
        builder.end_element();
        builder.end_element();
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);
        assert_eq!(document[body].metas().len(), 1);
        let metadata = document[body].metadata().first().unwrap();
        let metadata: Handle<Metadata> = document.cast(metadata).unwrap();

        let tree = document[metadata].tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].tag(), "rdf:RDF");
        let description = &tree[0].children()[0];
        assert_eq!(
            description.attributes(),
            [("rdf:about".to_string(), "news".to_string())]
        );
        assert_eq!(description.children()[0].tag(), "dc:creator");
        assert!(document.diagnostics(document.root()).unwrap().is_empty());
    }

    #[test]
    fn test_import_base_joins_its_base() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("head", &attrs(&[]));
        builder.start_element("connectorBase", &attrs(&[]));
        builder.start_element(
            "importBase",
            &attrs(&[("documentURI", "connectors.ncl"), ("alias", "shared")]),
        );

        let document = builder.finish();
        let head = document[document.root()].head().first().unwrap();
        let head: Handle<Head> = document.cast(head).unwrap();
        let base = document[head].connector_base().first().unwrap();
        let base: Handle<ConnectorBase> = document.cast(base).unwrap();
        let import = document[base].imports().first().unwrap();
        let import: Handle<ImportBase> = document.cast(import).unwrap();

        assert_eq!(document[import].alias().unwrap(), "shared");
        assert_eq!(document[import].document_uri(), Some("connectors.ncl"));
        assert!(document.diagnostics(document.root()).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_elements_are_skipped_with_warning() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("video", &attrs(&[("id", "x")]));
        builder.start_element("media", &attrs(&[("id", "inner")]));
        builder.end_element();
        builder.end_element();
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);

        assert!(document[body].nodes().is_empty());
        let warnings = document.warnings(document.root());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E103));
        assert_eq!(document.warnings(body).len(), 1);
    }

    #[test]
    fn test_bad_attribute_values_are_errors() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("media", &attrs(&[("id", "my video"), ("volume", "10")]));
        builder.end_element();
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let root = document.diagnostics(document.root()).unwrap();

        assert_eq!(root.errors().len(), 1);
        assert_eq!(root.errors()[0].code(), Some(ErrorCode::E100));
        assert_eq!(root.warnings().len(), 1);
        assert_eq!(root.warnings()[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_duplicate_is_reported_on_parent() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        for _ in 0..2 {
            builder.start_element("media", &attrs(&[("id", "video")]));
            builder.end_element();
        }
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);

        assert_eq!(document[body].nodes().len(), 1);
        assert_eq!(document.errors(body)[0].code(), Some(ErrorCode::E104));
    }

    fn link_events(builder: &mut DocumentBuilder, id: &str, binds: &[(&str, &str)]) {
        builder.start_element("link", &attrs(&[("id", id), ("xconnector", "onBeginStart")]));
        for (role, component) in binds {
            builder.start_element("bind", &attrs(&[("role", role), ("component", component)]));
            builder.end_element();
        }
        builder.end_element();
    }

    #[test]
    fn test_links_are_ordered_by_their_binds() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        link_events(&mut builder, "l1", &[("onBegin", "a"), ("start", "b")]);
        link_events(&mut builder, "l2", &[("onBegin", "b"), ("start", "c")]);
        link_events(&mut builder, "l0", &[("onBegin", "a")]);
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);
        let labels: Vec<String> = document[body]
            .links()
            .ids()
            .iter()
            .filter_map(|id| document.element(*id)?.label())
            .map(|label| label.to_string())
            .collect();

        assert_eq!(labels, ["l0", "l1", "l2"]);
        let keys: Vec<_> = document[body]
            .links()
            .ids()
            .iter()
            .map(|id| document.sort_key(*id))
            .collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_identical_links_are_duplicates() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        link_events(&mut builder, "l1", &[("onBegin", "a"), ("start", "b")]);
        link_events(&mut builder, "l2", &[("onBegin", "a"), ("start", "b")]);
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);

        assert_eq!(document[body].links().len(), 1);
        let errors = document.errors(document.root());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(ErrorCode::E104));
        assert_eq!(errors[0].message(), "duplicate `link` element");
    }

    #[test]
    fn test_default_component_sets_placeholder() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("switch", &attrs(&[("id", "menu")]));
        builder.start_element("defaultComponent", &attrs(&[("component", "en")]));
        builder.end_element();
        builder.start_element("media", &attrs(&[("id", "en")]));
        builder.end_element();
        builder.end_element();
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);
        let switch = document.find_child::<_, Switch>(body, "menu").unwrap();
        let media = document.find_child::<_, Media>(switch, "en").unwrap();

        let default = document[switch].default_component().unwrap();
        assert_eq!(default.target_id(), Some(media.id()));
    }

    #[derive(Default)]
    struct SettingsFactory;

    impl CompositionFactory for SettingsFactory {
        fn create_media(&self) -> Media {
            let mut media = Media::new();
            media.set_media_type(Some(Media::SETTINGS_TYPE));
            media
        }
    }

    impl DocumentFactory for SettingsFactory {}
    impl HeadFactory for SettingsFactory {}
    impl RuleBaseFactory for SettingsFactory {}
    impl TransitionBaseFactory for SettingsFactory {}
    impl DescriptorBaseFactory for SettingsFactory {}
    impl ConnectorFactory for SettingsFactory {}
    impl LinkFactory for SettingsFactory {}

    #[test]
    fn test_custom_factory_substitutes_elements() {
        let mut builder = DocumentBuilder::with_factory(SettingsFactory, ModelConfig::default());
        builder.start_element("ncl", &attrs(&[]));
        builder.start_element("body", &attrs(&[]));
        builder.start_element("media", &attrs(&[("id", "settings")]));
        builder.end_element();
        builder.end_element();
        builder.end_element();

        let document = builder.finish();
        let body = body(&document);
        let media = document.find_child::<_, Media>(body, "settings").unwrap();

        assert!(document[media].is_settings());
    }
}
