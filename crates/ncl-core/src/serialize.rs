//! Canonical text output.
//!
//! Every element kind emits its attributes in a fixed order, skipping absent
//! ones. Values are single-quoted, children are indented one tab per level
//! and an element without children is written in self-closing form.
//! Serialization never consults diagnostics: an invalid document is written
//! the same way as a valid one.

use std::fmt::Display;

use log::debug;

use crate::{
    elements::RdfElement,
    model::{Document, Element, NodeId, Parameterized, Reference},
};

/// XML declaration written before a whole document.
const DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>\n";

/// Ordered `name='value'` pairs of one element.
#[derive(Default)]
struct Attributes(Vec<(&'static str, String)>);

impl Attributes {
    fn push(&mut self, name: &'static str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.0.push((name, value.to_string()));
        }
    }

    fn push_parameterized<T: Display>(
        &mut self,
        name: &'static str,
        value: Option<&Parameterized<T>>,
    ) {
        self.push(name, value.map(parameterized));
    }

    fn write(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push(' ');
            out.push_str(name);
            out.push_str("='");
            escape_into(value, out);
            out.push('\'');
        }
    }
}

fn parameterized<T: Display>(value: &Parameterized<T>) -> String {
    match value {
        Parameterized::Value(value) => value.to_string(),
        Parameterized::Param(param) => format!("${}", param.id()),
    }
}

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

fn write_rdf(element: &RdfElement, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("='");
        escape_into(value, out);
        out.push('\'');
    }
    if element.children().is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for child in element.children() {
        write_rdf(child, depth + 1, out);
    }
    indent(depth, out);
    out.push_str("</");
    out.push_str(element.tag());
    out.push_str(">\n");
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
}

impl Document {
    /// Serializes the subtree rooted at `id`, indented by `depth` tabs.
    ///
    /// A negative depth is treated as 0. Returns an empty string if `id` is
    /// not an element of this document.
    ///
    /// # Examples
    ///
    /// ```
    /// use ncl_core::{Document, elements::Media, identifier::Id};
    ///
    /// let mut doc = Document::new();
    /// let mut media = Media::new();
    /// media.set_id(Id::parse("video").unwrap());
    /// media.set_src(Some("video.mp4"));
    /// let media = doc.create(media);
    ///
    /// assert_eq!(
    ///     doc.serialize(media, 1),
    ///     "\t<media id='video' src='video.mp4'/>\n"
    /// );
    /// ```
    pub fn serialize(&self, id: impl Into<NodeId>, depth: isize) -> String {
        let mut out = String::new();
        let depth = usize::try_from(depth).unwrap_or(0);
        self.write_node(id.into(), depth, &mut out);
        out
    }

    /// Serializes the whole document, preceded by the XML declaration.
    pub fn to_ncl_string(&self) -> String {
        let root = self.root().id();
        let mut out = String::from(DECLARATION);
        self.write_node(root, 0, &mut out);
        debug!(bytes = out.len(); "Serialized document");
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(element) = self.element(id) else {
            return;
        };
        let attributes = self.attributes(element);
        let default_line = self.default_line(element);
        let lists = element.child_lists();
        let rdf = match element {
            Element::Metadata(metadata) => metadata.tree(),
            _ => &[],
        };
        let has_children = default_line.is_some()
            || !rdf.is_empty()
            || lists.iter().any(|list| !list.is_empty());

        indent(depth, out);
        out.push('<');
        out.push_str(element.tag());
        attributes.write(out);
        if !has_children {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");

        for (position, list) in lists.iter().enumerate() {
            for child in list.ids() {
                self.write_node(*child, depth + 1, out);
            }
            // The default choice of a switch follows its bind rules.
            if position == 0 {
                if let Some((tag, attributes)) = &default_line {
                    indent(depth + 1, out);
                    out.push('<');
                    out.push_str(tag);
                    attributes.write(out);
                    out.push_str("/>\n");
                }
            }
        }

        for tree in rdf {
            write_rdf(tree, depth + 1, out);
        }

        indent(depth, out);
        out.push_str("</");
        out.push_str(element.tag());
        out.push_str(">\n");
    }

    /// The label a reference is written with: the current label of its
    /// target when resolved, the stored identifier otherwise.
    fn reference_label<T>(&self, reference: Option<&Reference<T>>) -> Option<String> {
        let reference = reference?;
        let label = reference
            .target_id()
            .and_then(|target| self.element(target))
            .and_then(Element::label)
            .unwrap_or_else(|| reference.id());
        Some(label.to_string())
    }

    fn default_line(&self, element: &Element) -> Option<(&'static str, Attributes)> {
        let (tag, name, label) = match element {
            Element::DescriptorSwitch(switch) => (
                "defaultDescriptor",
                "descriptor",
                self.reference_label(switch.default_descriptor())?,
            ),
            Element::Switch(switch) => (
                "defaultComponent",
                "component",
                self.reference_label(switch.default_component())?,
            ),
            _ => return None,
        };
        let mut attributes = Attributes::default();
        attributes.push(name, Some(label));
        Some((tag, attributes))
    }

    fn attributes(&self, element: &Element) -> Attributes {
        let mut a = Attributes::default();
        match element {
            Element::Ncl(e) => {
                a.push("id", e.id());
                a.push("title", e.title());
                a.push("xmlns", e.xmlns());
            }
            Element::Head(_) => {}
            Element::Body(e) => a.push("id", e.id()),
            Element::RuleBase(e) => a.push("id", e.id()),
            Element::Rule(e) => {
                a.push("id", e.id());
                a.push("var", self.reference_label(e.var()));
                a.push("comparator", e.comparator());
                a.push("value", e.value());
            }
            Element::CompositeRule(e) => {
                a.push("id", e.id());
                a.push("operator", e.operator());
            }
            Element::TransitionBase(e) => a.push("id", e.id()),
            Element::Transition(e) => {
                a.push("id", e.id());
                a.push("type", e.transition_type());
                a.push("subtype", e.subtype());
                a.push("dur", e.dur());
                a.push("startProgress", e.start_progress());
                a.push("endProgress", e.end_progress());
                a.push("direction", e.direction());
                a.push("fadeColor", e.fade_color());
                a.push("horRepeat", e.hor_repeat());
                a.push("vertRepeat", e.vert_repeat());
                a.push("borderWidth", e.border_width());
                a.push("borderColor", e.border_color());
            }
            Element::DescriptorBase(e) => a.push("id", e.id()),
            Element::Descriptor(e) => {
                a.push("id", e.id());
                a.push("player", e.player());
                a.push("explicitDur", e.explicit_dur());
                a.push("freeze", e.freeze());
                a.push("focusIndex", e.focus_index());
                a.push("focusBorderColor", e.focus_border_color());
                a.push("focusBorderWidth", e.focus_border_width());
                a.push("selBorderColor", e.sel_border_color());
                a.push("transIn", self.reference_label(e.trans_in()));
                a.push("transOut", self.reference_label(e.trans_out()));
            }
            Element::DescriptorParam(e) => {
                a.push("name", e.name());
                a.push("value", e.value());
            }
            Element::DescriptorSwitch(e) => a.push("id", e.id()),
            Element::BindRule(e) => {
                a.push("rule", self.reference_label(e.rule()));
                a.push("constituent", self.reference_label(e.constituent()));
            }
            Element::ConnectorBase(e) => a.push("id", e.id()),
            Element::CausalConnector(e) => a.push("id", e.id()),
            Element::ConnectorParam(e) => {
                a.push("name", e.name());
                a.push("type", e.param_type());
            }
            Element::SimpleCondition(e) => {
                a.push("role", e.role());
                a.push("key", e.key());
                a.push("key", e.key_param().map(|param| format!("${}", param.id())));
                a.push("delay", e.delay());
                a.push("delay", e.delay_param().map(|param| format!("${}", param.id())));
                a.push("min", e.min());
                a.push("max", e.max());
                a.push("qualifier", e.qualifier());
                a.push("eventType", e.event_type());
                a.push("transition", e.transition());
            }
            Element::CompoundCondition(e) => {
                a.push("operator", e.operator());
                a.push("delay", e.delay());
                a.push("delay", e.delay_param().map(|param| format!("${}", param.id())));
            }
            Element::SimpleAction(e) => {
                a.push("role", e.role());
                a.push_parameterized("value", e.value());
                a.push_parameterized("delay", e.delay());
                a.push("min", e.min());
                a.push("max", e.max());
                a.push("qualifier", e.qualifier());
                a.push("eventType", e.event_type());
                a.push("actionType", e.action_type());
                a.push_parameterized("repeat", e.repeat());
                a.push_parameterized("repeatDelay", e.repeat_delay());
                a.push_parameterized("duration", e.duration());
                a.push_parameterized("by", e.by());
            }
            Element::CompoundAction(e) => {
                a.push("operator", e.operator());
                a.push_parameterized("delay", e.delay());
            }
            Element::Media(e) => {
                a.push("id", e.id());
                a.push("src", e.src());
                a.push("type", e.media_type());
                a.push("descriptor", self.reference_label(e.descriptor()));
            }
            Element::Property(e) => {
                a.push("name", e.name());
                a.push("value", e.value());
            }
            Element::Port(e) => {
                a.push("id", e.id());
                a.push("component", self.reference_label(e.component()));
                a.push("interface", self.reference_label(e.interface()));
            }
            Element::Context(e) => {
                a.push("id", e.id());
                a.push("refer", self.reference_label(e.refer()));
            }
            Element::Switch(e) => a.push("id", e.id()),
            Element::Link(e) => {
                a.push("id", e.id());
                a.push("xconnector", self.reference_label(e.xconnector()));
            }
            Element::Bind(e) => {
                a.push("role", e.role());
                a.push("component", self.reference_label(e.component()));
                a.push("interface", self.reference_label(e.interface()));
                a.push("descriptor", self.reference_label(e.descriptor()));
            }
            Element::Param(e) => {
                a.push("name", self.reference_label(e.name()));
                a.push("value", e.value());
            }
            Element::Meta(e) => {
                a.push("name", e.name());
                a.push("content", e.content());
            }
            Element::Metadata(_) => {}
            Element::ImportBase(e) => {
                a.push("documentURI", e.document_uri());
                a.push("alias", e.alias());
            }
        }
        a
    }
}
