//! Derived keys of key-ordered collections.

use std::fmt::Display;

use crate::{
    model::{Document, Element, NodeId, Parameterized, Reference},
    value::Time,
};

/// One component of a [`SortKey`]. Absent attributes sort first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Absent,
    Int(i64),
    Text(String),
    Nested(Vec<SortKey>),
}

/// The comparison key of an element inside a key-ordered collection.
///
/// Two children of one collection with equal keys are duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<KeyPart>);

impl SortKey {
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    fn tag(mut self, tag: &str) -> Self {
        self.0.push(KeyPart::Text(tag.to_string()));
        self
    }

    fn text<T: Display>(mut self, value: Option<T>) -> Self {
        self.0.push(match value {
            Some(value) => KeyPart::Text(value.to_string()),
            None => KeyPart::Absent,
        });
        self
    }

    fn int(mut self, value: Option<i64>) -> Self {
        self.0.push(value.map_or(KeyPart::Absent, KeyPart::Int));
        self
    }

    fn time(self, value: Option<Time>) -> Self {
        self.int(value.map(|time| (time.seconds() * 1000.0).round() as i64))
    }

    fn parameterized<T: Display>(mut self, value: Option<&Parameterized<T>>) -> Self {
        self.0.push(match value {
            None => KeyPart::Absent,
            Some(Parameterized::Value(value)) => KeyPart::Text(value.to_string()),
            Some(Parameterized::Param(param)) => KeyPart::Text(format!("${}", param.id())),
        });
        self
    }

    fn nested(mut self, keys: Vec<SortKey>) -> Self {
        self.0.push(KeyPart::Nested(keys));
        self
    }
}

impl Document {
    /// The key `id` is ordered and deduplicated by in a key-ordered
    /// collection.
    pub fn sort_key(&self, id: NodeId) -> SortKey {
        let Some(element) = self.element(id) else {
            return SortKey::default();
        };
        let key = SortKey::default();
        match element {
            Element::SimpleCondition(c) => key
                .tag("simple")
                .text(c.role())
                .int(c.min().map(i64::from))
                .int(c.max().map(|max| max.as_count()))
                .time(c.delay())
                .text(c.delay_param().map(Reference::id))
                .text(c.qualifier())
                .text(c.key())
                .text(c.key_param().map(Reference::id))
                .text(c.event_type())
                .text(c.transition()),
            Element::CompoundCondition(c) => key
                .tag("compound")
                .text(c.operator())
                .time(c.delay())
                .text(c.delay_param().map(Reference::id))
                .nested(self.child_keys(id)),
            Element::SimpleAction(a) => key
                .tag("simple")
                .text(a.role())
                .parameterized(a.value())
                .parameterized(a.delay())
                .int(a.min().map(i64::from))
                .int(a.max().map(|max| max.as_count()))
                .text(a.qualifier())
                .text(a.event_type())
                .text(a.action_type())
                .parameterized(a.repeat())
                .parameterized(a.repeat_delay())
                .parameterized(a.duration())
                .parameterized(a.by()),
            Element::CompoundAction(a) => key
                .tag("compound")
                .text(a.operator())
                .parameterized(a.delay())
                .nested(self.child_keys(id)),
            Element::Link(link) => key
                .text(link.xconnector().map(Reference::id))
                .int(Some(link.params().len() as i64))
                .int(Some(link.binds().len() as i64))
                .nested(self.keys_of(link.params().ids()))
                .nested(self.keys_of(link.binds().ids())),
            Element::Bind(bind) => key
                .text(bind.role())
                .text(bind.component().map(Reference::id))
                .text(bind.interface().map(Reference::id))
                .text(bind.descriptor().map(Reference::id))
                .nested(self.keys_of(bind.params().ids())),
            Element::BindRule(rule) => key
                .text(rule.rule().map(Reference::id))
                .text(rule.constituent().map(Reference::id)),
            Element::DescriptorParam(param) => key.text(param.name()),
            Element::Meta(meta) => key.text(meta.name()).text(meta.content()),
            Element::ImportBase(import) => key.text(import.alias()).text(import.document_uri()),
            Element::Head(_) | Element::Metadata(_) => key,
            Element::Ncl(_)
            | Element::Body(_)
            | Element::RuleBase(_)
            | Element::Rule(_)
            | Element::CompositeRule(_)
            | Element::TransitionBase(_)
            | Element::Transition(_)
            | Element::DescriptorBase(_)
            | Element::Descriptor(_)
            | Element::DescriptorSwitch(_)
            | Element::ConnectorBase(_)
            | Element::CausalConnector(_)
            | Element::ConnectorParam(_)
            | Element::Media(_)
            | Element::Property(_)
            | Element::Port(_)
            | Element::Context(_)
            | Element::Switch(_)
            | Element::Param(_) => key.text(element.label()),
        }
    }

    fn child_keys(&self, id: NodeId) -> Vec<SortKey> {
        self.keys_of(&self.child_ids(id))
    }

    fn keys_of(&self, ids: &[NodeId]) -> Vec<SortKey> {
        ids.iter().map(|child| self.sort_key(*child)).collect()
    }
}
