use crate::{
    elements::{
        Bind, BindRule, Body, CausalConnector, CompositeRule, CompoundAction, CompoundCondition,
        ConnectorBase, ConnectorParam, Context, Descriptor, DescriptorBase, DescriptorParam,
        DescriptorSwitch, Head, ImportBase, Link, Media, Meta, Metadata, Ncl, Param, Port,
        Property, Rule, RuleBase, SimpleAction, SimpleCondition, Switch, Transition,
        TransitionBase,
    },
    identifier::Id,
    model::{Children, ReferenceTarget},
};

/// A concrete element type stored in a [`Document`](crate::model::Document).
pub trait ElementKind: Sized + Into<Element> + 'static {
    fn from_element(element: &Element) -> Option<&Self>;

    fn from_element_mut(element: &mut Element) -> Option<&mut Self>;
}

/// A container that owns children of kind `C`.
///
/// Implemented once per legal (container, child) pair, naming the child
/// collection the pair uses.
pub trait Holds<C: ElementKind>: ElementKind {
    fn children(&self) -> &Children;

    fn children_mut(&mut self) -> &mut Children;
}

/// Container access to every child collection, in canonical order.
pub(crate) trait Composite {
    fn child_lists(&self) -> Vec<&Children>;

    fn child_lists_mut(&mut self) -> Vec<&mut Children>;
}

macro_rules! element_kinds {
    ($($variant:ident),+ $(,)?) => {
        /// Every element kind of the language.
        #[derive(Debug, Clone)]
        pub enum Element {
            $( $variant($variant) ),+
        }

        $(
            impl From<$variant> for Element {
                fn from(element: $variant) -> Self {
                    Element::$variant(element)
                }
            }

            impl ElementKind for $variant {
                fn from_element(element: &Element) -> Option<&Self> {
                    match element {
                        Element::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_element_mut(element: &mut Element) -> Option<&mut Self> {
                    match element {
                        Element::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl ReferenceTarget for $variant {
                fn accepts(element: &Element) -> bool {
                    matches!(element, Element::$variant(_))
                }
            }
        )+
    };
}

element_kinds! {
    Ncl,
    Head,
    Body,
    RuleBase,
    Rule,
    CompositeRule,
    TransitionBase,
    Transition,
    DescriptorBase,
    Descriptor,
    DescriptorParam,
    DescriptorSwitch,
    BindRule,
    ConnectorBase,
    CausalConnector,
    ConnectorParam,
    SimpleCondition,
    CompoundCondition,
    SimpleAction,
    CompoundAction,
    Media,
    Property,
    Port,
    Context,
    Switch,
    Link,
    Bind,
    Param,
    Meta,
    Metadata,
    ImportBase,
}

impl Element {
    /// The markup tag of this element.
    pub fn tag(&self) -> &'static str {
        match self {
            Element::Ncl(_) => "ncl",
            Element::Head(_) => "head",
            Element::Body(_) => "body",
            Element::RuleBase(_) => "ruleBase",
            Element::Rule(_) => "rule",
            Element::CompositeRule(_) => "compositeRule",
            Element::TransitionBase(_) => "transitionBase",
            Element::Transition(_) => "transition",
            Element::DescriptorBase(_) => "descriptorBase",
            Element::Descriptor(_) => "descriptor",
            Element::DescriptorParam(_) => "descriptorParam",
            Element::DescriptorSwitch(_) => "descriptorSwitch",
            Element::BindRule(_) => "bindRule",
            Element::ConnectorBase(_) => "connectorBase",
            Element::CausalConnector(_) => "causalConnector",
            Element::ConnectorParam(_) => "connectorParam",
            Element::SimpleCondition(_) => "simpleCondition",
            Element::CompoundCondition(_) => "compoundCondition",
            Element::SimpleAction(_) => "simpleAction",
            Element::CompoundAction(_) => "compoundAction",
            Element::Media(_) => "media",
            Element::Property(_) => "property",
            Element::Port(_) => "port",
            Element::Context(_) => "context",
            Element::Switch(_) => "switch",
            Element::Link(_) => "link",
            Element::Bind(_) => "bind",
            Element::Param(param) => param.kind().tag(),
            Element::Meta(_) => "meta",
            Element::Metadata(_) => "metadata",
            Element::ImportBase(_) => "importBase",
        }
    }

    /// The identifier references use to find this element: its `id`, or
    /// its `name` for named elements.
    pub fn label(&self) -> Option<Id> {
        match self {
            Element::Ncl(e) => e.id(),
            Element::Body(e) => e.id(),
            Element::RuleBase(e) => e.id(),
            Element::Rule(e) => e.id(),
            Element::CompositeRule(e) => e.id(),
            Element::TransitionBase(e) => e.id(),
            Element::Transition(e) => e.id(),
            Element::DescriptorBase(e) => e.id(),
            Element::Descriptor(e) => e.id(),
            Element::DescriptorSwitch(e) => e.id(),
            Element::ConnectorBase(e) => e.id(),
            Element::CausalConnector(e) => e.id(),
            Element::Media(e) => e.id(),
            Element::Port(e) => e.id(),
            Element::Context(e) => e.id(),
            Element::Switch(e) => e.id(),
            Element::Link(e) => e.id(),
            Element::ConnectorParam(e) => e.name(),
            Element::Property(e) => e.name(),
            Element::Param(e) => e.name().map(|reference| reference.id()),
            Element::DescriptorParam(_)
            | Element::Head(_)
            | Element::BindRule(_)
            | Element::SimpleCondition(_)
            | Element::CompoundCondition(_)
            | Element::SimpleAction(_)
            | Element::CompoundAction(_)
            | Element::Bind(_)
            | Element::Meta(_)
            | Element::Metadata(_)
            | Element::ImportBase(_) => None,
        }
    }

    /// Child collections in canonical order; empty for leaf elements.
    pub fn child_lists(&self) -> Vec<&Children> {
        match self {
            Element::Ncl(e) => e.child_lists(),
            Element::Head(e) => e.child_lists(),
            Element::Body(e) => e.child_lists(),
            Element::RuleBase(e) => e.child_lists(),
            Element::CompositeRule(e) => e.child_lists(),
            Element::TransitionBase(e) => e.child_lists(),
            Element::DescriptorBase(e) => e.child_lists(),
            Element::Descriptor(e) => e.child_lists(),
            Element::DescriptorSwitch(e) => e.child_lists(),
            Element::ConnectorBase(e) => e.child_lists(),
            Element::CausalConnector(e) => e.child_lists(),
            Element::CompoundCondition(e) => e.child_lists(),
            Element::CompoundAction(e) => e.child_lists(),
            Element::Media(e) => e.child_lists(),
            Element::Context(e) => e.child_lists(),
            Element::Switch(e) => e.child_lists(),
            Element::Link(e) => e.child_lists(),
            Element::Bind(e) => e.child_lists(),
            Element::Rule(_)
            | Element::Transition(_)
            | Element::DescriptorParam(_)
            | Element::BindRule(_)
            | Element::ConnectorParam(_)
            | Element::SimpleCondition(_)
            | Element::SimpleAction(_)
            | Element::Property(_)
            | Element::Port(_)
            | Element::Param(_)
            | Element::Meta(_)
            | Element::Metadata(_)
            | Element::ImportBase(_) => Vec::new(),
        }
    }

    pub(crate) fn child_lists_mut(&mut self) -> Vec<&mut Children> {
        match self {
            Element::Ncl(e) => e.child_lists_mut(),
            Element::Head(e) => e.child_lists_mut(),
            Element::Body(e) => e.child_lists_mut(),
            Element::RuleBase(e) => e.child_lists_mut(),
            Element::CompositeRule(e) => e.child_lists_mut(),
            Element::TransitionBase(e) => e.child_lists_mut(),
            Element::DescriptorBase(e) => e.child_lists_mut(),
            Element::Descriptor(e) => e.child_lists_mut(),
            Element::DescriptorSwitch(e) => e.child_lists_mut(),
            Element::ConnectorBase(e) => e.child_lists_mut(),
            Element::CausalConnector(e) => e.child_lists_mut(),
            Element::CompoundCondition(e) => e.child_lists_mut(),
            Element::CompoundAction(e) => e.child_lists_mut(),
            Element::Media(e) => e.child_lists_mut(),
            Element::Context(e) => e.child_lists_mut(),
            Element::Switch(e) => e.child_lists_mut(),
            Element::Link(e) => e.child_lists_mut(),
            Element::Bind(e) => e.child_lists_mut(),
            Element::Rule(_)
            | Element::Transition(_)
            | Element::DescriptorParam(_)
            | Element::BindRule(_)
            | Element::ConnectorParam(_)
            | Element::SimpleCondition(_)
            | Element::SimpleAction(_)
            | Element::Property(_)
            | Element::Port(_)
            | Element::Param(_)
            | Element::Meta(_)
            | Element::Metadata(_)
            | Element::ImportBase(_) => Vec::new(),
        }
    }
}
