//! Element factories.
//!
//! Every container kind has a factory trait with one creation method per
//! child category it may own. [`DocumentBuilder`](crate::builder::DocumentBuilder)
//! obtains every element it builds from an [`ElementFactory`], so an
//! authoring tool can substitute specialized elements (a media with a
//! preset player type, a connector with preset parameters) by overriding
//! single methods, while resolution, validation and serialization stay
//! unchanged.
//!
//! # Example
//!
//! ```
//! # use ncl_core::{elements::Media, factory::{CompositionFactory, DocumentFactory, HeadFactory,
//! #     RuleBaseFactory, TransitionBaseFactory, DescriptorBaseFactory, ConnectorFactory,
//! #     LinkFactory, ElementFactory}};
//! #[derive(Default)]
//! struct HtmlFactory;
//!
//! impl CompositionFactory for HtmlFactory {
//!     fn create_media(&self) -> Media {
//!         let mut media = Media::new();
//!         media.set_media_type(Some("text/html"));
//!         media
//!     }
//! }
//!
//! impl DocumentFactory for HtmlFactory {}
//! impl HeadFactory for HtmlFactory {}
//! impl RuleBaseFactory for HtmlFactory {}
//! impl TransitionBaseFactory for HtmlFactory {}
//! impl DescriptorBaseFactory for HtmlFactory {}
//! impl ConnectorFactory for HtmlFactory {}
//! impl LinkFactory for HtmlFactory {}
//!
//! fn media_type<F: ElementFactory>(factory: &F) -> Option<String> {
//!     factory.create_media().media_type().map(str::to_string)
//! }
//!
//! assert_eq!(media_type(&HtmlFactory), Some("text/html".to_string()));
//! ```

use crate::elements::{
    Bind, BindRule, Body, CausalConnector, CompositeRule, CompoundAction, CompoundCondition,
    ConnectorBase, ConnectorParam, Context, Descriptor, DescriptorBase, DescriptorParam,
    DescriptorSwitch, Head, ImportBase, Link, Media, Meta, Metadata, Param, ParamKind, Port,
    Property, Rule, RuleBase, SimpleAction, SimpleCondition, Switch, Transition, TransitionBase,
};

/// Children of the `<ncl>` root.
pub trait DocumentFactory {
    fn create_head(&self) -> Head {
        Head::new()
    }

    fn create_body(&self) -> Body {
        Body::new()
    }
}

/// Bases owned by `<head>` and the imports inside them.
pub trait HeadFactory {
    fn create_rule_base(&self) -> RuleBase {
        RuleBase::new()
    }

    fn create_transition_base(&self) -> TransitionBase {
        TransitionBase::new()
    }

    fn create_descriptor_base(&self) -> DescriptorBase {
        DescriptorBase::new()
    }

    fn create_connector_base(&self) -> ConnectorBase {
        ConnectorBase::new()
    }

    fn create_import_base(&self) -> ImportBase {
        ImportBase::new()
    }
}

/// Children of rule bases and composite rules.
pub trait RuleBaseFactory {
    fn create_rule(&self) -> Rule {
        Rule::new()
    }

    fn create_composite_rule(&self) -> CompositeRule {
        CompositeRule::new()
    }
}

pub trait TransitionBaseFactory {
    fn create_transition(&self) -> Transition {
        Transition::new()
    }
}

/// Children of descriptor bases, descriptors and descriptor switches.
pub trait DescriptorBaseFactory {
    fn create_descriptor(&self) -> Descriptor {
        Descriptor::new()
    }

    fn create_descriptor_param(&self) -> DescriptorParam {
        DescriptorParam::new()
    }

    fn create_descriptor_switch(&self) -> DescriptorSwitch {
        DescriptorSwitch::new()
    }

    /// A bind rule inside a descriptor switch.
    fn create_descriptor_bind_rule(&self) -> BindRule {
        BindRule::new()
    }
}

/// Children of connector bases and causal connectors.
pub trait ConnectorFactory {
    fn create_causal_connector(&self) -> CausalConnector {
        CausalConnector::new()
    }

    fn create_connector_param(&self) -> ConnectorParam {
        ConnectorParam::new()
    }

    fn create_simple_condition(&self) -> SimpleCondition {
        SimpleCondition::new()
    }

    fn create_compound_condition(&self) -> CompoundCondition {
        CompoundCondition::new()
    }

    fn create_simple_action(&self) -> SimpleAction {
        SimpleAction::new()
    }

    fn create_compound_action(&self) -> CompoundAction {
        CompoundAction::new()
    }
}

/// Children of the body, contexts, switches and media.
pub trait CompositionFactory {
    fn create_media(&self) -> Media {
        Media::new()
    }

    fn create_context(&self) -> Context {
        Context::new()
    }

    fn create_switch(&self) -> Switch {
        Switch::new()
    }

    fn create_port(&self) -> Port {
        Port::new()
    }

    fn create_property(&self) -> Property {
        Property::new()
    }

    fn create_meta(&self) -> Meta {
        Meta::new()
    }

    fn create_metadata(&self) -> Metadata {
        Metadata::new()
    }

    fn create_link(&self) -> Link {
        Link::new()
    }

    /// A bind rule inside a switch.
    fn create_switch_bind_rule(&self) -> BindRule {
        BindRule::new()
    }
}

/// Children of links and binds.
pub trait LinkFactory {
    fn create_bind(&self) -> Bind {
        Bind::new()
    }

    fn create_link_param(&self) -> Param {
        Param::new(ParamKind::LinkParam)
    }

    fn create_bind_param(&self) -> Param {
        Param::new(ParamKind::BindParam)
    }
}

/// A factory for every container kind.
///
/// Implemented for every type implementing all factory families.
pub trait ElementFactory:
    DocumentFactory
    + HeadFactory
    + RuleBaseFactory
    + TransitionBaseFactory
    + DescriptorBaseFactory
    + ConnectorFactory
    + CompositionFactory
    + LinkFactory
{
}

impl<T> ElementFactory for T where
    T: DocumentFactory
        + HeadFactory
        + RuleBaseFactory
        + TransitionBaseFactory
        + DescriptorBaseFactory
        + ConnectorFactory
        + CompositionFactory
        + LinkFactory
{
}

/// Creates the base element of every category.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFactory;

impl DocumentFactory for DefaultFactory {}
impl HeadFactory for DefaultFactory {}
impl RuleBaseFactory for DefaultFactory {}
impl TransitionBaseFactory for DefaultFactory {}
impl DescriptorBaseFactory for DefaultFactory {}
impl ConnectorFactory for DefaultFactory {}
impl CompositionFactory for DefaultFactory {}
impl LinkFactory for DefaultFactory {}
