//! Structural validation.
//!
//! Every element kind defines presence checks for its required attributes
//! (errors) and consistency checks between attributes (warnings). A
//! container validates every child, whatever its own outcome, and merges the
//! children's diagnostics into its own. Each run replaces the diagnostics of
//! the elements it visits.

use log::{debug, info};

use crate::{
    elements::{
        Bind, CausalConnector, CompositeRule, CompoundAction, CompoundCondition, Context,
        Descriptor, DescriptorSwitch, Link, Media, Param, ParamKind, Port, Rule, SimpleAction,
        SimpleCondition, Switch, Transition,
    },
    error::{Diagnostic, Diagnostics, ErrorCode},
    identifier::Id,
    model::{Children, Document, Element, NodeId, Parameterized, Reference},
    value::{Cardinality, DefaultActionRole, EventType, TransitionType},
};

/// Outcome of the checks of one element.
struct Checks {
    subject: String,
    diagnostics: Diagnostics,
    valid: bool,
}

impl Checks {
    fn new(element: &Element) -> Self {
        let subject = match element.label() {
            Some(label) => format!("`{}` `{label}`", element.tag()),
            None => format!("`{}`", element.tag()),
        };
        Self {
            subject,
            diagnostics: Diagnostics::new(),
            valid: true,
        }
    }

    fn require(&mut self, attribute: &str, present: bool) {
        if !present {
            self.error(
                ErrorCode::E200,
                format!("missing required attribute `{attribute}`"),
            );
        }
    }

    /// A warning for a missing attribute the configuration calls for.
    fn require_warning(&mut self, attribute: &str, present: bool) {
        if !present {
            self.warning(
                ErrorCode::E200,
                format!("attribute `{attribute}` should be specified"),
            );
        }
    }

    /// A warning for an attribute that has no effect in this configuration.
    fn unexpected(&mut self, attribute: &str, present: bool) {
        if present {
            self.warning(
                ErrorCode::E201,
                format!("attribute `{attribute}` should not be specified"),
            );
        }
    }

    /// A warning for a reference attribute that points at no element.
    fn dangling(&mut self, reference: Dangling) {
        let Dangling {
            attribute,
            target,
            pending,
        } = reference;
        let message = if pending {
            format!("reference `{target}` in attribute `{attribute}` has not been resolved")
        } else {
            format!("unresolved reference `{target}` in attribute `{attribute}`")
        };
        self.warning(ErrorCode::E300, message);
    }

    fn error(&mut self, code: ErrorCode, message: String) {
        self.valid = false;
        let diagnostic = Diagnostic::error(format!("{}: {message}", self.subject)).with_code(code);
        self.diagnostics.emit(diagnostic);
    }

    fn warning(&mut self, code: ErrorCode, message: String) {
        self.valid = false;
        let diagnostic =
            Diagnostic::warning(format!("{}: {message}", self.subject)).with_code(code);
        self.diagnostics.emit(diagnostic);
    }
}

impl Document {
    /// Validates the whole document.
    ///
    /// Returns `true` when no element reported an error or a warning. The
    /// diagnostics are available afterwards through
    /// [`Document::diagnostics`]; the root holds all of them.
    pub fn validate(&mut self) -> bool {
        info!("Validating document");
        let root = self.root().id();
        let valid = self.validate_subtree(root);
        debug!(
            valid,
            errors = self.errors(root).len(),
            warnings = self.warnings(root).len();
            "Validation finished"
        );
        valid
    }

    /// Validates `id` and everything below it.
    pub fn validate_subtree(&mut self, id: NodeId) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        let mut checks = Checks::new(element);
        self.check(id, element, &mut checks);
        for reference in dangling_references(element) {
            checks.dangling(reference);
        }

        let Checks {
            mut diagnostics,
            mut valid,
            ..
        } = checks;
        for child in self.child_ids(id) {
            valid &= self.validate_subtree(child);
            if let Some(from_child) = self.diagnostics(child) {
                diagnostics.merge(from_child);
            }
        }

        if let Some(slot) = self.diagnostics_mut(id) {
            *slot = diagnostics;
        }
        valid
    }

    fn check(&self, id: NodeId, element: &Element, checks: &mut Checks) {
        match element {
            Element::Ncl(ncl) => checks.require("id", ncl.id().is_some()),
            Element::Head(_) | Element::Body(_) => {}
            Element::RuleBase(base) => {
                require_children(checks, "rule", base.rules(), base.imports())
            }
            Element::TransitionBase(base) => {
                require_children(checks, "transition", base.transitions(), base.imports())
            }
            Element::DescriptorBase(base) => {
                require_children(checks, "descriptor", base.descriptors(), base.imports())
            }
            Element::ConnectorBase(base) => {
                require_children(checks, "causalConnector", base.connectors(), base.imports())
            }
            Element::Rule(rule) => self.check_rule(rule, checks),
            Element::CompositeRule(rule) => check_composite_rule(rule, checks),
            Element::Transition(transition) => check_transition(transition, checks),
            Element::Descriptor(descriptor) => check_descriptor(descriptor, checks),
            Element::DescriptorParam(param) => {
                checks.require("name", param.name().is_some());
                checks.require("value", param.value().is_some());
            }
            Element::DescriptorSwitch(switch) => self.check_descriptor_switch(id, switch, checks),
            Element::BindRule(rule) => {
                checks.require("rule", rule.rule().is_some());
                checks.require("constituent", rule.constituent().is_some());
                if let Some(constituent) = rule.constituent().and_then(Reference::target_id) {
                    if self.parent(constituent) != self.parent(id) {
                        checks.error(
                            ErrorCode::E205,
                            "attribute `constituent` must refer to an element of the enclosing switch"
                                .to_string(),
                        );
                    }
                }
            }
            Element::CausalConnector(connector) => check_connector(connector, checks),
            Element::ConnectorParam(param) => checks.require("name", param.name().is_some()),
            Element::SimpleCondition(condition) => check_simple_condition(condition, checks),
            Element::CompoundCondition(condition) => check_compound_condition(condition, checks),
            Element::SimpleAction(action) => check_simple_action(action, checks),
            Element::CompoundAction(action) => check_compound_action(action, checks),
            Element::Media(media) => check_media(media, checks),
            Element::Property(property) => checks.require("name", property.name().is_some()),
            Element::Port(port) => self.check_port(id, port, checks),
            Element::Context(context) => self.check_context(id, context, checks),
            Element::Switch(switch) => self.check_switch(id, switch, checks),
            Element::Link(link) => self.check_link(link, checks),
            Element::Bind(bind) => self.check_bind(id, bind, checks),
            Element::Param(param) => self.check_param(id, param, checks),
            Element::Meta(meta) => {
                checks.require("name", meta.name().is_some());
                checks.require("content", meta.content().is_some());
            }
            Element::Metadata(_) => {}
            Element::ImportBase(import) => {
                checks.require("documentURI", import.document_uri().is_some());
                checks.require("alias", import.alias().is_some());
            }
        }
    }

    fn check_rule(&self, rule: &Rule, checks: &mut Checks) {
        checks.require("id", rule.id().is_some());
        checks.require("var", rule.var().is_some());
        checks.require("comparator", rule.comparator().is_some());
        checks.require("value", rule.value().is_some());

        let Some(property) = rule.var().and_then(Reference::target_id) else {
            return;
        };
        let owner = self
            .parent(property)
            .and_then(|parent| self.cast::<Media>(parent))
            .and_then(|media| self.get(media));
        match owner {
            Some(media) if media.is_settings() => {}
            Some(_) => checks.warning(
                ErrorCode::E205,
                "attribute `var` should refer to a property of a settings media".to_string(),
            ),
            None => checks.warning(
                ErrorCode::E205,
                "attribute `var` should refer to a property of a media".to_string(),
            ),
        }
    }

    fn check_descriptor_switch(&self, id: NodeId, switch: &DescriptorSwitch, checks: &mut Checks) {
        checks.require("id", switch.id().is_some());
        if switch.descriptors().is_empty() || switch.bind_rules().is_empty() {
            checks.error(
                ErrorCode::E203,
                "expected at least one `descriptor` and one `bindRule`".to_string(),
            );
        }
        let default = switch.default_descriptor().and_then(Reference::target_id);
        if default.is_some_and(|default| self.parent(default) != Some(id)) {
            checks.error(
                ErrorCode::E205,
                "`defaultDescriptor` must refer to a descriptor of this switch".to_string(),
            );
        }
    }

    fn check_port(&self, id: NodeId, port: &Port, checks: &mut Checks) {
        checks.require("id", port.id().is_some());
        checks.require("component", port.component().is_some());

        let Some(component) = port.component().and_then(Reference::target_id) else {
            return;
        };
        if self.parent(component) != self.parent(id) {
            checks.error(
                ErrorCode::E205,
                "attribute `component` must refer to a node of the enclosing composition"
                    .to_string(),
            );
        }
        let interface = port.interface().and_then(Reference::target_id);
        if interface.is_some_and(|interface| self.parent(interface) != Some(component)) {
            checks.error(
                ErrorCode::E205,
                "attribute `interface` must refer to an interface of the component".to_string(),
            );
        }
    }

    fn check_context(&self, id: NodeId, context: &Context, checks: &mut Checks) {
        checks.require("id", context.id().is_some());

        let Some(refer) = context.refer() else {
            return;
        };
        let refers_to_self = match refer.target_id() {
            Some(target) => target == id || self.ancestors(target).any(|ancestor| ancestor == id),
            None => context.id() == Some(refer.id()),
        };
        if refers_to_self {
            checks.error(
                ErrorCode::E204,
                "a context must not refer to itself or to a context nested in it".to_string(),
            );
        }
    }

    fn check_switch(&self, id: NodeId, switch: &Switch, checks: &mut Checks) {
        checks.require("id", switch.id().is_some());
        if switch.nodes().is_empty() {
            checks.error(
                ErrorCode::E203,
                "expected at least one `media`, `context` or `switch`".to_string(),
            );
        }
        let default = switch.default_component().and_then(Reference::target_id);
        if default.is_some_and(|default| self.parent(default) != Some(id)) {
            checks.error(
                ErrorCode::E205,
                "`defaultComponent` must refer to a node of this switch".to_string(),
            );
        }
    }

    fn check_link(&self, link: &Link, checks: &mut Checks) {
        checks.require("xconnector", link.xconnector().is_some());
        if link.binds().len() < 2 {
            checks.error(
                ErrorCode::E203,
                "expected at least two `bind` elements".to_string(),
            );
        }
        for param in self.params_of(link.params().ids()) {
            if param.kind() != ParamKind::LinkParam {
                checks.error(
                    ErrorCode::E207,
                    format!("`{}` is not allowed in a link", param.kind().tag()),
                );
            }
        }
    }

    fn check_bind(&self, id: NodeId, bind: &Bind, checks: &mut Checks) {
        checks.require("role", bind.role().is_some());
        checks.require("component", bind.component().is_some());

        for param in self.params_of(bind.params().ids()) {
            if param.kind() != ParamKind::BindParam {
                checks.error(
                    ErrorCode::E207,
                    format!("`{}` is not allowed in a bind", param.kind().tag()),
                );
            }
        }

        let (Some(role), Some(connector)) = (bind.role(), self.link_connector(id)) else {
            return;
        };
        if !self.connector_has_role(connector, role.name()) {
            checks.error(
                ErrorCode::E205,
                format!("role `{role}` is not defined by the link's connector"),
            );
        }
    }

    fn check_param(&self, id: NodeId, param: &Param, checks: &mut Checks) {
        checks.require("name", param.name().is_some());
        checks.require("value", param.value().is_some());

        let (Some(name), Some(connector)) = (param.name(), self.link_connector(id)) else {
            return;
        };
        let defined = self.child_ids(connector).into_iter().any(|child| {
            matches!(self.element(child), Some(Element::ConnectorParam(p)) if p.name() == Some(name.id()))
        });
        if !defined {
            checks.error(
                ErrorCode::E205,
                format!(
                    "parameter `{}` is not defined by the link's connector",
                    name.id()
                ),
            );
        }
    }

    fn params_of<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = &'a Param> + 'a {
        ids.iter().filter_map(|id| match self.element(*id) {
            Some(Element::Param(param)) => Some(param),
            _ => None,
        })
    }

    /// The resolved connector of the link enclosing a bind or parameter.
    fn link_connector(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find_map(|ancestor| match self.element(ancestor) {
            Some(Element::Link(link)) => link.xconnector().and_then(Reference::target_id),
            _ => None,
        })
    }

    /// Returns `true` if a condition or action of `connector`, at any
    /// nesting depth, uses `role`.
    fn connector_has_role(&self, connector: NodeId, role: Id) -> bool {
        self.child_ids(connector).into_iter().any(|child| {
            let uses_role = match self.element(child) {
                Some(Element::SimpleCondition(condition)) => {
                    condition.role().is_some_and(|r| r.name() == role)
                }
                Some(Element::SimpleAction(action)) => {
                    action.role().is_some_and(|r| r.name() == role)
                }
                _ => false,
            };
            uses_role || self.connector_has_role(child, role)
        })
    }
}

/// A reference attribute that points at no element.
struct Dangling {
    attribute: &'static str,
    target: Id,
    /// The resolver has not visited it yet.
    pending: bool,
}

fn dangling<T>(attribute: &'static str, reference: Option<&Reference<T>>) -> Option<Dangling> {
    let reference = reference.filter(|reference| !reference.is_resolved())?;
    Some(Dangling {
        attribute,
        target: reference.id(),
        pending: reference.is_placeholder(),
    })
}

fn dangling_references(element: &Element) -> Vec<Dangling> {
    let references = match element {
        Element::Rule(rule) => vec![dangling("var", rule.var())],
        Element::Descriptor(descriptor) => vec![
            dangling("transIn", descriptor.trans_in()),
            dangling("transOut", descriptor.trans_out()),
        ],
        Element::DescriptorSwitch(switch) => {
            vec![dangling("defaultDescriptor", switch.default_descriptor())]
        }
        Element::BindRule(rule) => vec![
            dangling("rule", rule.rule()),
            dangling("constituent", rule.constituent()),
        ],
        Element::SimpleCondition(condition) => vec![
            dangling("key", condition.key_param()),
            dangling("delay", condition.delay_param()),
        ],
        Element::CompoundCondition(condition) => vec![dangling("delay", condition.delay_param())],
        Element::SimpleAction(action) => vec![
            dangling("value", action.value().and_then(Parameterized::as_param)),
            dangling("delay", action.delay().and_then(Parameterized::as_param)),
            dangling("repeat", action.repeat().and_then(Parameterized::as_param)),
            dangling("repeatDelay", action.repeat_delay().and_then(Parameterized::as_param)),
            dangling("duration", action.duration().and_then(Parameterized::as_param)),
            dangling("by", action.by().and_then(Parameterized::as_param)),
        ],
        Element::CompoundAction(action) => {
            vec![dangling("delay", action.delay().and_then(Parameterized::as_param))]
        }
        Element::Media(media) => vec![dangling("descriptor", media.descriptor())],
        Element::Port(port) => vec![
            dangling("component", port.component()),
            dangling("interface", port.interface()),
        ],
        Element::Context(context) => vec![dangling("refer", context.refer())],
        Element::Switch(switch) => vec![dangling("defaultComponent", switch.default_component())],
        Element::Link(link) => vec![dangling("xconnector", link.xconnector())],
        Element::Bind(bind) => vec![
            dangling("component", bind.component()),
            dangling("interface", bind.interface()),
            dangling("descriptor", bind.descriptor()),
        ],
        Element::Param(param) => vec![dangling("name", param.name())],
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
        | Element::ImportBase(_) => Vec::new(),
    };
    references.into_iter().flatten().collect()
}

/// A base needs at least one element of its own kind or an import.
fn require_children(checks: &mut Checks, child: &str, own: &Children, imports: &Children) {
    if own.is_empty() && imports.is_empty() {
        checks.warning(
            ErrorCode::E203,
            format!("expected at least one `{child}` or `importBase`"),
        );
    }
}

fn check_composite_rule(rule: &CompositeRule, checks: &mut Checks) {
    checks.require("id", rule.id().is_some());
    checks.require("operator", rule.operator().is_some());
    if rule.rules().is_empty() {
        checks.error(ErrorCode::E203, "expected at least one rule".to_string());
    }
}

fn check_transition(transition: &Transition, checks: &mut Checks) {
    checks.require("id", transition.id().is_some());
    checks.require("type", transition.transition_type().is_some());

    match (transition.transition_type(), transition.subtype()) {
        (Some(transition_type), Some(subtype)) if subtype.transition_type() != transition_type => {
            checks.error(
                ErrorCode::E206,
                format!("subtype `{subtype}` does not belong to type `{transition_type}`"),
            );
        }
        (None, Some(_)) => checks.error(
            ErrorCode::E202,
            "attribute `subtype` requires attribute `type`".to_string(),
        ),
        _ => {}
    }

    let fades_color = transition.transition_type() == Some(TransitionType::Fade)
        && transition.subtype().is_some_and(|subtype| subtype.uses_fade_color());
    if fades_color {
        checks.require_warning("fadeColor", transition.fade_color().is_some());
    } else {
        checks.unexpected("fadeColor", transition.fade_color().is_some());
    }
}

fn check_descriptor(descriptor: &Descriptor, checks: &mut Checks) {
    checks.require("id", descriptor.id().is_some());
}

fn check_connector(connector: &CausalConnector, checks: &mut Checks) {
    checks.require("id", connector.id().is_some());
    if connector.condition().is_empty() {
        checks.error(ErrorCode::E203, "expected a condition".to_string());
    }
    if connector.action().is_empty() {
        checks.error(ErrorCode::E203, "expected an action".to_string());
    }
}

/// Qualifiers combine several bound elements; they are only meaningful when
/// `max` is not 1. An absent `max` counts as 1.
fn check_qualifier(max: Option<Cardinality>, qualified: bool, checks: &mut Checks) {
    let single = max.unwrap_or_default().is_one();
    if single && qualified {
        checks.warning(
            ErrorCode::E202,
            "attribute `qualifier` should not be specified when `max` is 1".to_string(),
        );
    } else if !single && !qualified {
        checks.warning(
            ErrorCode::E202,
            "attribute `qualifier` should be specified when `max` is not 1".to_string(),
        );
    }
}

fn check_simple_condition(condition: &SimpleCondition, checks: &mut Checks) {
    checks.require("role", condition.role().is_some());
    let has_key = condition.key().is_some() || condition.key_param().is_some();

    if let Some(role) = condition.role() {
        let selection = match role.condition_role() {
            Some(default) => default.is_selection(),
            None => {
                checks.require("eventType", condition.event_type().is_some());
                checks.require("transition", condition.transition().is_some());
                condition.event_type() == Some(EventType::Selection)
            }
        };
        if selection {
            checks.require("key", has_key);
        } else {
            checks.unexpected("key", has_key);
        }
    }

    check_qualifier(condition.max(), condition.qualifier().is_some(), checks);
}

fn check_compound_condition(condition: &CompoundCondition, checks: &mut Checks) {
    checks.require("operator", condition.operator().is_some());
    if condition.conditions().is_empty() {
        checks.error(ErrorCode::E203, "expected at least one condition".to_string());
    }
}

fn check_simple_action(action: &SimpleAction, checks: &mut Checks) {
    checks.require("role", action.role().is_some());

    if let Some(role) = action.role() {
        let sets_value = match role.action_role() {
            Some(default) => default == DefaultActionRole::Set,
            None => {
                checks.require("eventType", action.event_type().is_some());
                checks.require("actionType", action.action_type().is_some());
                action.event_type() == Some(EventType::Attribution)
            }
        };
        if sets_value {
            checks.require("value", action.value().is_some());
        } else {
            checks.unexpected("value", action.value().is_some());
        }
    }

    check_qualifier(action.max(), action.qualifier().is_some(), checks);
    if action.repeat_delay().is_some() && action.repeat().is_none() {
        checks.warning(
            ErrorCode::E202,
            "attribute `repeatDelay` has no effect without `repeat`".to_string(),
        );
    }
}

fn check_compound_action(action: &CompoundAction, checks: &mut Checks) {
    checks.require("operator", action.operator().is_some());
    if action.actions().is_empty() {
        checks.error(ErrorCode::E203, "expected at least one action".to_string());
    }
}

fn check_media(media: &Media, checks: &mut Checks) {
    checks.require("id", media.id().is_some());
    if media.src().is_none() && media.media_type().is_none() {
        checks.warning(
            ErrorCode::E200,
            "either `src` or `type` should be specified".to_string(),
        );
    }
}
