use crate::{
    elements::{Context, Media, SetAttribute},
    error::ModelError,
    identifier::Id,
    model::{Children, CompositionNode, Constituent, Reference, TestRule, composite, holds},
};

/// Selects one of its nodes by evaluating bind rules in order.
#[derive(Debug, Clone)]
pub struct Switch {
    id: Option<Id>,
    bind_rules: Children,
    default_component: Option<Reference<CompositionNode>>,
    nodes: Children,
}

impl Default for Switch {
    fn default() -> Self {
        Self {
            id: None,
            bind_rules: Children::ordered(),
            default_component: None,
            nodes: Children::keyed(),
        }
    }
}

impl Switch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn bind_rules(&self) -> &Children {
        &self.bind_rules
    }

    /// The node chosen when no bind rule holds; one of this switch's own
    /// nodes.
    pub fn default_component(&self) -> Option<&Reference<CompositionNode>> {
        self.default_component.as_ref()
    }

    pub fn set_default_component(
        &mut self,
        component: impl Into<Option<Reference<CompositionNode>>>,
    ) {
        self.default_component = component.into();
    }

    pub(crate) fn default_component_mut(&mut self) -> Option<&mut Reference<CompositionNode>> {
        self.default_component.as_mut()
    }

    pub fn nodes(&self) -> &Children {
        &self.nodes
    }
}

composite!(Switch { bind_rules, nodes });
holds!(Switch => bind_rules: BindRule);
holds!(Switch => nodes: Media);
holds!(Switch => nodes: Context);
holds!(Switch => nodes: Switch);

impl SetAttribute for Switch {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Associates a rule with the alternative chosen when the rule holds.
///
/// The constituent is looked up among the siblings owned by the enclosing
/// switch (nodes) or descriptor switch (descriptors).
#[derive(Debug, Clone, Default)]
pub struct BindRule {
    rule: Option<Reference<TestRule>>,
    constituent: Option<Reference<Constituent>>,
}

impl BindRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(&self) -> Option<&Reference<TestRule>> {
        self.rule.as_ref()
    }

    pub fn set_rule(&mut self, rule: impl Into<Option<Reference<TestRule>>>) {
        self.rule = rule.into();
    }

    pub(crate) fn rule_mut(&mut self) -> Option<&mut Reference<TestRule>> {
        self.rule.as_mut()
    }

    pub fn constituent(&self) -> Option<&Reference<Constituent>> {
        self.constituent.as_ref()
    }

    pub fn set_constituent(&mut self, constituent: impl Into<Option<Reference<Constituent>>>) {
        self.constituent = constituent.into();
    }

    pub(crate) fn constituent_mut(&mut self) -> Option<&mut Reference<Constituent>> {
        self.constituent.as_mut()
    }
}

impl SetAttribute for BindRule {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "rule" => self.rule = Some(Reference::placeholder(Id::parse(value)?)),
            "constituent" => self.constituent = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
