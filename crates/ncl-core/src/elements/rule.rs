use crate::{
    elements::{ImportBase, Property, SetAttribute, non_empty},
    error::ModelError,
    identifier::Id,
    model::{Children, Reference, composite, holds},
    value::{Comparator, LogicalOperator},
};

/// Collection of test rules shared by the whole document.
#[derive(Debug, Clone)]
pub struct RuleBase {
    id: Option<Id>,
    imports: Children,
    rules: Children,
}

impl Default for RuleBase {
    fn default() -> Self {
        Self {
            id: None,
            imports: Children::keyed(),
            rules: Children::keyed(),
        }
    }
}

impl RuleBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// Bases imported from other documents, ordered by alias.
    pub fn imports(&self) -> &Children {
        &self.imports
    }

    pub fn rules(&self) -> &Children {
        &self.rules
    }
}

composite!(RuleBase { imports, rules });
holds!(RuleBase => imports: ImportBase);
holds!(RuleBase => rules: Rule);
holds!(RuleBase => rules: CompositeRule);

impl SetAttribute for RuleBase {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A predicate comparing a settings property against a value.
///
/// ```text
/// <rule id='rEn' var='system.language' comparator='eq' value='en'/>
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rule {
    id: Option<Id>,
    var: Option<Reference<Property>>,
    comparator: Option<Comparator>,
    value: Option<String>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// The tested property, looked up among the media properties of the
    /// whole body.
    pub fn var(&self) -> Option<&Reference<Property>> {
        self.var.as_ref()
    }

    pub fn set_var(&mut self, var: impl Into<Option<Reference<Property>>>) {
        self.var = var.into();
    }

    pub(crate) fn var_mut(&mut self) -> Option<&mut Reference<Property>> {
        self.var.as_mut()
    }

    pub fn comparator(&self) -> Option<Comparator> {
        self.comparator
    }

    pub fn set_comparator(&mut self, comparator: impl Into<Option<Comparator>>) {
        self.comparator = comparator.into();
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a blank value.
    pub fn set_value(&mut self, value: Option<&str>) -> Result<(), ModelError> {
        self.value = value.map(|value| non_empty("value", value)).transpose()?;
        Ok(())
    }
}

impl SetAttribute for Rule {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "var" => self.var = Some(Reference::placeholder(Id::parse(value)?)),
            "comparator" => self.comparator = Some(value.parse()?),
            "value" => self.set_value(Some(value))?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A boolean combination of rules.
#[derive(Debug, Clone)]
pub struct CompositeRule {
    id: Option<Id>,
    operator: Option<LogicalOperator>,
    rules: Children,
}

impl Default for CompositeRule {
    fn default() -> Self {
        Self {
            id: None,
            operator: None,
            rules: Children::keyed(),
        }
    }
}

impl CompositeRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn operator(&self) -> Option<LogicalOperator> {
        self.operator
    }

    pub fn set_operator(&mut self, operator: impl Into<Option<LogicalOperator>>) {
        self.operator = operator.into();
    }

    pub fn rules(&self) -> &Children {
        &self.rules
    }
}

composite!(CompositeRule { rules });
holds!(CompositeRule => rules: Rule);
holds!(CompositeRule => rules: CompositeRule);

impl SetAttribute for CompositeRule {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "operator" => self.operator = Some(value.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
