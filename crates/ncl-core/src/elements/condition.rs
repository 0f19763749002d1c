use crate::{
    elements::{
        ConnectorParam, Role, SetAttribute, assign_literal, assign_param, parse_number,
        parse_parameterized,
    },
    error::ModelError,
    model::{Children, Parameterized, Reference, composite, holds},
    value::{Cardinality, EventTransition, EventType, Key, LogicalOperator, Time},
};

/// An event condition of a connector.
///
/// `key` and `delay` are given either literally or through a connector
/// parameter; setting one form clears the other.
///
/// ```text
/// <simpleCondition role='onSelection' key='$keyCode' max='unbounded' qualifier='or'/>
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleCondition {
    role: Option<Role>,
    key: Option<Parameterized<Key>>,
    delay: Option<Parameterized<Time>>,
    min: Option<u32>,
    max: Option<Cardinality>,
    qualifier: Option<LogicalOperator>,
    event_type: Option<EventType>,
    transition: Option<EventTransition>,
}

impl SimpleCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn set_role(&mut self, role: impl Into<Option<Role>>) {
        self.role = role.into();
    }

    /// The literal key, if the key is not parameterized.
    pub fn key(&self) -> Option<Key> {
        self.key.as_ref().and_then(Parameterized::value).copied()
    }

    pub fn set_key(&mut self, key: impl Into<Option<Key>>) {
        assign_literal(&mut self.key, key.into());
    }

    /// The connector parameter supplying the key, if parameterized.
    pub fn key_param(&self) -> Option<&Reference<ConnectorParam>> {
        self.key.as_ref().and_then(Parameterized::as_param)
    }

    pub fn set_key_param(&mut self, param: impl Into<Option<Reference<ConnectorParam>>>) {
        assign_param(&mut self.key, param.into());
    }

    pub fn delay(&self) -> Option<Time> {
        self.delay.as_ref().and_then(Parameterized::value).copied()
    }

    pub fn set_delay(&mut self, delay: impl Into<Option<Time>>) {
        assign_literal(&mut self.delay, delay.into());
    }

    pub fn delay_param(&self) -> Option<&Reference<ConnectorParam>> {
        self.delay.as_ref().and_then(Parameterized::as_param)
    }

    pub fn set_delay_param(&mut self, param: impl Into<Option<Reference<ConnectorParam>>>) {
        assign_param(&mut self.delay, param.into());
    }

    pub fn min(&self) -> Option<u32> {
        self.min
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a negative minimum.
    pub fn set_min(&mut self, min: Option<i64>) -> Result<(), ModelError> {
        self.min = min.map(check_min).transpose()?;
        Ok(())
    }

    pub fn max(&self) -> Option<Cardinality> {
        self.max
    }

    pub fn set_max(&mut self, max: impl Into<Option<Cardinality>>) {
        self.max = max.into();
    }

    pub fn qualifier(&self) -> Option<LogicalOperator> {
        self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: impl Into<Option<LogicalOperator>>) {
        self.qualifier = qualifier.into();
    }

    pub fn event_type(&self) -> Option<EventType> {
        self.event_type
    }

    pub fn set_event_type(&mut self, event_type: impl Into<Option<EventType>>) {
        self.event_type = event_type.into();
    }

    pub fn transition(&self) -> Option<EventTransition> {
        self.transition
    }

    pub fn set_transition(&mut self, transition: impl Into<Option<EventTransition>>) {
        self.transition = transition.into();
    }

    pub(crate) fn params_mut(&mut self) -> [Option<&mut Reference<ConnectorParam>>; 2] {
        [
            self.key.as_mut().and_then(Parameterized::as_param_mut),
            self.delay.as_mut().and_then(Parameterized::as_param_mut),
        ]
    }
}

pub(crate) fn check_min(min: i64) -> Result<u32, ModelError> {
    u32::try_from(min)
        .map_err(|_| ModelError::invalid_argument("min", min, "must be a non-negative count"))
}

impl SetAttribute for SimpleCondition {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "role" => self.role = Some(value.parse()?),
            "key" => self.key = Some(parse_parameterized(value, str::parse)?),
            "delay" => self.delay = Some(parse_parameterized(value, str::parse)?),
            "min" => self.set_min(Some(parse_number("min", value)?))?,
            "max" => self.max = Some(value.parse()?),
            "qualifier" => self.qualifier = Some(value.parse()?),
            "eventType" => self.event_type = Some(value.parse()?),
            "transition" => self.transition = Some(value.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Conditions combined with `and` or `or`.
#[derive(Debug, Clone)]
pub struct CompoundCondition {
    operator: Option<LogicalOperator>,
    delay: Option<Parameterized<Time>>,
    conditions: Children,
}

impl Default for CompoundCondition {
    fn default() -> Self {
        Self {
            operator: None,
            delay: None,
            conditions: Children::keyed(),
        }
    }
}

impl CompoundCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operator(&self) -> Option<LogicalOperator> {
        self.operator
    }

    pub fn set_operator(&mut self, operator: impl Into<Option<LogicalOperator>>) {
        self.operator = operator.into();
    }

    pub fn delay(&self) -> Option<Time> {
        self.delay.as_ref().and_then(Parameterized::value).copied()
    }

    pub fn set_delay(&mut self, delay: impl Into<Option<Time>>) {
        assign_literal(&mut self.delay, delay.into());
    }

    pub fn delay_param(&self) -> Option<&Reference<ConnectorParam>> {
        self.delay.as_ref().and_then(Parameterized::as_param)
    }

    pub fn set_delay_param(&mut self, param: impl Into<Option<Reference<ConnectorParam>>>) {
        assign_param(&mut self.delay, param.into());
    }

    pub(crate) fn params_mut(&mut self) -> [Option<&mut Reference<ConnectorParam>>; 1] {
        [self.delay.as_mut().and_then(Parameterized::as_param_mut)]
    }

    pub fn conditions(&self) -> &Children {
        &self.conditions
    }
}

composite!(CompoundCondition { conditions });
holds!(CompoundCondition => conditions: SimpleCondition);
holds!(CompoundCondition => conditions: CompoundCondition);

impl SetAttribute for CompoundCondition {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "operator" => self.operator = Some(value.parse()?),
            "delay" => self.delay = Some(parse_parameterized(value, str::parse)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
