use crate::{
    elements::{
        ConnectorParam, Role, SetAttribute, condition::check_min, non_empty, parse_number,
        parse_parameterized,
    },
    error::ModelError,
    model::{Children, Parameterized, Reference, composite, holds},
    value::{ActionOperator, ActionType, Cardinality, EventType, Time},
};

/// An action of a connector.
///
/// Parameterizable attributes take a [`Parameterized`] value, so a literal
/// and a `$param` form can never be set at the same time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleAction {
    role: Option<Role>,
    value: Option<Parameterized<String>>,
    delay: Option<Parameterized<Time>>,
    min: Option<u32>,
    max: Option<Cardinality>,
    qualifier: Option<ActionOperator>,
    event_type: Option<EventType>,
    action_type: Option<ActionType>,
    repeat: Option<Parameterized<u32>>,
    repeat_delay: Option<Parameterized<Time>>,
    duration: Option<Parameterized<Time>>,
    by: Option<Parameterized<String>>,
}

impl SimpleAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn set_role(&mut self, role: impl Into<Option<Role>>) {
        self.role = role.into();
    }

    /// The value assigned by a `set` action.
    pub fn value(&self) -> Option<&Parameterized<String>> {
        self.value.as_ref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a blank literal value.
    pub fn set_value(&mut self, value: Option<Parameterized<String>>) -> Result<(), ModelError> {
        if let Some(Parameterized::Value(text)) = &value {
            non_empty("value", text)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn delay(&self) -> Option<&Parameterized<Time>> {
        self.delay.as_ref()
    }

    pub fn set_delay(&mut self, delay: Option<Parameterized<Time>>) {
        self.delay = delay;
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

    pub fn qualifier(&self) -> Option<ActionOperator> {
        self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: impl Into<Option<ActionOperator>>) {
        self.qualifier = qualifier.into();
    }

    pub fn event_type(&self) -> Option<EventType> {
        self.event_type
    }

    pub fn set_event_type(&mut self, event_type: impl Into<Option<EventType>>) {
        self.event_type = event_type.into();
    }

    pub fn action_type(&self) -> Option<ActionType> {
        self.action_type
    }

    pub fn set_action_type(&mut self, action_type: impl Into<Option<ActionType>>) {
        self.action_type = action_type.into();
    }

    pub fn repeat(&self) -> Option<&Parameterized<u32>> {
        self.repeat.as_ref()
    }

    pub fn set_repeat(&mut self, repeat: Option<Parameterized<u32>>) {
        self.repeat = repeat;
    }

    pub fn repeat_delay(&self) -> Option<&Parameterized<Time>> {
        self.repeat_delay.as_ref()
    }

    pub fn set_repeat_delay(&mut self, delay: Option<Parameterized<Time>>) {
        self.repeat_delay = delay;
    }

    pub fn duration(&self) -> Option<&Parameterized<Time>> {
        self.duration.as_ref()
    }

    pub fn set_duration(&mut self, duration: Option<Parameterized<Time>>) {
        self.duration = duration;
    }

    /// Step of an animated attribution.
    pub fn by(&self) -> Option<&Parameterized<String>> {
        self.by.as_ref()
    }

    pub fn set_by(&mut self, by: Option<Parameterized<String>>) {
        self.by = by;
    }

    pub(crate) fn params_mut(&mut self) -> [Option<&mut Reference<ConnectorParam>>; 6] {
        [
            self.value.as_mut().and_then(Parameterized::as_param_mut),
            self.delay.as_mut().and_then(Parameterized::as_param_mut),
            self.repeat.as_mut().and_then(Parameterized::as_param_mut),
            self.repeat_delay.as_mut().and_then(Parameterized::as_param_mut),
            self.duration.as_mut().and_then(Parameterized::as_param_mut),
            self.by.as_mut().and_then(Parameterized::as_param_mut),
        ]
    }
}

fn parse_text(value: &str) -> Result<String, ModelError> {
    non_empty("value", value)
}

impl SetAttribute for SimpleAction {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "role" => self.role = Some(value.parse()?),
            "value" => self.value = Some(parse_parameterized(value, parse_text)?),
            "delay" => self.delay = Some(parse_parameterized(value, str::parse)?),
            "min" => self.set_min(Some(parse_number("min", value)?))?,
            "max" => self.max = Some(value.parse()?),
            "qualifier" => self.qualifier = Some(value.parse()?),
            "eventType" => self.event_type = Some(value.parse()?),
            "actionType" => self.action_type = Some(value.parse()?),
            "repeat" => {
                self.repeat = Some(parse_parameterized(value, |v| parse_number("repeat", v))?);
            }
            "repeatDelay" => self.repeat_delay = Some(parse_parameterized(value, str::parse)?),
            "duration" => self.duration = Some(parse_parameterized(value, str::parse)?),
            "by" => self.by = Some(parse_parameterized(value, parse_text)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Actions run in parallel (`par`) or in sequence (`seq`).
///
/// Members keep insertion order, which is the execution order of `seq`.
#[derive(Debug, Clone)]
pub struct CompoundAction {
    operator: Option<ActionOperator>,
    delay: Option<Parameterized<Time>>,
    actions: Children,
}

impl Default for CompoundAction {
    fn default() -> Self {
        Self {
            operator: None,
            delay: None,
            actions: Children::ordered(),
        }
    }
}

impl CompoundAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operator(&self) -> Option<ActionOperator> {
        self.operator
    }

    pub fn set_operator(&mut self, operator: impl Into<Option<ActionOperator>>) {
        self.operator = operator.into();
    }

    pub fn delay(&self) -> Option<&Parameterized<Time>> {
        self.delay.as_ref()
    }

    pub fn set_delay(&mut self, delay: Option<Parameterized<Time>>) {
        self.delay = delay;
    }

    pub(crate) fn params_mut(&mut self) -> [Option<&mut Reference<ConnectorParam>>; 1] {
        [self.delay.as_mut().and_then(Parameterized::as_param_mut)]
    }

    pub fn actions(&self) -> &Children {
        &self.actions
    }
}

composite!(CompoundAction { actions });
holds!(CompoundAction => actions: SimpleAction);
holds!(CompoundAction => actions: CompoundAction);

impl SetAttribute for CompoundAction {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "operator" => self.operator = Some(value.parse()?),
            "delay" => self.delay = Some(parse_parameterized(value, str::parse)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Id;

    #[test]
    fn test_value_forms() {
        let mut action = SimpleAction::new();

        action
            .set_value(Some(Parameterized::Value("50%".to_string())))
            .unwrap();
        assert_eq!(action.value().and_then(Parameterized::value).unwrap(), "50%");

        action
            .set_value(Some(Parameterized::param(Id::parse("level").unwrap())))
            .unwrap();
        assert!(action.value().and_then(Parameterized::value).is_none());

        assert!(
            action
                .set_value(Some(Parameterized::Value(String::new())))
                .is_err()
        );
        assert!(action.value().unwrap().as_param().is_some());
    }

    #[test]
    fn test_action_attributes() {
        let mut action = SimpleAction::new();

        assert_eq!(action.set_attribute("role", "start"), Ok(true));
        assert_eq!(action.set_attribute("repeat", "$times"), Ok(true));
        assert_eq!(action.set_attribute("qualifier", "seq"), Ok(true));
        assert_eq!(action.set_attribute("actionType", "resume"), Ok(true));
        assert!(action.set_attribute("min", "-2").is_err());

        assert_eq!(action.qualifier(), Some(ActionOperator::Seq));
        assert_eq!(action.action_type(), Some(ActionType::Resume));
        assert_eq!(action.repeat().unwrap().as_param().unwrap().id(), "times");
        assert_eq!(action.min(), None);
    }
}
