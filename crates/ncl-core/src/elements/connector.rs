use std::{fmt, str::FromStr};

use crate::{
    elements::{
        CompoundAction, CompoundCondition, ImportBase, SetAttribute, SimpleAction,
        SimpleCondition,
    },
    error::ModelError,
    identifier::Id,
    model::{Children, composite, holds},
    value::{Catalog, DefaultActionRole, DefaultConditionRole},
};

/// Collection of connectors shared by the whole document.
#[derive(Debug, Clone)]
pub struct ConnectorBase {
    id: Option<Id>,
    imports: Children,
    connectors: Children,
}

impl Default for ConnectorBase {
    fn default() -> Self {
        Self {
            id: None,
            imports: Children::keyed(),
            connectors: Children::keyed(),
        }
    }
}

impl ConnectorBase {
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

    pub fn connectors(&self) -> &Children {
        &self.connectors
    }
}

composite!(ConnectorBase { imports, connectors });
holds!(ConnectorBase => imports: ImportBase);
holds!(ConnectorBase => connectors: CausalConnector);

impl SetAttribute for ConnectorBase {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A reusable relation: when its condition holds, its action runs.
///
/// Owns its parameters, one condition (simple or compound) and one action
/// (simple or compound). Adding a second condition replaces the first.
#[derive(Debug, Clone)]
pub struct CausalConnector {
    id: Option<Id>,
    params: Children,
    condition: Children,
    action: Children,
}

impl Default for CausalConnector {
    fn default() -> Self {
        Self {
            id: None,
            params: Children::keyed(),
            condition: Children::single(),
            action: Children::single(),
        }
    }
}

impl CausalConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn params(&self) -> &Children {
        &self.params
    }

    pub fn condition(&self) -> &Children {
        &self.condition
    }

    pub fn action(&self) -> &Children {
        &self.action
    }
}

composite!(CausalConnector {
    params,
    condition,
    action
});
holds!(CausalConnector => params: ConnectorParam);
holds!(CausalConnector => condition: SimpleCondition);
holds!(CausalConnector => condition: CompoundCondition);
holds!(CausalConnector => action: SimpleAction);
holds!(CausalConnector => action: CompoundAction);

impl SetAttribute for CausalConnector {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A parameter declared by a connector, referenced as `$name` by its
/// conditions and actions and given a value by links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorParam {
    name: Option<Id>,
    param_type: Option<String>,
}

impl ConnectorParam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }

    pub fn set_name(&mut self, name: impl Into<Option<Id>>) {
        self.name = name.into();
    }

    pub fn param_type(&self) -> Option<&str> {
        self.param_type.as_deref()
    }

    pub fn set_param_type(&mut self, param_type: Option<&str>) {
        self.param_type = param_type.map(str::to_string);
    }
}

impl SetAttribute for ConnectorParam {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "name" => self.name = Some(Id::parse(value)?),
            "type" => self.param_type = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// The name under which a condition or action takes part in a connector.
///
/// Binds refer to roles by name. Some names carry a predefined meaning
/// (`onBegin`, `start`, ...), which decides what other attributes the
/// condition or action must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role {
    name: Id,
}

impl Role {
    pub fn new(name: Id) -> Self {
        Self { name }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// The predefined condition role with this name, if any.
    pub fn condition_role(&self) -> Option<DefaultConditionRole> {
        self.name.with_str(DefaultConditionRole::lookup)
    }

    /// The predefined action role with this name, if any.
    pub fn action_role(&self) -> Option<DefaultActionRole> {
        self.name.with_str(DefaultActionRole::lookup)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_categories() {
        let on_selection: Role = "onSelection".parse().unwrap();
        assert_eq!(
            on_selection.condition_role(),
            Some(DefaultConditionRole::OnSelection)
        );
        assert_eq!(on_selection.action_role(), None);

        let set: Role = "set".parse().unwrap();
        assert_eq!(set.action_role(), Some(DefaultActionRole::Set));

        let custom: Role = "onKeyPressed".parse().unwrap();
        assert_eq!(custom.condition_role(), None);
        assert_eq!(custom.to_string(), "onKeyPressed");
    }

    #[test]
    fn test_role_rejects_invalid_identifier() {
        assert_eq!(
            "on begin".parse::<Role>(),
            Err(ModelError::InvalidIdentifier("on begin".to_string()))
        );
    }
}
