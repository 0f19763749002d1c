use crate::{
    elements::{CausalConnector, ConnectorParam, Role, SetAttribute, non_empty},
    error::ModelError,
    identifier::Id,
    model::{CompositionNode, Children, Interface, LayoutDescriptor, Reference, composite, holds},
};

/// Instantiates a connector by binding its roles to nodes.
#[derive(Debug, Clone)]
pub struct Link {
    id: Option<Id>,
    xconnector: Option<Reference<CausalConnector>>,
    params: Children,
    binds: Children,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            id: None,
            xconnector: None,
            params: Children::keyed(),
            binds: Children::ordered(),
        }
    }
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// The connector this link instantiates, from the connector base.
    pub fn xconnector(&self) -> Option<&Reference<CausalConnector>> {
        self.xconnector.as_ref()
    }

    pub fn set_xconnector(&mut self, connector: impl Into<Option<Reference<CausalConnector>>>) {
        self.xconnector = connector.into();
    }

    pub(crate) fn xconnector_mut(&mut self) -> Option<&mut Reference<CausalConnector>> {
        self.xconnector.as_mut()
    }

    /// Link parameters, ordered by name.
    pub fn params(&self) -> &Children {
        &self.params
    }

    /// Binds, in document order.
    pub fn binds(&self) -> &Children {
        &self.binds
    }
}

composite!(Link { params, binds });
holds!(Link => params: Param);
holds!(Link => binds: Bind);

impl SetAttribute for Link {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "xconnector" => self.xconnector = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Associates a connector role with a node of the link's composition.
#[derive(Debug, Clone)]
pub struct Bind {
    role: Option<Role>,
    component: Option<Reference<CompositionNode>>,
    interface: Option<Reference<Interface>>,
    descriptor: Option<Reference<LayoutDescriptor>>,
    params: Children,
}

impl Default for Bind {
    fn default() -> Self {
        Self {
            role: None,
            component: None,
            interface: None,
            descriptor: None,
            params: Children::keyed(),
        }
    }
}

impl Bind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn set_role(&mut self, role: impl Into<Option<Role>>) {
        self.role = role.into();
    }

    /// The bound node: the composition holding the link, or one of its
    /// nodes.
    pub fn component(&self) -> Option<&Reference<CompositionNode>> {
        self.component.as_ref()
    }

    pub fn set_component(&mut self, component: impl Into<Option<Reference<CompositionNode>>>) {
        self.component = component.into();
    }

    pub(crate) fn component_mut(&mut self) -> Option<&mut Reference<CompositionNode>> {
        self.component.as_mut()
    }

    pub fn interface(&self) -> Option<&Reference<Interface>> {
        self.interface.as_ref()
    }

    pub fn set_interface(&mut self, interface: impl Into<Option<Reference<Interface>>>) {
        self.interface = interface.into();
    }

    pub(crate) fn interface_mut(&mut self) -> Option<&mut Reference<Interface>> {
        self.interface.as_mut()
    }

    pub fn descriptor(&self) -> Option<&Reference<LayoutDescriptor>> {
        self.descriptor.as_ref()
    }

    pub fn set_descriptor(&mut self, descriptor: impl Into<Option<Reference<LayoutDescriptor>>>) {
        self.descriptor = descriptor.into();
    }

    pub(crate) fn descriptor_mut(&mut self) -> Option<&mut Reference<LayoutDescriptor>> {
        self.descriptor.as_mut()
    }

    pub fn params(&self) -> &Children {
        &self.params
    }
}

composite!(Bind { params });
holds!(Bind => params: Param);

impl SetAttribute for Bind {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "role" => self.role = Some(value.parse()?),
            "component" => self.component = Some(Reference::placeholder(Id::parse(value)?)),
            "interface" => self.interface = Some(Reference::placeholder(Id::parse(value)?)),
            "descriptor" => self.descriptor = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Whether a [`Param`] belongs to a link or to a bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    LinkParam,
    BindParam,
}

impl ParamKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ParamKind::LinkParam => "linkParam",
            ParamKind::BindParam => "bindParam",
        }
    }
}

/// A value for one of the link's connector parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    kind: ParamKind,
    name: Option<Reference<ConnectorParam>>,
    value: Option<String>,
}

impl Param {
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            name: None,
            value: None,
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The connector parameter given a value, matched by name against the
    /// parameters of the link's connector.
    pub fn name(&self) -> Option<&Reference<ConnectorParam>> {
        self.name.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<Option<Reference<ConnectorParam>>>) {
        self.name = name.into();
    }

    pub(crate) fn name_mut(&mut self) -> Option<&mut Reference<ConnectorParam>> {
        self.name.as_mut()
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

impl SetAttribute for Param {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "name" => self.name = Some(Reference::placeholder(Id::parse(value)?)),
            "value" => self.set_value(Some(value))?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_tags() {
        assert_eq!(Param::new(ParamKind::LinkParam).kind().tag(), "linkParam");
        assert_eq!(ParamKind::BindParam.tag(), "bindParam");
    }

    #[test]
    fn test_param_value_must_not_be_blank() {
        let mut param = Param::new(ParamKind::BindParam);

        assert!(param.set_value(Some("")).is_err());
        assert_eq!(param.set_attribute("value", "RED"), Ok(true));
        assert_eq!(param.value(), Some("RED"));
    }

    #[test]
    fn test_bind_attributes() {
        let mut bind = Bind::new();

        assert_eq!(bind.set_attribute("role", "onBegin"), Ok(true));
        assert_eq!(bind.set_attribute("component", "video"), Ok(true));
        assert_eq!(bind.set_attribute("weight", "2"), Ok(false));

        assert_eq!(bind.role().unwrap().to_string(), "onBegin");
        assert!(bind.component().unwrap().is_placeholder());
    }
}
