use crate::{
    elements::{Link, Meta, Metadata, SetAttribute, Switch, non_empty},
    error::ModelError,
    identifier::Id,
    model::{
        Children, CompositionNode, Interface, LayoutDescriptor, Reference, composite, holds,
    },
};

/// Child collections shared by the body and contexts.
#[derive(Debug, Clone)]
struct Composition {
    metas: Children,
    metadata: Children,
    ports: Children,
    properties: Children,
    nodes: Children,
    links: Children,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            metas: Children::keyed(),
            metadata: Children::ordered(),
            ports: Children::ordered(),
            properties: Children::keyed(),
            nodes: Children::keyed(),
            links: Children::keyed(),
        }
    }
}

/// The document body: the outermost composition.
#[derive(Debug, Clone, Default)]
pub struct Body {
    id: Option<Id>,
    composition: Composition,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// Meta entries, ordered by name then content.
    pub fn metas(&self) -> &Children {
        &self.composition.metas
    }

    /// Metadata trees in insertion order.
    pub fn metadata(&self) -> &Children {
        &self.composition.metadata
    }

    pub fn ports(&self) -> &Children {
        &self.composition.ports
    }

    pub fn properties(&self) -> &Children {
        &self.composition.properties
    }

    /// Media, contexts and switches, ordered by id.
    pub fn nodes(&self) -> &Children {
        &self.composition.nodes
    }

    pub fn links(&self) -> &Children {
        &self.composition.links
    }
}

composite!(Body {
    composition.metas,
    composition.metadata,
    composition.ports,
    composition.properties,
    composition.nodes,
    composition.links,
});
holds!(Body => composition.metas: Meta);
holds!(Body => composition.metadata: Metadata);
holds!(Body => composition.ports: Port);
holds!(Body => composition.properties: Property);
holds!(Body => composition.nodes: Media);
holds!(Body => composition.nodes: Context);
holds!(Body => composition.nodes: Switch);
holds!(Body => composition.links: Link);

impl SetAttribute for Body {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A composition nested in the body or in another context.
///
/// `refer` makes the context reuse another context; a context may not
/// refer to itself or to a context nested inside it.
#[derive(Debug, Clone, Default)]
pub struct Context {
    id: Option<Id>,
    refer: Option<Reference<Context>>,
    composition: Composition,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn refer(&self) -> Option<&Reference<Context>> {
        self.refer.as_ref()
    }

    pub fn set_refer(&mut self, refer: impl Into<Option<Reference<Context>>>) {
        self.refer = refer.into();
    }

    pub(crate) fn refer_mut(&mut self) -> Option<&mut Reference<Context>> {
        self.refer.as_mut()
    }

    /// Meta entries, ordered by name then content.
    pub fn metas(&self) -> &Children {
        &self.composition.metas
    }

    /// Metadata trees in insertion order.
    pub fn metadata(&self) -> &Children {
        &self.composition.metadata
    }

    pub fn ports(&self) -> &Children {
        &self.composition.ports
    }

    pub fn properties(&self) -> &Children {
        &self.composition.properties
    }

    pub fn nodes(&self) -> &Children {
        &self.composition.nodes
    }

    pub fn links(&self) -> &Children {
        &self.composition.links
    }
}

composite!(Context {
    composition.metas,
    composition.metadata,
    composition.ports,
    composition.properties,
    composition.nodes,
    composition.links,
});
holds!(Context => composition.metas: Meta);
holds!(Context => composition.metadata: Metadata);
holds!(Context => composition.ports: Port);
holds!(Context => composition.properties: Property);
holds!(Context => composition.nodes: Media);
holds!(Context => composition.nodes: Context);
holds!(Context => composition.nodes: Switch);
holds!(Context => composition.links: Link);

impl SetAttribute for Context {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "refer" => self.refer = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A media object: the leaf content of a presentation.
#[derive(Debug, Clone)]
pub struct Media {
    id: Option<Id>,
    src: Option<String>,
    media_type: Option<String>,
    descriptor: Option<Reference<LayoutDescriptor>>,
    properties: Children,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            id: None,
            src: None,
            media_type: None,
            descriptor: None,
            properties: Children::keyed(),
        }
    }
}

impl Media {
    /// Media type of the settings node whose properties rules test.
    pub const SETTINGS_TYPE: &'static str = "application/x-ginga-settings";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn set_src(&mut self, src: Option<&str>) {
        self.src = src.map(str::to_string);
    }

    /// The MIME type.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn set_media_type(&mut self, media_type: Option<&str>) {
        self.media_type = media_type.map(str::to_string);
    }

    pub fn is_settings(&self) -> bool {
        self.media_type.as_deref() == Some(Self::SETTINGS_TYPE)
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

    pub fn properties(&self) -> &Children {
        &self.properties
    }
}

composite!(Media { properties });
holds!(Media => properties: Property);

impl SetAttribute for Media {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "src" => self.src = Some(non_empty("src", value)?),
            "type" => self.media_type = Some(non_empty("type", value)?),
            "descriptor" => self.descriptor = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A named property of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    name: Option<Id>,
    value: Option<String>,
}

impl Property {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }

    pub fn set_name(&mut self, name: impl Into<Option<Id>>) {
        self.name = name.into();
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.map(str::to_string);
    }
}

impl SetAttribute for Property {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "name" => self.name = Some(Id::parse(value)?),
            "value" => self.value = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// An entry point of a composition, mapping onto one of its nodes.
#[derive(Debug, Clone, Default)]
pub struct Port {
    id: Option<Id>,
    component: Option<Reference<CompositionNode>>,
    interface: Option<Reference<Interface>>,
}

impl Port {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// A node of the composition owning this port.
    pub fn component(&self) -> Option<&Reference<CompositionNode>> {
        self.component.as_ref()
    }

    pub fn set_component(&mut self, component: impl Into<Option<Reference<CompositionNode>>>) {
        self.component = component.into();
    }

    pub(crate) fn component_mut(&mut self) -> Option<&mut Reference<CompositionNode>> {
        self.component.as_mut()
    }

    /// A property or port of the component.
    pub fn interface(&self) -> Option<&Reference<Interface>> {
        self.interface.as_ref()
    }

    pub fn set_interface(&mut self, interface: impl Into<Option<Reference<Interface>>>) {
        self.interface = interface.into();
    }

    pub(crate) fn interface_mut(&mut self) -> Option<&mut Reference<Interface>> {
        self.interface.as_mut()
    }
}

impl SetAttribute for Port {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "component" => self.component = Some(Reference::placeholder(Id::parse(value)?)),
            "interface" => self.interface = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_settings_type() {
        let mut media = Media::new();
        assert!(!media.is_settings());

        media.set_media_type(Some(Media::SETTINGS_TYPE));
        assert!(media.is_settings());
    }

    #[test]
    fn test_context_collections_start_empty() {
        let context = Context::new();

        assert!(context.ports().is_empty());
        assert!(context.nodes().is_empty());
        assert!(context.refer().is_none());
    }

    #[test]
    fn test_port_attributes() {
        let mut port = Port::new();

        assert_eq!(port.set_attribute("component", "video"), Ok(true));
        assert_eq!(port.set_attribute("interface", "segment1"), Ok(true));
        assert!(port.set_attribute("id", "p 1").is_err());

        assert_eq!(port.component().unwrap().id(), "video");
        assert!(port.interface().unwrap().is_placeholder());
        assert!(port.id().is_none());
    }
}
