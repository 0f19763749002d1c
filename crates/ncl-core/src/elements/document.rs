use crate::{
    elements::{Body, ConnectorBase, DescriptorBase, RuleBase, SetAttribute, TransitionBase},
    error::ModelError,
    identifier::Id,
    model::{Children, composite, holds},
};

/// Root element of a document, owning the head and the body.
#[derive(Debug, Clone)]
pub struct Ncl {
    id: Option<Id>,
    title: Option<String>,
    xmlns: Option<String>,
    head: Children,
    body: Children,
}

impl Default for Ncl {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            xmlns: None,
            head: Children::single(),
            body: Children::single(),
        }
    }
}

impl Ncl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
    }

    /// The namespace declared on the root element.
    pub fn xmlns(&self) -> Option<&str> {
        self.xmlns.as_deref()
    }

    pub fn set_xmlns(&mut self, xmlns: Option<&str>) {
        self.xmlns = xmlns.map(str::to_string);
    }

    pub fn head(&self) -> &Children {
        &self.head
    }

    pub fn body(&self) -> &Children {
        &self.body
    }
}

composite!(Ncl { head, body });
holds!(Ncl => head: Head);
holds!(Ncl => body: Body);

impl SetAttribute for Ncl {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "title" => self.title = Some(value.to_string()),
            "xmlns" => self.xmlns = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Document head: one slot per base.
#[derive(Debug, Clone)]
pub struct Head {
    rule_base: Children,
    transition_base: Children,
    descriptor_base: Children,
    connector_base: Children,
}

impl Default for Head {
    fn default() -> Self {
        Self {
            rule_base: Children::single(),
            transition_base: Children::single(),
            descriptor_base: Children::single(),
            connector_base: Children::single(),
        }
    }
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule_base(&self) -> &Children {
        &self.rule_base
    }

    pub fn transition_base(&self) -> &Children {
        &self.transition_base
    }

    pub fn descriptor_base(&self) -> &Children {
        &self.descriptor_base
    }

    pub fn connector_base(&self) -> &Children {
        &self.connector_base
    }
}

composite!(Head {
    rule_base,
    transition_base,
    descriptor_base,
    connector_base,
});
holds!(Head => rule_base: RuleBase);
holds!(Head => transition_base: TransitionBase);
holds!(Head => descriptor_base: DescriptorBase);
holds!(Head => connector_base: ConnectorBase);

impl SetAttribute for Head {
    fn set_attribute(&mut self, _name: &str, _value: &str) -> Result<bool, ModelError> {
        Ok(false)
    }
}
