use crate::{
    elements::{SetAttribute, non_empty},
    error::ModelError,
};

/// A `name`/`content` pair describing the enclosing composition.
///
/// ```text
/// <meta name='title' content='News'/>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    name: Option<String>,
    content: Option<String>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a blank name.
    pub fn set_name(&mut self, name: Option<&str>) -> Result<(), ModelError> {
        self.name = name.map(|name| non_empty("name", name)).transpose()?;
        Ok(())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for blank content.
    pub fn set_content(&mut self, content: Option<&str>) -> Result<(), ModelError> {
        self.content = content
            .map(|content| non_empty("content", content))
            .transpose()?;
        Ok(())
    }
}

impl SetAttribute for Meta {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "name" => self.set_name(Some(value))?,
            "content" => self.set_content(Some(value))?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// One element of an RDF tree, kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdfElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<RdfElement>,
}

impl RdfElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in source order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn children(&self) -> &[RdfElement] {
        &self.children
    }

    pub fn push_child(&mut self, child: RdfElement) {
        self.children.push(child);
    }
}

/// An RDF description of the enclosing composition.
///
/// The tree is opaque to the model: it is neither resolved nor validated,
/// only kept and written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    tree: Vec<RdfElement>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level elements of the RDF tree, usually a single `rdf:RDF`.
    pub fn tree(&self) -> &[RdfElement] {
        &self.tree
    }

    pub fn push(&mut self, element: RdfElement) {
        self.tree.push(element);
    }
}

impl SetAttribute for Metadata {
    fn set_attribute(&mut self, _name: &str, _value: &str) -> Result<bool, ModelError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_rejects_blank_values() {
        let mut meta = Meta::new();
        assert!(meta.set_attribute("name", "title").unwrap());
        assert!(meta.set_content(Some("  ")).is_err());
        assert_eq!(meta.name(), Some("title"));
        assert_eq!(meta.content(), None);
        assert!(!meta.set_attribute("lang", "en").unwrap());
    }

    #[test]
    fn test_rdf_tree_keeps_source_order() {
        let mut description = RdfElement::new("rdf:Description")
            .with_attribute("rdf:about", "news")
            .with_attribute("xml:lang", "en");
        description.push_child(RdfElement::new("dc:creator"));
        description.push_child(RdfElement::new("dc:date"));
        let mut metadata = Metadata::new();
        metadata.push(description);

        let root = &metadata.tree()[0];
        assert_eq!(root.attributes()[0].0, "rdf:about");
        let tags: Vec<&str> = root.children().iter().map(RdfElement::tag).collect();
        assert_eq!(tags, ["dc:creator", "dc:date"]);
    }
}
