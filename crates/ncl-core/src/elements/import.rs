use crate::{
    elements::{SetAttribute, non_empty},
    error::ModelError,
    identifier::Id,
};

/// Imports the base of the same kind from another document.
///
/// ```text
/// <importBase documentURI='shared.ncl' alias='shared'/>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBase {
    document_uri: Option<String>,
    alias: Option<Id>,
}

impl ImportBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_uri(&self) -> Option<&str> {
        self.document_uri.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a blank URI.
    pub fn set_document_uri(&mut self, uri: Option<&str>) -> Result<(), ModelError> {
        self.document_uri = uri.map(|uri| non_empty("documentURI", uri)).transpose()?;
        Ok(())
    }

    /// The name the imported elements are known by in this document.
    pub fn alias(&self) -> Option<Id> {
        self.alias
    }

    pub fn set_alias(&mut self, alias: impl Into<Option<Id>>) {
        self.alias = alias.into();
    }
}

impl SetAttribute for ImportBase {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "documentURI" => self.set_document_uri(Some(value))?,
            "alias" => self.alias = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_base_attributes() {
        let mut import = ImportBase::new();
        assert!(import.set_attribute("documentURI", "shared.ncl").unwrap());
        assert!(import.set_attribute("alias", "shared").unwrap());
        assert!(!import.set_attribute("region", "r1").unwrap());

        assert_eq!(import.document_uri(), Some("shared.ncl"));
        assert_eq!(import.alias(), Some(Id::parse("shared").unwrap()));
        assert!(import.set_attribute("alias", "1shared").is_err());
        assert!(import.set_document_uri(Some("")).is_err());
    }
}
