//! NCL - Authoring-time object model for the Nested Context Language.
//!
//! Loading, validation and canonical rendering of NCL documents. The
//! element tree itself lives in [`ncl_core`]; this crate ties it to the
//! markup reader and to application configuration.

pub mod config;

mod error;

pub use ncl_core::{Document, Handle, NodeId, builder, elements, factory, identifier, model, value};

pub use error::NclError;

use log::{debug, info, trace};

use ncl_core::{builder::DocumentBuilder, error::Diagnostics};

use config::AppConfig;

/// Loads and renders NCL documents.
///
/// # Examples
///
/// ```
/// use ncl::{DocumentLoader, config::AppConfig};
///
/// let source = r#"
///     <ncl id="hello">
///         <body>
///             <media id="video" src="video.mp4"/>
///         </body>
///     </ncl>
/// "#;
///
/// let loader = DocumentLoader::new(AppConfig::default());
/// let document = loader.load(source).expect("Failed to load");
///
/// let text = loader.render(&document);
/// assert!(text.contains("<media id='video' src='video.mp4'/>"));
/// ```
#[derive(Default)]
pub struct DocumentLoader {
    config: AppConfig,
}

impl DocumentLoader {
    /// Create a new document loader with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Model and validation settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this loader.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read source text into a resolved document.
    ///
    /// Unless validation on load is disabled, the document is validated
    /// afterwards and its diagnostics are available on every element.
    ///
    /// # Errors
    ///
    /// Returns [`NclError::Parse`] for malformed markup and
    /// [`NclError::Invalid`] when the document has errors, or warnings with
    /// `deny_warnings` set. Unless validation on load is disabled,
    /// construction problems and unresolved references count as well.
    pub fn load(&self, source: &str) -> Result<Document, NclError> {
        info!("Loading document");

        let builder = DocumentBuilder::with_config(self.config.model().clone());
        let mut document = ncl_parser::parse_with(source, builder)?;
        let root = document.root();

        let validation = self.config.validation();
        if !validation.on_load() {
            debug!("Validation on load disabled");
            return Ok(document);
        }

        // Validation replaces node diagnostics and reports unresolved
        // references itself; construction problems are kept.
        let mut diagnostics = document.diagnostics(root).cloned().unwrap_or_default();
        diagnostics.retain(|d| !d.code().is_some_and(|code| code.is_resolution()));
        let valid = document.validate();
        if let Some(validated) = document.diagnostics(root) {
            diagnostics.merge(validated);
        }
        trace!(valid; "Document validated");

        if reject(&diagnostics, validation.deny_warnings()) {
            info!(
                errors = diagnostics.errors().len(),
                warnings = diagnostics.warnings().len();
                "Document rejected"
            );
            return Err(NclError::Invalid { diagnostics });
        }

        debug!(nodes = document.node_count(); "Document loaded");
        Ok(document)
    }

    /// Render a document as canonical NCL text, with an XML declaration.
    pub fn render(&self, document: &Document) -> String {
        info!(nodes = document.node_count(); "Rendering document");
        document.to_ncl_string()
    }
}

fn reject(diagnostics: &Diagnostics, deny_warnings: bool) -> bool {
    diagnostics.has_errors() || (deny_warnings && !diagnostics.warnings().is_empty())
}
