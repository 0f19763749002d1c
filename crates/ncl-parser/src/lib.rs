//! # NCL Parser
//!
//! Reads NCL markup and drives a [`DocumentBuilder`] with the start and end
//! element events it contains.
//!
//! ## Usage
//!
//! ```
//! # use ncl_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <ncl id="hello">
//!             <body>
//!                 <media id="video" src="video.mp4"/>
//!             </body>
//!         </ncl>
//!     "#;
//!
//!     let document = parse(source)?;
//!     assert_eq!(document.node_count(), 3);
//!     Ok(())
//! }
//! ```

mod error;
mod reader;

pub use error::ParseError;
pub use reader::{Event, read};

use log::{debug, info};
use ncl_core::{Document, builder::DocumentBuilder, factory::ElementFactory};

/// Parse source text into a resolved document built with the default
/// factory.
///
/// Only malformed markup fails. Unknown elements, unknown attributes and
/// invalid attribute values become diagnostics on the document, available
/// through [`Document::diagnostics`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every markup error found.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_with(source, DocumentBuilder::new())
}

/// Parse source text with a caller-provided builder, for example one using
/// a custom [`ElementFactory`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every markup error found. The builder is
/// consumed either way.
pub fn parse_with<F: ElementFactory>(
    source: &str,
    mut builder: DocumentBuilder<F>,
) -> Result<Document, ParseError> {
    info!(bytes = source.len(); "Parsing document");
    let events = read(source)?;
    debug!(events = events.len(); "Markup read");

    for event in &events {
        match event {
            Event::Start {
                name, attributes, ..
            } => builder.start_element(name, attributes),
            Event::End { .. } => builder.end_element(),
        }
    }
    Ok(builder.finish())
}
