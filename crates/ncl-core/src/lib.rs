//! NCL Core Types and Definitions
//!
//! This crate provides the authoring-time object model of the Nested Context
//! Language (NCL). It includes:
//!
//! - **Identifiers**: Validated, string-interned identifiers ([`identifier::Id`])
//! - **Values**: Enumerated attribute vocabularies, times and cardinalities
//!   ([`value`] module)
//! - **Model**: The arena-backed element tree ([`model::Document`])
//! - **Elements**: Every element kind of the language ([`elements`] module)
//! - **Construction**: Pluggable element factories ([`factory`]) and the
//!   event-driven [`builder::DocumentBuilder`]
//!
//! Once a tree is built, [`Document::resolve`] links reference attributes to
//! their targets, [`Document::validate`] checks structural rules and
//! [`Document::to_ncl_string`] renders the tree back to markup.

pub mod builder;
pub mod config;
pub mod elements;
pub mod error;
pub mod factory;
pub mod identifier;
pub mod model;
pub mod value;

mod resolve;
mod serialize;
mod validate;

pub use error::ModelError;
pub use model::{Document, Handle, NodeId};
