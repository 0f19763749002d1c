//! Concrete element types.
//!
//! Every type keeps its attributes private behind getters and setters.
//! Identifier attributes take an [`Id`], which is only obtainable through
//! [`Id::parse`], so identifier syntax is checked before a setter runs.
//! Reference attributes hold a [`Reference`](crate::model::Reference) that
//! the resolver links once the whole document exists.

mod action;
mod composition;
mod condition;
mod connector;
mod descriptor;
mod document;
mod import;
mod link;
mod meta;
mod rule;
mod switch;
mod transition;

use std::str::FromStr;

pub use action::{CompoundAction, SimpleAction};
pub use composition::{Body, Context, Media, Port, Property};
pub use condition::{CompoundCondition, SimpleCondition};
pub use connector::{CausalConnector, ConnectorBase, ConnectorParam, Role};
pub use descriptor::{Descriptor, DescriptorBase, DescriptorParam, DescriptorSwitch};
pub use document::{Head, Ncl};
pub use import::ImportBase;
pub use link::{Bind, Link, Param, ParamKind};
pub use meta::{Meta, Metadata, RdfElement};
pub use rule::{CompositeRule, Rule, RuleBase};
pub use switch::{BindRule, Switch};
pub use transition::{Transition, TransitionBase};

use crate::{
    error::ModelError,
    identifier::Id,
    model::{Parameterized, Reference},
};

/// Applies one markup attribute to an element under construction.
pub(crate) trait SetAttribute {
    /// Returns `Ok(false)` when `name` is not an attribute of the element.
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError>;
}

/// Reads `$name` as a connector parameter reference, anything else with
/// `parse`.
pub(crate) fn parse_parameterized<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, ModelError>,
) -> Result<Parameterized<T>, ModelError> {
    match value.strip_prefix('$') {
        Some(name) => Ok(Parameterized::param(Id::parse(name)?)),
        None => parse(value).map(Parameterized::Value),
    }
}

pub(crate) fn parse_number<T: FromStr>(attribute: &'static str, value: &str) -> Result<T, ModelError> {
    value
        .trim()
        .parse()
        .map_err(|_| ModelError::invalid_argument(attribute, value, "expected a number"))
}

pub(crate) fn parse_bool(attribute: &'static str, value: &str) -> Result<bool, ModelError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ModelError::invalid_argument(
            attribute,
            value,
            "expected `true` or `false`",
        )),
    }
}

/// Assigns the literal form of a parameterizable attribute. Clearing only
/// removes a literal; a parameter reference is left alone.
pub(crate) fn assign_literal<T>(slot: &mut Option<Parameterized<T>>, value: Option<T>) {
    match value {
        Some(value) => *slot = Some(Parameterized::Value(value)),
        None if matches!(slot, Some(Parameterized::Value(_))) => *slot = None,
        None => {}
    }
}

/// Assigns the parameter form of a parameterizable attribute. Clearing only
/// removes a parameter reference; a literal is left alone.
pub(crate) fn assign_param<T>(
    slot: &mut Option<Parameterized<T>>,
    param: Option<Reference<ConnectorParam>>,
) {
    match param {
        Some(param) => *slot = Some(Parameterized::Param(param)),
        None if matches!(slot, Some(Parameterized::Param(_))) => *slot = None,
        None => {}
    }
}

/// Rejects blank free-text values.
pub(crate) fn non_empty(attribute: &'static str, value: &str) -> Result<String, ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid_argument(
            attribute,
            value,
            "must not be empty",
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameterized() {
        let literal = parse_parameterized("5", |v| parse_number::<u32>("repeat", v)).unwrap();
        assert_eq!(literal, Parameterized::Value(5));

        let param = parse_parameterized("$times", |v| parse_number::<u32>("repeat", v)).unwrap();
        assert_eq!(param.as_param().map(|r| r.id()), Id::parse("times").ok());

        assert!(parse_parameterized("$1bad", |v| parse_number::<u32>("repeat", v)).is_err());
    }

    #[test]
    fn test_scalar_helpers() {
        assert_eq!(parse_bool("freeze", "true"), Ok(true));
        assert!(parse_bool("freeze", "yes").is_err());
        assert!(parse_number::<u32>("horRepeat", "-3").is_err());
        assert!(non_empty("value", "  ").is_err());
        assert_eq!(non_empty("value", "pt-BR"), Ok("pt-BR".to_string()));
    }
}
