//! Attribute value types.
//!
//! Closed vocabularies ([`catalog`]), durations ([`Time`]) and occurrence
//! bounds ([`Cardinality`]) used by element attributes. Every type parses
//! from and displays as its markup token.

pub mod catalog;
mod cardinality;
mod time;

pub use cardinality::Cardinality;
pub use catalog::{
    ActionOperator, ActionType, Catalog, Color, Comparator, DefaultActionRole,
    DefaultConditionRole, EventTransition, EventType, Key, LogicalOperator,
    PresentationAttribute, TransitionDirection, TransitionSubtype, TransitionType,
};
pub use time::Time;
