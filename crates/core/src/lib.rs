//! `sexyboom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model and the field validation predicates
//! shared by every record constructor.

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ClientId, ProductId, SalesNoteId};
pub use validation::{is_valid_national_id, is_valid_price, is_valid_stock};
pub use value_object::ValueObject;
