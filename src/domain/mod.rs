//! Validated value objects describing one authorization request.

pub mod card;
pub mod language;
pub mod transaction;
pub mod validation;
