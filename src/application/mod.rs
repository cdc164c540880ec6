//! Application layer: turns raw request records into validated authorization
//! requests through the domain models.
//!
//! `RequestAssembler` is the entry point. It owns the reference month used for
//! expiry checks, so callers control time explicitly.

pub mod assembler;
pub mod request;
