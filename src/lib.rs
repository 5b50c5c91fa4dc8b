//! Contact book service.
//!
//! Submitted contacts pass the [`validation`] rules, then the
//! [`ContactManager`](domain::ContactManager) enforces unique `email` and
//! `phone` values and writes through a [`ContactStore`](storage::ContactStore)
//! backend. [`api`] exposes the operations over HTTP/JSON.

pub mod api;
pub mod cli;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod storage;
pub mod validation;
