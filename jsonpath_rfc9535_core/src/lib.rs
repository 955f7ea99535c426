//! Core types for a strictly [RFC 9535][rfc] conformant JSONPath engine.
//!
//! This crate has no parser of its own: it defines the AST a parser builds (see [`spec`]), the
//! result types a query produces ([`node`]), and the normalized-path representation of a node's
//! location ([`path`]). A parser crate is expected to turn query text into [`spec::query::Query`]
//! and then call [`spec::query::Queryable::query`] or
//! [`spec::query::Queryable::query_located`] against a [`serde_json::Value`].
//!
//! [rfc]: https://www.rfc-editor.org/rfc/rfc9535.html

#![forbid(unsafe_code)]

pub mod node;
pub mod path;
pub mod spec;
