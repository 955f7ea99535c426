//! Function Extensions in JSONPath
//!
//! Function Extensions in JSONPath serve as a way to extend the capability of queries in a way that
//! the standard query syntax can not support. JSONPath defines a small, closed set of functions,
//! all of which conform to a specified type system.
//!
//! # The JSONPath Type System
//!
//! The type system used in JSONPath function extensions is comprised of three types: [`NodesType`],
//! [`ValueType`], and [`LogicalType`].
//!
//! # Registered Functions
//!
//! The IETF JSONPath Specification defines five functions for use in JSONPath query filter
//! expressions. This is a closed set: there is no mechanism for registering additional functions.
//!
//! ## `length`
//!
//! The `length` function extension provides a way to compute the length of a value and make that
//! available for further processing in the filter expression.
//!
//! ### Parameters
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | string, object, or array, possibly taken from a singular query |
//!
//! ### Result
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | unsigned integer, or nothing |
//!
//! ### Example
//!
//! ```text
//! $[?length(@.authors) >= 5]
//! ```
//!
//! ## `count`
//!
//! The `count` function extension provides a way to obtain the number of nodes in a nodelist and
//! make that available for further processing in the filter expression.
//!
//! ### Parameters
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NodesType`] | the nodelist whose members are being counted |
//!
//! ### Result
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | an unsigned integer |
//!
//! ### Example
//!
//! ```text
//! $[?count(@.*.author) >= 5]
//! ```
//!
//! ## `match`
//!
//! The `match` function extension provides a way to check whether **the entirety** of a given
//! string matches a given regular expression.
//!
//! ### Parameters
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | a string |
//! | [`ValueType`] | a string representing a valid regular expression |
//!
//! ### Result
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LogicalType`] | true for a match, false otherwise |
//!
//! ### Example
//!
//! ```text
//! $[?match(@.date, "1974-05-..")]
//! ```
//!
//! ## `search`
//!
//! The `search` function extension provides a way to check whether a given string contains a
//! substring that matches a given regular expression.
//!
//! ### Parameters
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | a string |
//! | [`ValueType`] | a string representing a valid regular expression |
//!
//! ### Result
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LogicalType`] | true for a match, false otherwise |
//!
//! ### Example
//!
//! ```text
//! $[?search(@.author, "[BR]ob")]
//! ```
//!
//! ## `value`
//!
//! The `value` function extension provides a way to convert an instance of `NodesType` to a value
//! and make that available for further processing in the filter expression.
//!
//! ### Parameters
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NodesType`] | a nodelist to convert to a value |
//!
//! ### Result
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueType`] | if the input nodelist contains a single node, the result is the value of that node, otherwise it is nothing |
//!
//! ### Example
//!
//! ```text
//! $[?value(@..color) == "red"]
//! ```
use std::marker::PhantomData;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{node::NodeList, spec::query::Queryable};

use super::{
    query::Query,
    selector::filter::{Literal, LogicalOrExpr, SingularQuery, TestFilter},
};

/// JSONPath type representing a Nodelist
///
/// This is a thin wrapper around a [`NodeList`], and generally represents the result of a JSONPath
/// query. It may also be produced by a function.
#[derive(Debug)]
pub struct NodesType<'a>(NodeList<'a>);

impl<'a> NodesType<'a> {
    #[doc(hidden)]
    pub const fn type_kind() -> JsonPathTypeKind {
        JsonPathTypeKind::Nodelist
    }

    /// Extract the inner [`NodeList`]
    pub fn into_inner(self) -> NodeList<'a> {
        self.0
    }
}

impl<'a> From<NodeList<'a>> for NodesType<'a> {
    fn from(value: NodeList<'a>) -> Self {
        Self(value)
    }
}

impl<'a> TryFrom<JsonPathType<'a>> for NodesType<'a> {
    type Error = ConversionError;

    fn try_from(value: JsonPathType<'a>) -> Result<Self, Self::Error> {
        match value {
            JsonPathType::Nodes(nl) => Ok(nl.into()),
            JsonPathType::Value(_) => Err(ConversionError::LiteralToNodes),
            JsonPathType::Logical(_) => Err(ConversionError::IncompatibleTypes {
                from: JsonPathTypeKind::Logical,
                to: JsonPathTypeKind::Nodelist,
            }),
            JsonPathType::Node(n) => Ok(Self(vec![n].into())),
            JsonPathType::Nothing => Ok(Self(vec![].into())),
        }
    }
}

/// JSONPath type representing `LogicalTrue` or `LogicalFalse`
#[derive(Debug, Default)]
pub enum LogicalType {
    /// True
    True,
    /// False
    #[default]
    False,
}

impl LogicalType {
    #[doc(hidden)]
    pub const fn type_kind() -> JsonPathTypeKind {
        JsonPathTypeKind::Logical
    }
}

impl<'a> TryFrom<JsonPathType<'a>> for LogicalType {
    type Error = ConversionError;

    fn try_from(value: JsonPathType<'a>) -> Result<Self, Self::Error> {
        match value {
            JsonPathType::Nodes(nl) => {
                if nl.is_empty() {
                    Ok(Self::False)
                } else {
                    Ok(Self::True)
                }
            }
            JsonPathType::Value(_) => Err(ConversionError::IncompatibleTypes {
                from: JsonPathTypeKind::Value,
                to: JsonPathTypeKind::Logical,
            }),
            JsonPathType::Logical(l) => Ok(l),
            JsonPathType::Node(_) => Ok(Self::True),
            JsonPathType::Nothing => Ok(Self::False),
        }
    }
}

impl From<LogicalType> for bool {
    fn from(value: LogicalType) -> Self {
        match value {
            LogicalType::True => true,
            LogicalType::False => false,
        }
    }
}

impl From<bool> for LogicalType {
    fn from(value: bool) -> Self {
        match value {
            true => Self::True,
            false => Self::False,
        }
    }
}

/// JSONPath type representing a JSON value or Nothing
#[derive(Debug)]
pub enum ValueType<'a> {
    /// This may come from a literal value declared in a JSONPath query, or be produced by a
    /// function.
    Value(Value),
    /// This would be a reference to a location in the JSON object being queried, i.e., the result
    /// of a singular query, or produced by a function.
    Node(&'a Value),
    /// This would be the result of a singular query that does not result in any nodes, or be
    /// produced by a function.
    Nothing,
}

impl<'a> ValueType<'a> {
    #[doc(hidden)]
    pub const fn type_kind() -> JsonPathTypeKind {
        JsonPathTypeKind::Value
    }

    /// Convert to a reference of a [`serde_json::Value`] if possible
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ValueType::Value(v) => Some(v),
            ValueType::Node(v) => Some(v),
            ValueType::Nothing => None,
        }
    }

    /// Check if this `ValueType` is nothing
    pub fn is_nothing(&self) -> bool {
        matches!(self, ValueType::Nothing)
    }
}

impl<'a> TryFrom<JsonPathType<'a>> for ValueType<'a> {
    type Error = ConversionError;

    fn try_from(value: JsonPathType<'a>) -> Result<Self, Self::Error> {
        match value {
            JsonPathType::Value(v) => Ok(Self::Value(v)),
            JsonPathType::Node(n) => Ok(Self::Node(n)),
            JsonPathType::Nothing => Ok(Self::Nothing),
            JsonPathType::Nodes(_) => Err(ConversionError::IncompatibleTypes {
                from: JsonPathTypeKind::Nodelist,
                to: JsonPathTypeKind::Value,
            }),
            JsonPathType::Logical(_) => Err(ConversionError::IncompatibleTypes {
                from: JsonPathTypeKind::Nodelist,
                to: JsonPathTypeKind::Value,
            }),
        }
    }
}

impl<'a, T> From<T> for ValueType<'a>
where
    T: Into<Value>,
{
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}

#[doc(hidden)]
#[derive(Debug)]
pub enum JsonPathType<'a> {
    Nodes(NodeList<'a>),
    Logical(LogicalType),
    Node(&'a Value),
    Value(Value),
    Nothing,
}

impl<'a> JsonPathType<'a> {
    pub fn as_kind(&self) -> JsonPathTypeKind {
        match self {
            JsonPathType::Nodes(_) => JsonPathTypeKind::Nodelist,
            JsonPathType::Value(_) => JsonPathTypeKind::Value,
            JsonPathType::Logical(_) => JsonPathTypeKind::Logical,
            JsonPathType::Node(_) => JsonPathTypeKind::Node,
            JsonPathType::Nothing => JsonPathTypeKind::Nothing,
        }
    }
}

impl<'a> From<NodesType<'a>> for JsonPathType<'a> {
    fn from(value: NodesType<'a>) -> Self {
        Self::Nodes(value.0)
    }
}

impl<'a> From<ValueType<'a>> for JsonPathType<'a> {
    fn from(value: ValueType<'a>) -> Self {
        match value {
            ValueType::Value(v) => Self::Value(v),
            ValueType::Node(n) => Self::Node(n),
            ValueType::Nothing => Self::Nothing,
        }
    }
}

impl<'a> From<LogicalType> for JsonPathType<'a> {
    fn from(value: LogicalType) -> Self {
        Self::Logical(value)
    }
}

#[doc(hidden)]
/// Error used to convey JSONPath queries that are not well-typed
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Cannot convert `from` into `to`
    #[error("attempted to convert {from} to {to}")]
    IncompatibleTypes {
        /// The type being converted from
        from: JsonPathTypeKind,
        /// The type being converted to
        to: JsonPathTypeKind,
    },
    /// Literal values can not be considered nodes
    #[error("cannot use a literal value in place of NodesType")]
    LiteralToNodes,
}

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonPathTypeKind {
    Nodelist,
    Node,
    Value,
    Logical,
    Nothing,
}

impl JsonPathTypeKind {
    pub fn converts_to(&self, other: Self) -> bool {
        matches!(
            (self, other),
            (
                JsonPathTypeKind::Nodelist,
                JsonPathTypeKind::Nodelist | JsonPathTypeKind::Logical
            ) | (
                JsonPathTypeKind::Node,
                JsonPathTypeKind::Nodelist | JsonPathTypeKind::Node | JsonPathTypeKind::Value
            ) | (
                JsonPathTypeKind::Value,
                JsonPathTypeKind::Node | JsonPathTypeKind::Value
            ) | (JsonPathTypeKind::Logical, JsonPathTypeKind::Logical)
        )
    }
}

impl std::fmt::Display for JsonPathTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonPathTypeKind::Nodelist => write!(f, "NodesType"),
            JsonPathTypeKind::Logical => write!(f, "LogicalType"),
            JsonPathTypeKind::Node => write!(f, "ValueType"),
            JsonPathTypeKind::Value => write!(f, "ValueType"),
            JsonPathTypeKind::Nothing => write!(f, "ValueType"),
        }
    }
}

/// The closed set of function extensions defined by the JSONPath specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    /// `length`
    Length,
    /// `count`
    Count,
    /// `match`
    Match,
    /// `search`
    Search,
    /// `value`
    Value,
}

impl FunctionName {
    fn as_str(&self) -> &'static str {
        match self {
            FunctionName::Length => "length",
            FunctionName::Count => "count",
            FunctionName::Match => "match",
            FunctionName::Search => "search",
            FunctionName::Value => "value",
        }
    }

    fn from_str(name: &str) -> Option<Self> {
        match name {
            "length" => Some(Self::Length),
            "count" => Some(Self::Count),
            "match" => Some(Self::Match),
            "search" => Some(Self::Search),
            "value" => Some(Self::Value),
            _ => None,
        }
    }

    fn param_types(&self) -> &'static [JsonPathTypeKind] {
        match self {
            FunctionName::Length => &[JsonPathTypeKind::Value],
            FunctionName::Count => &[JsonPathTypeKind::Nodelist],
            FunctionName::Match | FunctionName::Search => {
                &[JsonPathTypeKind::Value, JsonPathTypeKind::Value]
            }
            FunctionName::Value => &[JsonPathTypeKind::Nodelist],
        }
    }

    fn return_type(&self) -> JsonPathTypeKind {
        match self {
            FunctionName::Length | FunctionName::Count | FunctionName::Value => {
                JsonPathTypeKind::Value
            }
            FunctionName::Match | FunctionName::Search => JsonPathTypeKind::Logical,
        }
    }
}

impl std::fmt::Display for FunctionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Marker for a [`FunctionExpr`] whose arity and argument types have not yet been checked
/// against the closed function registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unvalidated;

/// Marker for a [`FunctionExpr`] that has been checked against the closed function registry and
/// is known to be well-typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validated;

/// A function expression used within a filter selector
///
/// `FunctionExpr<Unvalidated>` is what the parser produces as it reads a function call out of
/// query text; [`FunctionExpr::validate`] turns it into a `FunctionExpr<Validated>`, which is the
/// only form that [`evaluate`][FunctionExpr::evaluate] accepts. This mirrors the "is well typed"
/// requirement from the JSONPath function extension rules: a query that calls an undefined
/// function, or passes arguments of the wrong type, is a parse error, not a run time one.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionExpr<State = Unvalidated> {
    /// The name of the function being called
    pub name: FunctionName,
    /// The arguments the function is being called with
    pub args: Vec<FunctionExprArg>,
    return_type: JsonPathTypeKind,
    _state: PhantomData<State>,
}

impl<State> FunctionExpr<State> {
    /// The [`JsonPathTypeKind`] this function call evaluates to
    pub fn return_type(&self) -> JsonPathTypeKind {
        self.return_type
    }
}

impl FunctionExpr<Unvalidated> {
    /// Check that `name` refers to a function in the closed registry, and that `args` is
    /// well-typed for that function's parameter list.
    pub fn validate(
        name: String,
        args: Vec<FunctionExprArg>,
    ) -> Result<FunctionExpr<Validated>, FunctionValidationError> {
        let Some(function) = FunctionName::from_str(&name) else {
            return Err(FunctionValidationError::Undefined { name });
        };
        let params = function.param_types();
        if args.len() != params.len() {
            return Err(FunctionValidationError::NumberOfArgsMismatch {
                expected: params.len(),
                received: args.len(),
            });
        }
        for (position, (arg, expected)) in args.iter().zip(params.iter()).enumerate() {
            let received = arg.as_type_kind()?;
            if !received.converts_to(*expected) {
                return Err(FunctionValidationError::MismatchTypeKind {
                    expected: *expected,
                    received,
                    position,
                });
            }
        }
        Ok(FunctionExpr {
            name: function,
            args,
            return_type: function.return_type(),
            _state: PhantomData,
        })
    }
}

impl FunctionExpr<Validated> {
    #[cfg_attr(
        feature = "trace",
        tracing::instrument(name = "Evaluate Function Expr", level = "trace", parent = None, ret)
    )]
    pub fn evaluate<'a, 'b: 'a>(&'a self, current: &'b Value, root: &'b Value) -> JsonPathType<'a> {
        let mut args = self.args.iter().map(|a| a.evaluate(current, root));
        match self.name {
            FunctionName::Length => length(args.next().expect("length takes one argument")),
            FunctionName::Count => count(args.next().expect("count takes one argument")),
            FunctionName::Match => match_fn(
                args.next().expect("match takes two arguments"),
                args.next().expect("match takes two arguments"),
                Anchoring::Full,
            ),
            FunctionName::Search => match_fn(
                args.next().expect("search takes two arguments"),
                args.next().expect("search takes two arguments"),
                Anchoring::Partial,
            ),
            FunctionName::Value => value_fn(args.next().expect("value takes one argument")),
        }
    }
}

impl<State> std::fmt::Display for FunctionExpr<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{name}(", name = self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            write!(
                f,
                "{arg}{comma}",
                comma = if i == self.args.len() - 1 { "" } else { "," }
            )?;
        }
        write!(f, ")")
    }
}

fn length(arg: JsonPathType<'_>) -> JsonPathType<'_> {
    let value = match ValueType::try_from(arg) {
        Ok(v) => v,
        Err(_) => return JsonPathType::Nothing,
    };
    match value.as_value() {
        Some(Value::String(s)) => JsonPathType::Value(s.chars().count().into()),
        Some(Value::Array(a)) => JsonPathType::Value(a.len().into()),
        Some(Value::Object(o)) => JsonPathType::Value(o.len().into()),
        _ => JsonPathType::Nothing,
    }
}

fn count(arg: JsonPathType<'_>) -> JsonPathType<'_> {
    let nodes = NodesType::try_from(arg).unwrap_or_else(|_| NodesType::from(NodeList::from(vec![])));
    JsonPathType::Value(nodes.into_inner().len().into())
}

fn value_fn(arg: JsonPathType<'_>) -> JsonPathType<'_> {
    let nodes = match NodesType::try_from(arg) {
        Ok(n) => n.into_inner(),
        Err(_) => return JsonPathType::Nothing,
    };
    match nodes.at_most_one() {
        Ok(Some(v)) => JsonPathType::Node(v),
        _ => JsonPathType::Nothing,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchoring {
    Full,
    Partial,
}

fn match_fn<'a>(subject: JsonPathType<'a>, pattern: JsonPathType<'a>, anchoring: Anchoring) -> JsonPathType<'a> {
    let Some(subject) = ValueType::try_from(subject)
        .ok()
        .and_then(|v| v.as_value().and_then(Value::as_str).map(str::to_owned))
    else {
        return JsonPathType::Logical(LogicalType::False);
    };
    let Some(pattern) = ValueType::try_from(pattern)
        .ok()
        .and_then(|v| v.as_value().and_then(Value::as_str).map(str::to_owned))
    else {
        return JsonPathType::Logical(LogicalType::False);
    };
    let matched = compile_iregexp(&pattern)
        .map(|re| match anchoring {
            Anchoring::Full => re.is_match(&subject) && {
                // `Regex` has no native "fullmatch"; confirm the match spans the entire subject.
                re.find(&subject)
                    .is_some_and(|m| m.start() == 0 && m.end() == subject.len())
            },
            Anchoring::Partial => re.is_match(&subject),
        })
        .unwrap_or(false);
    JsonPathType::Logical(matched.into())
}

/// Compile `pattern` as an [I-Regexp][rfc9485] pattern, degrading to `None` rather than raising
/// on anything that is not a valid, expressible pattern. Callers are expected to treat `None` as
/// "no match" per the JSONPath `match`/`search` function definitions.
///
/// [rfc9485]: https://www.rfc-editor.org/rfc/rfc9485.html
fn compile_iregexp(pattern: &str) -> Option<Regex> {
    if !is_iregexp_profile(pattern) {
        return None;
    }
    Regex::new(pattern).ok()
}

/// Reject constructs that I-Regexp excludes from the full ECMA-262/Rust `regex` grammar:
/// backreferences, lookaround assertions, and word boundary assertions are all absent from the
/// I-Regexp profile, even though the underlying `regex` crate would otherwise accept (or, for
/// lookaround, reject for unrelated reasons) them.
fn is_iregexp_profile(pattern: &str) -> bool {
    static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\\[bB1-9]|\(\?[=!<]").expect("disallowed-construct pattern is valid")
    });
    !DISALLOWED.is_match(pattern)
}

#[doc(hidden)]
#[derive(Debug, PartialEq, Clone)]
pub enum FunctionExprArg {
    Literal(Literal),
    SingularQuery(SingularQuery),
    FilterQuery(Query),
    LogicalExpr(LogicalOrExpr),
    FunctionExpr(FunctionExpr<Validated>),
}

impl std::fmt::Display for FunctionExprArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionExprArg::Literal(lit) => write!(f, "{lit}"),
            FunctionExprArg::FilterQuery(query) => write!(f, "{query}"),
            FunctionExprArg::SingularQuery(sq) => write!(f, "{sq}"),
            FunctionExprArg::LogicalExpr(log) => write!(f, "{log}"),
            FunctionExprArg::FunctionExpr(func) => write!(f, "{func}"),
        }
    }
}

impl FunctionExprArg {
    #[cfg_attr(
        feature = "trace",
        tracing::instrument(name = "Evaluate Function Arg", level = "trace", parent = None, ret)
    )]
    fn evaluate<'a, 'b: 'a>(&'a self, current: &'b Value, root: &'b Value) -> JsonPathType<'a> {
        match self {
            FunctionExprArg::Literal(lit) => lit.into(),
            FunctionExprArg::SingularQuery(q) => match q.eval_query(current, root) {
                Some(n) => JsonPathType::Node(n),
                None => JsonPathType::Nothing,
            },
            FunctionExprArg::FilterQuery(q) => JsonPathType::Nodes(q.query(current, root).into()),
            FunctionExprArg::LogicalExpr(l) => match l.test_filter(current, root) {
                true => JsonPathType::Logical(LogicalType::True),
                false => JsonPathType::Logical(LogicalType::False),
            },
            FunctionExprArg::FunctionExpr(f) => f.evaluate(current, root),
        }
    }

    #[cfg_attr(
        feature = "trace",
        tracing::instrument(name = "Function Arg As Type Kind", level = "trace", parent = None, ret)
    )]
    pub fn as_type_kind(&self) -> Result<JsonPathTypeKind, FunctionValidationError> {
        match self {
            FunctionExprArg::Literal(_) => Ok(JsonPathTypeKind::Value),
            FunctionExprArg::SingularQuery(_) => Ok(JsonPathTypeKind::Node),
            FunctionExprArg::FilterQuery(query) => {
                if query.is_singular() {
                    Ok(JsonPathTypeKind::Node)
                } else {
                    Ok(JsonPathTypeKind::Nodelist)
                }
            }
            FunctionExprArg::LogicalExpr(_) => Ok(JsonPathTypeKind::Logical),
            FunctionExprArg::FunctionExpr(func) => Ok(func.return_type()),
        }
    }
}

#[doc(hidden)]
/// An error occurred while validating a function
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FunctionValidationError {
    /// Function not defined in the closed function registry
    #[error("function name '{name}' is not defined")]
    Undefined {
        /// The name of the function
        name: String,
    },
    /// Mismatch in number of function arguments
    #[error("expected {expected} args, but received {received}")]
    NumberOfArgsMismatch {
        /// Expected number of arguments
        expected: usize,
        /// Received number of arguments
        received: usize,
    },
    /// The type of received argument does not match the function definition
    #[error("in argument position {position}, expected a type that converts to {expected}, received {received}")]
    MismatchTypeKind {
        /// Expected type
        expected: JsonPathTypeKind,
        /// Received type
        received: JsonPathTypeKind,
        /// Argument position
        position: usize,
    },
    /// A standalone function call used as a filter condition did not return `LogicalType`
    #[error("function with incorrect return type used")]
    IncorrectFunctionReturnType,
}

impl TestFilter for FunctionExpr<Validated> {
    #[cfg_attr(
        feature = "trace",
        tracing::instrument(name = "Test Function Expr", level = "trace", parent = None, ret)
    )]
    fn test_filter<'b>(&self, current: &'b Value, root: &'b Value) -> bool {
        match self.evaluate(current, root) {
            JsonPathType::Nodes(nl) => !nl.is_empty(),
            JsonPathType::Value(v) => v.test_filter(current, root),
            JsonPathType::Logical(l) => l.into(),
            JsonPathType::Node(n) => n.test_filter(current, root),
            JsonPathType::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_string_counts_chars_not_bytes() {
        let v = Value::String("héllo".to_owned());
        let result = length(JsonPathType::Value(v));
        assert!(matches!(result, JsonPathType::Value(n) if n.as_u64() == Some(5)));
    }

    #[test]
    fn length_of_non_lengthable_is_nothing() {
        let v = Value::Bool(true);
        assert!(matches!(length(JsonPathType::Value(v)), JsonPathType::Nothing));
    }

    #[test]
    fn invalid_iregexp_degrades_to_false_rather_than_panicking() {
        let subject = JsonPathType::Value(Value::String("abc".to_owned()));
        let pattern = JsonPathType::Value(Value::String(r"(abc".to_owned()));
        let result = match_fn(subject, pattern, Anchoring::Full);
        assert!(matches!(result, JsonPathType::Logical(LogicalType::False)));
    }

    #[test]
    fn backreference_pattern_is_rejected_by_the_iregexp_profile() {
        assert!(compile_iregexp(r"(a)\1").is_none());
    }

    #[test]
    fn match_requires_full_string_match() {
        let subject = JsonPathType::Value(Value::String("xabcx".to_owned()));
        let pattern = JsonPathType::Value(Value::String("abc".to_owned()));
        assert!(matches!(
            match_fn(subject, pattern, Anchoring::Full),
            JsonPathType::Logical(LogicalType::False)
        ));
    }

    #[test]
    fn search_allows_partial_match() {
        let subject = JsonPathType::Value(Value::String("xabcx".to_owned()));
        let pattern = JsonPathType::Value(Value::String("abc".to_owned()));
        assert!(matches!(
            match_fn(subject, pattern, Anchoring::Partial),
            JsonPathType::Logical(LogicalType::True)
        ));
    }
}
