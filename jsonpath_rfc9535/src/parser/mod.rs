use std::ops::Deref;

use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::error::{ContextError, ErrorKind, FromExternalError, ParseError, VerboseError, VerboseErrorKind};
use nom::{branch::alt, combinator::map, multi::many0, sequence::preceded, IResult};
use jsonpath_rfc9535_core::spec::query::{Query, QueryKind};
use jsonpath_rfc9535_core::spec::segment::QuerySegment;

use self::segment::parse_segment;

pub mod primitive;
pub mod segment;
pub mod selector;
mod utils;

pub(crate) type PResult<'a, O> = IResult<&'a str, O, Error<&'a str>>;

/// A [`VerboseError`] that also knows how to report the 1-indexed byte position of a query
/// string where parsing failed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Error<I>(VerboseError<I>);

impl<I> Error<I> {
    pub(crate) fn calculate_position(&self, original_input: I) -> usize
    where
        I: Deref<Target = str>,
    {
        match self.0.errors.first() {
            Some((remaining, _)) => original_input.len() - remaining.len() + 1,
            None => 1,
        }
    }
}

impl<I> std::fmt::Display for Error<I>
where
    I: Deref<Target = str>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.errors.first() {
            Some((remaining, kind)) => {
                let preview: String = remaining.chars().take(24).collect();
                match kind {
                    VerboseErrorKind::Context(ctx) => {
                        write!(f, "expected {ctx}, found {preview:?}")
                    }
                    VerboseErrorKind::Char(c) => write!(f, "expected {c:?}, found {preview:?}"),
                    VerboseErrorKind::Nom(k) => {
                        write!(f, "failed to parse ({k:?}) at {preview:?}")
                    }
                }
            }
            None => write!(f, "invalid JSON Path query"),
        }
    }
}

impl<I> ParseError<I> for Error<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self(VerboseError::from_error_kind(input, kind))
    }

    fn append(input: I, kind: ErrorKind, other: Self) -> Self {
        Self(VerboseError::append(input, kind, other.0))
    }

    fn from_char(input: I, c: char) -> Self {
        Self(VerboseError::from_char(input, c))
    }
}

impl<I> ContextError<I> for Error<I> {
    fn add_context(input: I, ctx: &'static str, other: Self) -> Self {
        Self(VerboseError::add_context(input, ctx, other.0))
    }
}

impl<I, E: std::fmt::Display> FromExternalError<I, E> for Error<I> {
    fn from_external_error(input: I, kind: ErrorKind, e: E) -> Self {
        Self(VerboseError::from_external_error(input, kind, e))
    }
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_query_segments(input: &str) -> PResult<Vec<QuerySegment>> {
    many0(parse_segment)(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_root_query(input: &str) -> PResult<Query> {
    map(preceded(char('$'), parse_query_segments), |segments| Query {
        kind: QueryKind::Root,
        segments,
    })(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_current_query(input: &str) -> PResult<Query> {
    map(preceded(char('@'), parse_query_segments), |segments| Query {
        kind: QueryKind::Current,
        segments,
    })(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_query(input: &str) -> PResult<Query> {
    alt((parse_root_query, parse_current_query))(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_query_main(input: &str) -> PResult<Query> {
    all_consuming(parse_root_query)(input)
}

#[cfg(test)]
mod tests {
    use jsonpath_rfc9535_core::spec::{
        query::QueryKind,
        segment::Segment,
        selector::{name::Name, Selector},
    };

    use super::{parse_query, parse_query_main};

    #[test]
    fn root_query() {
        {
            let (_, p) = parse_query("$").unwrap();
            assert!(matches!(p.kind, QueryKind::Root));
        }
        {
            let (_, p) = parse_query("$.name").unwrap();
            assert_eq!(p.segments[0].segment.as_dot_name().unwrap(), "name");
        }
        {
            let (_, p) = parse_query("$.names['first_name']..*").unwrap();
            assert_eq!(p.segments[0].segment.as_dot_name().unwrap(), "names");
            let clh = p.segments[1].segment.as_long_hand().unwrap();
            assert!(matches!(&clh[0], Selector::Name(Name(s)) if s == "first_name"));
            assert!(matches!(p.segments[2].segment, Segment::Wildcard));
        }
    }

    #[test]
    fn current_query() {
        {
            let (_, p) = parse_query("@").unwrap();
            assert!(matches!(p.kind, QueryKind::Current));
        }
    }

    #[test]
    fn no_tail() {
        assert!(parse_query_main("$.a['b']tail").is_err());
    }
}
