use nom::error::{ErrorKind, FromExternalError, ParseError};
use nom::{IResult, Parser};

/// Prevent a `cut` parser from poisoning an alt branch
pub(crate) fn uncut<I, O, E: ParseError<I>, F: Parser<I, O, E>>(
    mut parser: F,
) -> impl FnMut(I) -> IResult<I, O, E> {
    move |input: I| match parser.parse(input) {
        Err(nom::Err::Failure(e)) => Err(nom::Err::Error(e)),
        rest => rest,
    }
}

/// Like `cut`, but replaces the inner error with one built from `f`, so that callers can report a
/// more specific message than the wrapped parser's own error
pub(crate) fn cut_with<I, O, E, Ext, F>(
    mut parser: F,
    f: impl Fn(E) -> Ext,
) -> impl FnMut(I) -> IResult<I, O, E>
where
    I: Clone,
    E: ParseError<I> + FromExternalError<I, Ext>,
    F: Parser<I, O, E>,
{
    move |input: I| match parser.parse(input.clone()) {
        Ok(result) => Ok(result),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(
            E::from_external_error(input, ErrorKind::Verify, f(e)),
        )),
        Err(nom::Err::Incomplete(n)) => Err(nom::Err::Incomplete(n)),
    }
}
