/*! Parse interface type strings into structured syntax.
 *
 * Interface descriptions spell types as strings such as `uint256`, `bytes32[]` or `tuple[2][]`.
 * Everything downstream needs the base type and the array dimensions separately, and needs the
 * width rules checked once, here, rather than scattered across string comparisons.
 */

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod type_syntax;

pub use type_syntax::{BaseType, TypeSyntax};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct TypeGrammar;

#[derive(Error, Debug)]
pub enum TypeParseError {
    #[error("empty type string")]
    Empty,

    #[error("syntax error: {0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    #[error("integer width `{0}` must be a multiple of 8 between 8 and 256")]
    IntegerWidth(String),

    #[error("fixed bytes length `{0}` must be between 1 and 32")]
    BytesLength(String),

    #[error("array length `{0}` must be a positive integer")]
    ArrayLength(String),
}

pub type ParseResult<T> = Result<T, TypeParseError>;

pub fn parse_type(input: &str) -> ParseResult<TypeSyntax> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TypeParseError::Empty);
    }

    let root = TypeGrammar::parse(Rule::type_string, input)
        .map_err(|e| TypeParseError::Syntax(Box::new(e)))?
        .next()
        .ok_or(TypeParseError::Empty)?;

    let mut base = None;
    let mut dimensions = Vec::new();

    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::tuple_type => base = Some(BaseType::Tuple),
            Rule::uint_type => base = Some(BaseType::Uint(integer_width(pair)?)),
            Rule::int_type => base = Some(BaseType::Int(integer_width(pair)?)),
            Rule::address_type => base = Some(BaseType::Address),
            Rule::bool_type => base = Some(BaseType::Bool),
            Rule::fixed_bytes_type => base = Some(BaseType::FixedBytes(bytes_length(pair)?)),
            Rule::bytes_type => base = Some(BaseType::Bytes),
            Rule::string_type => base = Some(BaseType::String),
            Rule::array_suffix => dimensions.push(array_length(pair)?),
            _ => {}
        }
    }

    let base = base.ok_or(TypeParseError::Empty)?;
    Ok(TypeSyntax { base, dimensions })
}

pub fn check(input: &str) -> bool {
    parse_type(input).is_ok()
}

fn integer_width(pair: pest::iterators::Pair<'_, Rule>) -> ParseResult<u16> {
    let Some(width) = pair.into_inner().next() else {
        return Ok(256);
    };
    let text = width.as_str();
    match text.parse::<u16>() {
        Ok(bits) if bits % 8 == 0 && (8..=256).contains(&bits) => Ok(bits),
        _ => Err(TypeParseError::IntegerWidth(text.to_string())),
    }
}

fn bytes_length(pair: pest::iterators::Pair<'_, Rule>) -> ParseResult<u8> {
    let text = pair
        .into_inner()
        .next()
        .map(|width| width.as_str())
        .unwrap_or_default();
    match text.parse::<u8>() {
        Ok(len) if (1..=32).contains(&len) => Ok(len),
        _ => Err(TypeParseError::BytesLength(text.to_string())),
    }
}

fn array_length(pair: pest::iterators::Pair<'_, Rule>) -> ParseResult<Option<usize>> {
    let Some(len) = pair.into_inner().next() else {
        return Ok(None);
    };
    let text = len.as_str();
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(TypeParseError::ArrayLength(text.to_string())),
    }
}
