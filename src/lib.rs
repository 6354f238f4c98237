//! # Gallery search query language
//!
//! `gallery-query` converts between the keyword search strings users type into
//! a gallery's search box and the typed [`SearchQuery`] tree a query engine
//! executes. [`SearchQueryParser::parse`] reads text; its inverse,
//! [`SearchQueryParser::stringify`], renders canonical text that parses back to
//! the same tree.
//!
//! Token text comes from a caller-supplied [`QueryKeywords`] vocabulary so the
//! language can be localized.
//!
//! ## Example
//! ```
//! use gallery_query::{SearchQuery, SearchQueryParser, TextField, TextMatchType};
//!
//! let parser = SearchQueryParser::default();
//! let query = parser.parse("(cat or dog) and caption:\"sunset beach\"").unwrap();
//! let SearchQuery::And(group) = &query else { panic!() };
//! // the bracketed group stays one operand
//! assert!(matches!(&group.list[0], SearchQuery::Or(_)));
//! let SearchQuery::Text(caption) = &group.list[1] else { panic!() };
//! assert_eq!(caption.field, TextField::Caption);
//! assert_eq!(caption.text, "sunset beach");
//! assert_eq!(caption.match_type, TextMatchType::ExactMatch);
//!
//! let text = parser.stringify(&query);
//! assert_eq!(text, "((cat or dog) and caption:\"sunset beach\")");
//! assert_eq!(parser.parse(&text).unwrap(), query);
//! ```

mod ast;
mod date;
mod error;
mod keywords;
mod parser;
pub mod scanner;
mod stringify;

pub use ast::{
    DateSearch, DistanceSearch, ListQuery, OrientationSearch, Place, QUERY_TYPES, RangeSearch,
    SearchQuery, SomeOfQuery, TextField, TextMatchType, TextSearch,
};
pub use date::DateOrder;
pub use error::{KeywordError, ParseError, QueryError};
pub use keywords::QueryKeywords;
pub use parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN, SearchQueryParser};
pub use stringify::stringify_text;

/// Parses `input` with the default vocabulary and implicit OR.
///
/// ```
/// use gallery_query::{parse_query, SearchQuery};
///
/// let query = parse_query("cat dog").unwrap();
/// assert_eq!(
///     query,
///     SearchQuery::or(vec![SearchQuery::any_text("cat"), SearchQuery::any_text("dog")])
/// );
/// ```
pub fn parse_query(input: &str) -> Result<SearchQuery, ParseError> {
    SearchQueryParser::default().parse(input)
}
