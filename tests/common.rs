#![allow(dead_code)]
//! Shared helpers for `gallery-query` integration tests.

use gallery_query::*;
use jiff::tz::TimeZone;

/// Default vocabulary, pinned to UTC so date values are stable.
pub fn parser() -> SearchQueryParser {
    SearchQueryParser::default().with_time_zone(TimeZone::UTC)
}

pub fn parse_ok(input: &str) -> SearchQuery {
    parser().parse(input).unwrap()
}

pub fn as_and(query: &SearchQuery) -> &Vec<SearchQuery> {
    match query {
        SearchQuery::And(group) => &group.list,
        other => panic!("expected And, got: {other:?}"),
    }
}

pub fn as_or(query: &SearchQuery) -> &Vec<SearchQuery> {
    match query {
        SearchQuery::Or(group) => &group.list,
        other => panic!("expected Or, got: {other:?}"),
    }
}

pub fn as_unknown(query: &SearchQuery) -> &Vec<SearchQuery> {
    match query {
        SearchQuery::UnknownRelation(group) => &group.list,
        other => panic!("expected UnknownRelation, got: {other:?}"),
    }
}

pub fn as_some_of(query: &SearchQuery) -> &SomeOfQuery {
    match query {
        SearchQuery::SomeOf(some_of) => some_of,
        other => panic!("expected SomeOf, got: {other:?}"),
    }
}

pub fn as_text(query: &SearchQuery) -> &TextSearch {
    match query {
        SearchQuery::Text(search) => search,
        other => panic!("expected Text, got: {other:?}"),
    }
}

/// Free text with `like` matching.
pub fn word_is(query: &SearchQuery, expected: &str) {
    text_is(query, TextField::AnyText, expected, TextMatchType::Like);
}

pub fn text_is(query: &SearchQuery, field: TextField, expected: &str, match_type: TextMatchType) {
    let search = as_text(query);
    assert_eq!(search.field, field, "field of {query:?}");
    assert_eq!(search.text, expected, "text of {query:?}");
    assert_eq!(search.match_type, match_type, "match type of {query:?}");
}

/// `parse(stringify(parse(s))) == parse(s)` for `parser`.
pub fn assert_round_trip(parser: &SearchQueryParser, input: &str) {
    let first = parser.parse(input).unwrap();
    let text = parser.stringify(&first);
    let second = parser
        .parse(&text)
        .unwrap_or_else(|e| panic!("{input:?} rendered as {text:?} which failed: {e}"));
    assert_eq!(first, second, "{input:?} rendered as {text:?}");
}
