use crate::{
    ast::{
        DateSearch, DistanceSearch, OrientationSearch, Place, RangeSearch, SearchQuery, TextField,
        TextMatchType, TextSearch,
    },
    date::{DateOrder, parse_date},
    error::{KeywordError, ParseError},
    keywords::{QueryKeywords, Vocabulary},
    scanner::{
        find_top_level_separator, max_bracket_depth, normalize, parse_int_prefix,
        strip_numeric_prefix, strip_outer_brackets, unwrap_pair,
    },
};
use jiff::tz::TimeZone;
use tracing::{debug, trace};

/// Longest accepted input, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;
/// Deepest accepted nesting of bracket groups and SOME_OF bodies. Flat chains
/// of terms do not nest, however long.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Builds a list node from the two halves of a split.
type Join = fn(Vec<SearchQuery>) -> SearchQuery;

/// Converts between query text and [`SearchQuery`] trees for one vocabulary.
///
/// The parser is immutable once built and can be shared between threads.
/// Every call works on its own copy of the input.
///
/// ```
/// use gallery_query::{QueryKeywords, SearchQuery, SearchQueryParser};
///
/// let parser = SearchQueryParser::new(QueryKeywords::default()).unwrap();
/// let query = parser.parse("cat and dog").unwrap();
/// assert_eq!(
///     query,
///     SearchQuery::and(vec![SearchQuery::any_text("cat"), SearchQuery::any_text("dog")])
/// );
/// assert_eq!(parser.stringify(&query), "(cat and dog)");
/// ```
#[derive(Debug, Clone)]
pub struct SearchQueryParser {
    pub(crate) vocabulary: Vocabulary,
    pub(crate) date_order: DateOrder,
    pub(crate) time_zone: TimeZone,
    implicit_or: bool,
    max_input_len: usize,
    max_depth: usize,
}

impl Default for SearchQueryParser {
    fn default() -> Self {
        Self::from_vocabulary(Vocabulary::new(QueryKeywords::default()))
    }
}

impl SearchQueryParser {
    pub fn new(keywords: QueryKeywords) -> Result<Self, KeywordError> {
        keywords.validate()?;
        Ok(Self::from_vocabulary(Vocabulary::new(keywords)))
    }

    fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            date_order: DateOrder::default(),
            time_zone: TimeZone::system(),
            implicit_or: true,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Relation assumed between juxtaposed terms: OR when `true` (the
    /// default), [`SearchQuery::UnknownRelation`] otherwise.
    pub fn with_implicit_or(mut self, implicit_or: bool) -> Self {
        self.implicit_or = implicit_or;
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Zone used for bare years, civil dates and rendering. Defaults to the
    /// system zone.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn keywords(&self) -> &QueryKeywords {
        &self.vocabulary.keywords
    }

    /// Parses `input` with the configured implicit relation.
    pub fn parse(&self, input: &str) -> Result<SearchQuery, ParseError> {
        self.parse_with(input, self.implicit_or)
    }

    /// Parses `input`, overriding the implicit relation for this call.
    ///
    /// Malformed literals never fail; the only errors are inputs beyond the
    /// configured length or depth limits.
    pub fn parse_with(&self, input: &str, implicit_or: bool) -> Result<SearchQuery, ParseError> {
        if input.len() > self.max_input_len {
            debug!(len = input.len(), limit = self.max_input_len, "query rejected: too long");
            return Err(ParseError {
                message: format!("query is longer than {} bytes", self.max_input_len),
                position: self.max_input_len,
            });
        }
        let (nesting, position) = max_bracket_depth(input);
        if nesting > self.max_depth {
            debug!(nesting, limit = self.max_depth, "query rejected: nested too deep");
            return Err(self.depth_error(position));
        }
        self.parse_node(input, implicit_or, 0, input.len())
    }

    fn depth_error(&self, position: usize) -> ParseError {
        ParseError {
            message: format!("query nests deeper than {} levels", self.max_depth),
            position,
        }
    }

    // A query is a chain of terms split at top-level spaces, nested to the
    // right: `a and b c` is `and(a, or(b, c))`. The chain is walked in a loop
    // and folded at the end, so only bracket groups and SOME_OF bodies recurse
    // and count towards the depth limit. `origin_len` only serves to report an
    // approximate error position; fragments are mostly suffixes of the input.
    fn parse_node(
        &self,
        input: &str,
        implicit_or: bool,
        depth: usize,
        origin_len: usize,
    ) -> Result<SearchQuery, ParseError> {
        if depth > self.max_depth {
            debug!(depth, limit = self.max_depth, "query rejected: too many levels");
            return Err(self.depth_error(origin_len.saturating_sub(input.len())));
        }
        let keywords = &self.vocabulary.keywords;
        let implicit: Join = if implicit_or {
            SearchQuery::or
        } else {
            SearchQuery::unknown_relation
        };

        let mut chain: Vec<(Join, SearchQuery)> = Vec::new();
        let mut rest = normalize(input);
        let last = loop {
            let text = strip_groups(&rest);
            let Some(split) = find_top_level_separator(text, 0) else {
                break self.parse_term(text, depth, origin_len)?;
            };
            let left = &text[..split];
            let after = &text[split + 1..];
            // Without a connector the right half keeps its leading space.
            let (join, right) = if let Some(right) = strip_connector(after, &keywords.and) {
                trace!(left, right, "explicit AND");
                (SearchQuery::and as Join, right)
            } else if let Some(right) = strip_connector(after, &keywords.or) {
                trace!(left, right, "explicit OR");
                (SearchQuery::or as Join, right)
            } else {
                (implicit, &text[split..])
            };
            chain.push((join, self.parse_node(left, implicit_or, depth + 1, origin_len)?));
            rest = normalize(right);
        };

        Ok(chain
            .into_iter()
            .rev()
            .fold(last, |right, (join, left)| join(vec![left, right])))
    }

    // Leaf recognition; the first matching form wins.
    fn parse_term(
        &self,
        token: &str,
        depth: usize,
        origin_len: usize,
    ) -> Result<SearchQuery, ParseError> {
        let vocabulary = &self.vocabulary;
        let keywords = &vocabulary.keywords;

        let some_of = token
            .strip_prefix(vocabulary.some_of.as_str())
            .map(|rest| (None, rest))
            .or_else(|| {
                strip_numeric_prefix(token, &keywords.n_some_of)
                    .map(|(digits, rest)| (Some(digits), rest))
            });
        if let Some((digits, rest)) = some_of {
            let inner = unwrap_pair(rest, '(', ')').unwrap_or(rest);
            // Members of a group are siblings, never an implicit OR.
            let body = self.parse_node(inner, false, depth + 1, origin_len)?;
            let mut list = Vec::new();
            unfold(body, &mut list);
            let min = digits.and_then(parse_int_prefix);
            return Ok(SearchQuery::some_of(list, min));
        }

        if let Some(rest) = token.strip_prefix(vocabulary.from.as_str()) {
            return Ok(SearchQuery::FromDate(self.date_search(rest)));
        }
        if let Some(rest) = token.strip_prefix(vocabulary.to.as_str()) {
            return Ok(SearchQuery::ToDate(self.date_search(rest)));
        }

        let ranges: [(&str, fn(RangeSearch) -> SearchQuery); 4] = [
            (vocabulary.min_rating.as_str(), SearchQuery::MinRating),
            (vocabulary.max_rating.as_str(), SearchQuery::MaxRating),
            (vocabulary.min_resolution.as_str(), SearchQuery::MinResolution),
            (vocabulary.max_resolution.as_str(), SearchQuery::MaxResolution),
        ];
        for (prefix, build) in ranges {
            if let Some(rest) = token.strip_prefix(prefix) {
                return Ok(build(RangeSearch {
                    value: parse_int_prefix(rest),
                }));
            }
        }

        if let Some((digits, rest)) = strip_numeric_prefix(token, &keywords.km_from) {
            let place = unwrap_pair(rest, '(', ')')
                .or_else(|| unwrap_pair(rest, '"', '"'))
                .unwrap_or(rest);
            return Ok(SearchQuery::Distance(DistanceSearch {
                distance: parse_int_prefix(digits),
                from: Place {
                    text: place.to_string(),
                },
            }));
        }

        if let Some(rest) = token.strip_prefix(vocabulary.orientation.as_str()) {
            return Ok(SearchQuery::Orientation(OrientationSearch {
                landscape: rest == keywords.landscape,
            }));
        }

        if let Some((field, rest)) = vocabulary.strip_text_field(token) {
            let (text, match_type) = detect_match_type(rest);
            return Ok(SearchQuery::Text(TextSearch {
                field,
                text: text.to_string(),
                match_type,
            }));
        }

        Ok(SearchQuery::text(TextField::AnyText, token))
    }

    fn date_search(&self, literal: &str) -> DateSearch {
        DateSearch {
            value: parse_date(literal, self.date_order, &self.time_zone),
        }
    }
}

/// Peels every bracket pair that encloses the whole text, so `((a))` and
/// `(a)` both read as `a`.
fn strip_groups(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let inner = strip_outer_brackets(text).trim();
        if inner.len() == text.len() {
            return text;
        }
        text = inner;
    }
}

/// Text after a connector keyword, provided the keyword stands on its own
/// (`and dog`, `and(dog)`, trailing `and`) rather than starting a longer word
/// such as `andrew`.
fn strip_connector<'a>(after: &'a str, connector: &str) -> Option<&'a str> {
    let rest = after.strip_prefix(connector)?;
    match rest.chars().next() {
        None | Some(' ') | Some('(') => Some(rest),
        Some(_) => None,
    }
}

/// `"…"` means an exact match, `(…)` only groups words; quotes and brackets
/// are not part of the text.
fn detect_match_type(text: &str) -> (&str, TextMatchType) {
    if let Some(inner) = unwrap_pair(text, '"', '"') {
        (inner, TextMatchType::ExactMatch)
    } else if let Some(inner) = unwrap_pair(text, '(', ')') {
        (inner, TextMatchType::Like)
    } else {
        (text, TextMatchType::Like)
    }
}

/// Flattens unresolved sibling lists, at any depth, into `out`. Every other
/// node, boolean groups included, is kept whole.
fn unfold(query: SearchQuery, out: &mut Vec<SearchQuery>) {
    match query {
        SearchQuery::UnknownRelation(group) => {
            for child in group.list {
                unfold(child, out);
            }
        }
        other => out.push(other),
    }
}
