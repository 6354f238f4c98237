use crate::{
    ast::{DateSearch, RangeSearch, SearchQuery, TextMatchType},
    date::stringify_date,
    parser::SearchQueryParser,
};

/// Quotes text for the query language.
///
/// ```
/// use gallery_query::{TextMatchType, stringify_text};
///
/// assert_eq!(stringify_text("sunset", TextMatchType::Like), "sunset");
/// assert_eq!(stringify_text("sunset beach", TextMatchType::Like), "(sunset beach)");
/// assert_eq!(stringify_text("sunset", TextMatchType::ExactMatch), "\"sunset\"");
/// ```
pub fn stringify_text(text: &str, match_type: TextMatchType) -> String {
    match match_type {
        TextMatchType::ExactMatch => format!("\"{text}\""),
        TextMatchType::Like if text.contains(' ') => format!("({text})"),
        TextMatchType::Like => text.to_string(),
    }
}

impl SearchQueryParser {
    /// Renders `query` as canonical query text that parses back to the same
    /// tree. A missing query renders as the empty string.
    ///
    /// ```
    /// use gallery_query::{SearchQuery, SearchQueryParser, TextField};
    ///
    /// let parser = SearchQueryParser::default();
    /// let query = SearchQuery::or(vec![
    ///     SearchQuery::exact_text(TextField::Caption, "sunset beach"),
    ///     SearchQuery::any_text("dog"),
    /// ]);
    /// assert_eq!(parser.stringify(&query), "(caption:\"sunset beach\" or dog)");
    /// assert_eq!(parser.stringify(None::<&SearchQuery>), "");
    /// ```
    pub fn stringify<'q>(&self, query: impl Into<Option<&'q SearchQuery>>) -> String {
        let Some(query) = query.into() else {
            return String::new();
        };
        let keywords = &self.vocabulary.keywords;
        match query {
            SearchQuery::And(_) | SearchQuery::Or(_) | SearchQuery::UnknownRelation(_) => {
                format!("({})", self.join_chain(query))
            }
            SearchQuery::SomeOf(some_of) => {
                let body = self.join(&some_of.list, " ");
                match some_of.min {
                    Some(min) => format!("{min}-{}:({body})", keywords.n_some_of),
                    None => format!("{}:({body})", keywords.some_of),
                }
            }
            SearchQuery::Orientation(orientation) => {
                let value = if orientation.landscape {
                    &keywords.landscape
                } else {
                    &keywords.portrait
                };
                format!("{}:{value}", keywords.orientation)
            }
            SearchQuery::FromDate(date) => self.stringify_date_search(&keywords.from, date),
            SearchQuery::ToDate(date) => self.stringify_date_search(&keywords.to, date),
            SearchQuery::MinRating(range) => stringify_range(&keywords.min_rating, range),
            SearchQuery::MaxRating(range) => stringify_range(&keywords.max_rating, range),
            SearchQuery::MinResolution(range) => stringify_range(&keywords.min_resolution, range),
            SearchQuery::MaxResolution(range) => stringify_range(&keywords.max_resolution, range),
            SearchQuery::Distance(distance) => {
                let radius = distance.distance.map(|d| d.to_string()).unwrap_or_default();
                let place = &distance.from.text;
                if place.contains(' ') {
                    format!("{radius}-{}:({place})", keywords.km_from)
                } else {
                    format!("{radius}-{}:{place}", keywords.km_from)
                }
            }
            SearchQuery::Text(search) => match keywords.text_field(search.field) {
                None => stringify_text(&search.text, search.match_type),
                Some(_) if search.text.is_empty() => String::new(),
                Some(token) => format!("{token}:{}", stringify_text(&search.text, search.match_type)),
            },
        }
    }

    // The parser nests splits to the right, so a two-element list in the last
    // position is written inline: `(a and (b or c))` renders as `(a and b or c)`.
    fn join_chain(&self, query: &SearchQuery) -> String {
        let mut out = String::new();
        let mut link = self.relation(query);
        while let Some((list, separator)) = link {
            if let [left, right] = list {
                if let Some((inner, next)) = self.relation(right) {
                    if inner.len() == 2 {
                        out.push_str(&self.stringify(left));
                        out.push_str(&separator);
                        link = Some((inner, next));
                        continue;
                    }
                }
            }
            out.push_str(&self.join(list, &separator));
            break;
        }
        out
    }

    fn relation<'q>(&self, query: &'q SearchQuery) -> Option<(&'q [SearchQuery], String)> {
        let keywords = &self.vocabulary.keywords;
        match query {
            SearchQuery::And(group) => Some((group.list.as_slice(), format!(" {} ", keywords.and))),
            SearchQuery::Or(group) => Some((group.list.as_slice(), format!(" {} ", keywords.or))),
            SearchQuery::UnknownRelation(group) => Some((group.list.as_slice(), " ".to_string())),
            _ => None,
        }
    }

    fn join(&self, list: &[SearchQuery], separator: &str) -> String {
        list.iter()
            .map(|query| self.stringify(query))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn stringify_date_search(&self, token: &str, date: &DateSearch) -> String {
        let rendered = date
            .value
            .and_then(|millis| stringify_date(millis, self.date_order, &self.time_zone));
        match rendered {
            Some(text) => format!("{token}:{}", stringify_text(&text, TextMatchType::Like)),
            None => String::new(),
        }
    }
}

fn stringify_range(token: &str, range: &RangeSearch) -> String {
    let value = range.value.map(|v| v.to_string()).unwrap_or_default();
    format!("{token}:{value}")
}
