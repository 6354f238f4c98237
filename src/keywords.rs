use crate::{ast::TextField, error::KeywordError};
use serde::{Deserialize, Serialize};

/// Surface tokens of the query language, keyed by role.
///
/// The vocabulary is supplied by the caller so the language can be localized;
/// neither the parser nor the stringifier contains token text of its own. The
/// serialized keys are the role names (`minRating`, `NSomeOf`, `file_name`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryKeywords {
    pub and: String,
    pub or: String,
    pub from: String,
    pub to: String,
    pub min_rating: String,
    pub max_rating: String,
    pub min_resolution: String,
    pub max_resolution: String,
    pub km_from: String,
    pub orientation: String,
    pub landscape: String,
    pub portrait: String,
    pub some_of: String,
    #[serde(rename = "NSomeOf")]
    pub n_some_of: String,
    pub caption: String,
    pub keyword: String,
    pub person: String,
    pub position: String,
    #[serde(rename = "file_name")]
    pub file_name: String,
    pub directory: String,
}

impl Default for QueryKeywords {
    fn default() -> Self {
        Self {
            and: "and".into(),
            or: "or".into(),
            from: "from".into(),
            to: "to".into(),
            min_rating: "minRating".into(),
            max_rating: "maxRating".into(),
            min_resolution: "minResolution".into(),
            max_resolution: "maxResolution".into(),
            km_from: "kmFrom".into(),
            orientation: "orientation".into(),
            landscape: "landscape".into(),
            portrait: "portrait".into(),
            some_of: "someOf".into(),
            n_some_of: "someOf".into(),
            caption: "caption".into(),
            keyword: "keyword".into(),
            person: "person".into(),
            position: "position".into(),
            file_name: "file-name".into(),
            directory: "directory".into(),
        }
    }
}

impl QueryKeywords {
    /// Token of a keyword-qualified text field. `AnyText` has none.
    pub fn text_field(&self, field: TextField) -> Option<&str> {
        let token = match field {
            TextField::AnyText => return None,
            TextField::Caption => &self.caption,
            TextField::Keyword => &self.keyword,
            TextField::Person => &self.person,
            TextField::Position => &self.position,
            TextField::FileName => &self.file_name,
            TextField::Directory => &self.directory,
        };
        Some(token)
    }

    /// Checks that every token is usable.
    ///
    /// Tokens only need to be distinct where they compete: plain `token:`
    /// prefixes and the connectors share one namespace, the numeric
    /// `N-token:` forms another, and the two orientation values a third.
    ///
    /// ```
    /// use gallery_query::{KeywordError, QueryKeywords};
    ///
    /// assert!(QueryKeywords::default().validate().is_ok());
    ///
    /// let keywords = QueryKeywords { person: "caption".into(), ..QueryKeywords::default() };
    /// assert!(matches!(keywords.validate(), Err(KeywordError::Duplicate { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), KeywordError> {
        let plain = [
            ("and", &self.and),
            ("or", &self.or),
            ("from", &self.from),
            ("to", &self.to),
            ("minRating", &self.min_rating),
            ("maxRating", &self.max_rating),
            ("minResolution", &self.min_resolution),
            ("maxResolution", &self.max_resolution),
            ("orientation", &self.orientation),
            ("someOf", &self.some_of),
            ("caption", &self.caption),
            ("keyword", &self.keyword),
            ("person", &self.person),
            ("position", &self.position),
            ("file_name", &self.file_name),
            ("directory", &self.directory),
        ];
        let numeric = [("NSomeOf", &self.n_some_of), ("kmFrom", &self.km_from)];
        let values = [("landscape", &self.landscape), ("portrait", &self.portrait)];

        for &(role, token) in plain.iter().chain(&numeric).chain(&values) {
            check_token(role, token)?;
        }
        check_distinct(&plain)?;
        check_distinct(&numeric)?;
        check_distinct(&values)
    }
}

fn check_token(role: &'static str, token: &str) -> Result<(), KeywordError> {
    if token.is_empty() {
        return Err(KeywordError::Empty { role });
    }
    if token.chars().any(|c| c == ':' || c.is_whitespace()) {
        return Err(KeywordError::InvalidCharacter {
            role,
            token: token.to_string(),
        });
    }
    Ok(())
}

fn check_distinct(tokens: &[(&'static str, &String)]) -> Result<(), KeywordError> {
    for (i, &(first, token)) in tokens.iter().enumerate() {
        if let Some(&(second, _)) = tokens[i + 1..].iter().find(|(_, other)| *other == token) {
            return Err(KeywordError::Duplicate {
                first,
                second,
                token: token.clone(),
            });
        }
    }
    Ok(())
}

/// Lookup tables built once from a validated [`QueryKeywords`].
///
/// Holds the `token:` prefixes the parser matches against and maps them back
/// to text fields, so neither direction needs string-keyed access at runtime.
#[derive(Debug, Clone)]
pub(crate) struct Vocabulary {
    pub(crate) keywords: QueryKeywords,
    pub(crate) some_of: String,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) min_rating: String,
    pub(crate) max_rating: String,
    pub(crate) min_resolution: String,
    pub(crate) max_resolution: String,
    pub(crate) orientation: String,
    text_fields: Vec<(String, TextField)>,
}

impl Vocabulary {
    pub(crate) fn new(keywords: QueryKeywords) -> Self {
        let prefix = |token: &str| format!("{token}:");
        let text_fields = TextField::PREFIXED
            .iter()
            .filter_map(|&field| keywords.text_field(field).map(|token| (prefix(token), field)))
            .collect();
        Self {
            some_of: prefix(&keywords.some_of),
            from: prefix(&keywords.from),
            to: prefix(&keywords.to),
            min_rating: prefix(&keywords.min_rating),
            max_rating: prefix(&keywords.max_rating),
            min_resolution: prefix(&keywords.min_resolution),
            max_resolution: prefix(&keywords.max_resolution),
            orientation: prefix(&keywords.orientation),
            text_fields,
            keywords,
        }
    }

    /// Splits a `field:rest` token into its text field and the remainder.
    pub(crate) fn strip_text_field<'a>(&self, token: &'a str) -> Option<(TextField, &'a str)> {
        self.text_fields
            .iter()
            .find_map(|(prefix, field)| token.strip_prefix(prefix.as_str()).map(|rest| (*field, rest)))
    }
}
