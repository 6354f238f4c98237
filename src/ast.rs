use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured search query handed to the query engine.
///
/// Boolean groups keep their children in a flat `Vec` so consumers can iterate
/// without rebalancing. The serialized form is internally tagged with `type`,
/// which is the shape the engine reads:
///
/// ```
/// use gallery_query::{SearchQuery, TextField};
///
/// let query = SearchQuery::text(TextField::Caption, "sunset");
/// let json = serde_json::to_string(&query).unwrap();
/// assert_eq!(json, r#"{"type":"TEXT","field":"caption","text":"sunset","matchType":"like"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchQuery {
    /// Every member must match.
    And(ListQuery),
    /// Any member may match.
    Or(ListQuery),
    /// Juxtaposed terms whose relation was left open because implicit OR was
    /// disabled. Only SOME_OF bodies produce these in practice.
    UnknownRelation(ListQuery),
    /// At least `min` members must match.
    SomeOf(SomeOfQuery),
    Text(TextSearch),
    FromDate(DateSearch),
    ToDate(DateSearch),
    MinRating(RangeSearch),
    MaxRating(RangeSearch),
    MinResolution(RangeSearch),
    MaxResolution(RangeSearch),
    Orientation(OrientationSearch),
    Distance(DistanceSearch),
}

/// Discriminants of the wire form, in declaration order.
pub const QUERY_TYPES: &[&str] = &[
    "AND",
    "OR",
    "UNKNOWN_RELATION",
    "SOME_OF",
    "TEXT",
    "FROM_DATE",
    "TO_DATE",
    "MIN_RATING",
    "MAX_RATING",
    "MIN_RESOLUTION",
    "MAX_RESOLUTION",
    "ORIENTATION",
    "DISTANCE",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub list: Vec<SearchQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SomeOfQuery {
    pub list: Vec<SearchQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
}

/// Free text or a keyword-qualified text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearch {
    pub field: TextField,
    pub text: String,
    #[serde(default)]
    pub match_type: TextMatchType,
}

/// Which attribute a [`TextSearch`] targets. `AnyText` is the unprefixed
/// free-text search; every other field has a keyword in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    AnyText,
    Caption,
    Keyword,
    Person,
    Position,
    FileName,
    Directory,
}

impl TextField {
    /// Fields that carry a `keyword:` prefix, in the order the parser tries them.
    pub const PREFIXED: [TextField; 6] = [
        TextField::Caption,
        TextField::Keyword,
        TextField::Person,
        TextField::Position,
        TextField::FileName,
        TextField::Directory,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatchType {
    /// Substring match.
    #[default]
    Like,
    ExactMatch,
}

/// Inclusive date bound in milliseconds since the Unix epoch. `None` marks a
/// literal that could not be read as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSearch {
    pub value: Option<i64>,
}

/// Numeric bound. `None` is the not-a-number sentinel for unreadable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSearch {
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationSearch {
    pub landscape: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSearch {
    /// Radius in kilometres.
    pub distance: Option<i64>,
    pub from: Place,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub text: String,
}

impl SearchQuery {
    pub fn and(list: Vec<SearchQuery>) -> Self {
        SearchQuery::And(ListQuery { list })
    }

    pub fn or(list: Vec<SearchQuery>) -> Self {
        SearchQuery::Or(ListQuery { list })
    }

    pub fn unknown_relation(list: Vec<SearchQuery>) -> Self {
        SearchQuery::UnknownRelation(ListQuery { list })
    }

    pub fn some_of(list: Vec<SearchQuery>, min: Option<i64>) -> Self {
        SearchQuery::SomeOf(SomeOfQuery { list, min })
    }

    /// `like` text search on `field`.
    pub fn text(field: TextField, text: impl Into<String>) -> Self {
        SearchQuery::Text(TextSearch {
            field,
            text: text.into(),
            match_type: TextMatchType::Like,
        })
    }

    pub fn exact_text(field: TextField, text: impl Into<String>) -> Self {
        SearchQuery::Text(TextSearch {
            field,
            text: text.into(),
            match_type: TextMatchType::ExactMatch,
        })
    }

    pub fn any_text(text: impl Into<String>) -> Self {
        SearchQuery::text(TextField::AnyText, text)
    }

    /// Wire discriminant of this node.
    pub fn type_name(&self) -> &'static str {
        let index = match self {
            SearchQuery::And(_) => 0,
            SearchQuery::Or(_) => 1,
            SearchQuery::UnknownRelation(_) => 2,
            SearchQuery::SomeOf(_) => 3,
            SearchQuery::Text(_) => 4,
            SearchQuery::FromDate(_) => 5,
            SearchQuery::ToDate(_) => 6,
            SearchQuery::MinRating(_) => 7,
            SearchQuery::MaxRating(_) => 8,
            SearchQuery::MinResolution(_) => 9,
            SearchQuery::MaxResolution(_) => 10,
            SearchQuery::Orientation(_) => 11,
            SearchQuery::Distance(_) => 12,
        };
        QUERY_TYPES[index]
    }

    /// Children of list-shaped nodes (AND, OR, UNKNOWN_RELATION, SOME_OF).
    pub fn list(&self) -> Option<&[SearchQuery]> {
        match self {
            SearchQuery::And(group) | SearchQuery::Or(group) | SearchQuery::UnknownRelation(group) => {
                Some(&group.list)
            }
            SearchQuery::SomeOf(some_of) => Some(&some_of.list),
            _ => None,
        }
    }

    /// Reads a query from its JSON wire form.
    ///
    /// Discriminants are checked before decoding so foreign data is reported
    /// as [`QueryError::UnknownQueryType`] rather than a generic serde error.
    ///
    /// ```
    /// use gallery_query::{QueryError, SearchQuery};
    ///
    /// let query = SearchQuery::from_json(r#"{"type":"TEXT","field":"person","text":"Ann"}"#).unwrap();
    /// assert_eq!(query, SearchQuery::text(gallery_query::TextField::Person, "Ann"));
    ///
    /// let err = SearchQuery::from_json(r#"{"type":"SIMILAR_TO","text":"x"}"#).unwrap_err();
    /// assert!(matches!(err, QueryError::UnknownQueryType(tag) if tag == "SIMILAR_TO"));
    /// ```
    pub fn from_json(input: &str) -> Result<SearchQuery, QueryError> {
        let value: Value = serde_json::from_str(input)?;
        check_query_types(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

fn check_query_types(value: &Value) -> Result<(), QueryError> {
    let Some(object) = value.as_object() else {
        return Ok(());
    };
    if let Some(Value::String(tag)) = object.get("type") {
        if !QUERY_TYPES.contains(&tag.as_str()) {
            return Err(QueryError::UnknownQueryType(tag.clone()));
        }
    }
    if let Some(Value::Array(list)) = object.get("list") {
        for child in list {
            check_query_types(child)?;
        }
    }
    Ok(())
}
