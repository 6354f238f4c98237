use std::fmt;

/// Returned by [`SearchQueryParser::parse`](crate::SearchQueryParser::parse)
/// when the input exceeds the configured resource limits. Malformed literals
/// never produce an error; they degrade into sentinel values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Why a keyword vocabulary was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    Empty { role: &'static str },
    InvalidCharacter { role: &'static str, token: String },
    Duplicate {
        first: &'static str,
        second: &'static str,
        token: String,
    },
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordError::Empty { role } => write!(f, "keyword `{role}` must not be empty"),
            KeywordError::InvalidCharacter { role, token } => write!(
                f,
                "keyword `{role}` ({token:?}) must not contain ':' or whitespace"
            ),
            KeywordError::Duplicate {
                first,
                second,
                token,
            } => write!(f, "keywords `{first}` and `{second}` share the token {token:?}"),
        }
    }
}

impl std::error::Error for KeywordError {}

/// Failure to read a [`SearchQuery`](crate::SearchQuery) from its wire form.
#[derive(Debug)]
pub enum QueryError {
    /// The `type` discriminant is not one this crate produces. Such a tree
    /// cannot have come from the parser.
    UnknownQueryType(String),
    Malformed(serde_json::Error),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownQueryType(tag) => write!(f, "unknown query type: {tag}"),
            QueryError::Malformed(err) => write!(f, "malformed search query: {err}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::UnknownQueryType(_) => None,
            QueryError::Malformed(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Malformed(err)
    }
}
