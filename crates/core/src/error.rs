use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised at the edges of rendering.
///
/// Tag resolution itself never fails; these cover parsing source documents
/// and serializing element trees for a host.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source document could not be parsed.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A tag or attribute name cannot be emitted by the host.
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName {
        /// What was being named ("tag" or "attribute").
        kind: &'static str,
        /// The offending name.
        name: String,
    },
    /// Component expansion nested deeper than the configured limit.
    #[error("Component nesting exceeded maximum depth of {max_depth} (at {component})")]
    DepthExceeded {
        /// Configured limit.
        max_depth: usize,
        /// Component being expanded when the limit was hit.
        component: String,
    },
}

impl RenderError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Attaches a document path to parse errors that do not have one yet.
    ///
    /// Other errors are returned unchanged.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Parse {
                message,
                mut location,
            } => {
                if location.file.is_none() {
                    location.file = Some(file.into());
                }
                Self::Parse { message, location }
            }
            other => other,
        }
    }

    /// Create an invalid tag name error
    pub fn invalid_tag(name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind: "tag",
            name: name.into(),
        }
    }

    /// Create an invalid attribute name error
    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind: "attribute",
            name: name.into(),
        }
    }
}
