use thiserror::Error;

/// Result type alias using the canonical `ExError`
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by fabmig is classified into one of these kinds.
/// Each kind has a stable code used in structured logs (`err.code`) and in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration (fatal)
    MissingConfig,
    InvalidConfig,

    // Credentials (fatal)
    Authentication,

    // Records and snapshots
    InvalidRecord,
    InvalidSnapshot,
    UnexpectedShape,

    // Remote workspace
    NotFound,
    Conflict,
    Transient,
    Rejected,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingConfig => "ERR_MISSING_CONFIG",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Authentication => "ERR_AUTHENTICATION",
            ExErrorKind::InvalidRecord => "ERR_INVALID_RECORD",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::UnexpectedShape => "ERR_UNEXPECTED_SHAPE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::Transient => "ERR_TRANSIENT",
            ExErrorKind::Rejected => "ERR_REJECTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether this kind must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MissingConfig | ExErrorKind::InvalidConfig | ExErrorKind::Authentication
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    category: Option<String>,
    object_name: Option<String>,
    object_id: Option<String>,
    status: Option<u16>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            category: None,
            object_name: None,
            object_id: None,
            status: None,
            message: String::new(),
            source: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn with_object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    /// HTTP status returned by the remote side, if any
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(category) = &self.category {
            write!(f, " (category: {})", category)?;
        }
        if let Some(name) = &self.object_name {
            write!(f, " (object: {})", name)?;
        }
        if let Some(id) = &self.object_id {
            write!(f, " (id: {})", id)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Why a source entry cannot take part in reconciliation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("entry is not a record (found {found})")]
    NotARecord { found: &'static str },

    #[error("record has no `name` field")]
    MissingName,

    #[error("record `name` must be a string (found {found})")]
    NameNotString { found: &'static str },

    #[error("record `name` is empty")]
    EmptyName,
}

impl From<RecordError> for ExError {
    fn from(err: RecordError) -> Self {
        ExError::new(ExErrorKind::InvalidRecord).with_message(err.to_string())
    }
}

/// Closed set of failure kinds a target workspace call can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationErrorKind {
    /// The workspace, collection or object does not exist
    NotFound,
    /// The target refused because of conflicting state (e.g. name taken)
    Conflict,
    /// Transport failure, timeout, throttling or server-side error
    Transient,
    /// Any other refusal; retrying the same request will not help
    Fatal,
}

impl MutationErrorKind {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => MutationErrorKind::NotFound,
            409 => MutationErrorKind::Conflict,
            408 | 429 | 500..=599 => MutationErrorKind::Transient,
            _ => MutationErrorKind::Fatal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MutationErrorKind::NotFound => "not_found",
            MutationErrorKind::Conflict => "conflict",
            MutationErrorKind::Transient => "transient",
            MutationErrorKind::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for MutationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single list/create/update call against a workspace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct MutationError {
    pub kind: MutationErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl MutationError {
    pub fn new(kind: MutationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Error for a non-success response, classified by its status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: MutationErrorKind::from_status(status),
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(MutationErrorKind::Transient, message)
    }
}

impl From<MutationError> for ExError {
    fn from(err: MutationError) -> Self {
        let kind = match err.kind {
            MutationErrorKind::NotFound => ExErrorKind::NotFound,
            MutationErrorKind::Conflict => ExErrorKind::Conflict,
            MutationErrorKind::Transient => ExErrorKind::Transient,
            MutationErrorKind::Fatal => ExErrorKind::Rejected,
        };
        let ex = ExError::new(kind).with_message(err.message);
        match err.status {
            Some(status) => ex.with_status(status),
            None => ex,
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
