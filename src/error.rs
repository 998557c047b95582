/// Category of a request-scoped failure.
///
/// The first three kinds are validation failures and are raised before any
/// numerical work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A coefficient, degree or time-bound token is missing or not a number.
    Parse,
    /// Coefficient count does not equal declared degree + 1.
    DegreeMismatch,
    /// Numerator degree is not strictly less than denominator degree.
    ImproperTransferFunction,
    /// Response computation hit a singular solve or non-finite values.
    Analysis,
    /// The plot artifact could not be written.
    Render,
    /// Export or other file I/O failed.
    Io,
    /// Startup configuration (output directory, environment) is unusable.
    Config,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Parse | ErrorKind::DegreeMismatch | ErrorKind::ImproperTransferFunction => 2,
            ErrorKind::Analysis => 3,
            ErrorKind::Render | ErrorKind::Io => 4,
            ErrorKind::Config => 5,
        }
    }

    /// Validation failures are expected user input mistakes.
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            ErrorKind::Parse | ErrorKind::DegreeMismatch | ErrorKind::ImproperTransferFunction
        )
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn degree_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DegreeMismatch, message)
    }

    pub fn improper(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ImproperTransferFunction, message)
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Analysis, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
