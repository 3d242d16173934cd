use std::fmt;

/// Byte range within the input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A span covering the whole of `input`.
    pub fn whole(input: &str) -> Self {
        Self::new(0, input.len())
    }
}

/// All errors produced by timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimetableError {
    /// A single `HH:MM` token could not be normalized.
    Time {
        message: String,
        span: Span,
        input: String,
    },

    /// A combined `HH:MM - HH:MM` token could not be split or normalized.
    Range {
        message: String,
        span: Span,
        input: String,
    },

    /// A raw record is missing a required field or has the wrong shape.
    Record { message: String },

    /// The settings store could not be read or written.
    Store { message: String },
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time { message, .. } => write!(f, "{message}"),
            Self::Range { message, .. } => write!(f, "{message}"),
            Self::Record { message } => write!(f, "{message}"),
            Self::Store { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for TimetableError {}

impl TimetableError {
    pub fn time(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Time {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn range(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn record(message: impl Into<String>) -> Self {
        Self::Record {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Re-anchor a time error found inside a larger range token.
    ///
    /// `offset` is where the time token starts within `range_input`.
    pub(crate) fn within_range(self, offset: usize, range_input: &str) -> Self {
        match self {
            Self::Time { message, span, .. } => Self::range(
                message,
                Span::new(span.start + offset, span.end + offset),
                range_input,
            ),
            other => other,
        }
    }

    /// Format a rich error with an underline beneath the offending part.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Time {
                message,
                span,
                input,
            }
            | Self::Range {
                message,
                span,
                input,
            } => format_span_error("error", message, span, input),
            Self::Record { message } => format!("error: {message}"),
            Self::Store { message } => format!("error: {message}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    let padding = " ".repeat(span.start + 2);
    let underline = "^".repeat(span.end.saturating_sub(span.start).max(1));
    out.push_str(&padding);
    out.push_str(&underline);
    out
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
