//! The bundle of a reported failure and everything derived from it.

use crate::classify::classify;
use crate::code::ClassificationCode;
use catch_common::ContextMap;
use catch_source::{Location, SourceLine, StackFrame};
use serde::{Deserialize, Serialize};

/// A reported failure with its location, classification, context, stack, and source window.
///
/// The code and suggestion are derived from the message when the record is
/// created. Fields are read-only once built; the `with_*` methods consume the
/// record and are meant to be chained at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FailureRecord {
    message: String,
    location: Location,
    function: Option<String>,
    code: ClassificationCode,
    suggestion: String,
    context: ContextMap,
    stack: Vec<StackFrame>,
    source: Vec<SourceLine>,
}

impl FailureRecord {
    /// Creates a record for `message` reported at `location`, classifying the message.
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        let message = message.into();
        let classification = classify(&message);
        Self {
            message,
            location,
            function: None,
            code: classification.code,
            suggestion: classification.suggestion.to_string(),
            context: ContextMap::new(),
            stack: Vec::new(),
            source: Vec::new(),
        }
    }

    /// Sets the name of the function the failure was reported from.
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Sets the context annotations.
    pub fn with_context(mut self, context: ContextMap) -> Self {
        self.context = context;
        self
    }

    /// Sets the captured stack.
    pub fn with_stack(mut self, stack: Vec<StackFrame>) -> Self {
        self.stack = stack;
        self
    }

    /// Sets the source window.
    pub fn with_source(mut self, source: Vec<SourceLine>) -> Self {
        self.source = source;
        self
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the failure was reported.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The reporting function, if it could be determined.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// The classification code.
    pub fn code(&self) -> ClassificationCode {
        self.code
    }

    /// The remediation hint paired with the code.
    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    /// Context annotations, sorted by key.
    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    /// Captured stack frames, innermost first.
    pub fn stack(&self) -> &[StackFrame] {
        &self.stack
    }

    /// Source lines around the reported line.
    pub fn source(&self) -> &[SourceLine] {
        &self.source
    }
}
