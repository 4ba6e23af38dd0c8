//! Scoped failure reporting: drop guards and panic recovery.

use crate::catcher::Catcher;
use catch_infer::ExplicitContext;
use catch_source::Location;
use std::any::Any;
use std::fmt::Display;
use thiserror::Error;

/// Reports a failure when it goes out of scope.
///
/// A guard is created at the top of a scope and handed the failure with
/// [`set`](Self::set) on the paths that fail. When the guard is dropped a
/// pending failure is reported against the location the guard was created
/// at. If the scope is left by a panic, a panic note is reported instead.
///
/// ```no_run
/// fn sync() {
///     let mut guard = catch::Guard::new();
///     if let Err(err) = std::fs::copy("a.db", "b.db") {
///         guard.set(&err);
///         return;
///     }
/// }
/// ```
#[derive(Debug)]
#[must_use = "a guard reports when dropped; binding it to `_` drops it immediately"]
pub struct Guard {
    catcher: Catcher,
    location: Location,
    failure: Option<String>,
}

impl Guard {
    /// Creates a guard using the process-wide configuration.
    #[track_caller]
    pub fn new() -> Self {
        Self::with_catcher(Catcher::global(), Location::caller())
    }

    pub(crate) fn with_catcher(catcher: Catcher, location: Location) -> Self {
        Self {
            catcher,
            location,
            failure: None,
        }
    }

    /// Records `err` to be reported on drop, replacing any earlier failure.
    pub fn set<E: Display + ?Sized>(&mut self, err: &E) {
        self.failure = Some(err.to_string());
    }

    /// Discards the pending failure.
    pub fn clear(&mut self) {
        self.failure = None;
    }

    /// Returns `true` if a failure is pending.
    pub fn is_set(&self) -> bool {
        self.failure.is_some()
    }
}

impl Default for Guard {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        let message = if std::thread::panicking() {
            match self.failure.take() {
                Some(failure) => format!("panic: unwinding with pending failure: {failure}"),
                None => "panic: unwinding through guarded scope".to_string(),
            }
        } else {
            match self.failure.take() {
                Some(failure) => failure,
                None => return,
            }
        };
        self.catcher
            .report_at(message, self.location.clone(), ExplicitContext::default());
    }
}

/// A panic caught by [`recover`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panic: {message}")]
pub struct Recovered {
    message: String,
    location: Location,
}

impl Recovered {
    pub(crate) fn from_payload(payload: &(dyn Any + Send), location: Location) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message, location }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where [`recover`] was called.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Runs `f`, turning a panic into a reported [`Recovered`] failure.
///
/// Uses the process-wide configuration; see [`Catcher::recover`].
#[track_caller]
pub fn recover<T>(f: impl FnOnce() -> T) -> Result<T, Recovered> {
    Catcher::global().recover(f)
}
