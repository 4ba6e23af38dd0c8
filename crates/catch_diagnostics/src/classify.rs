//! Ordered pattern table mapping failure messages to codes and remediation hints.

use crate::code::ClassificationCode;

/// The outcome of classifying a failure message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Classification {
    /// The stable code for the failure family.
    pub code: ClassificationCode,
    /// A short remediation hint.
    pub suggestion: &'static str,
}

/// One row of the classification table.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    /// Lower-case substrings, any of which selects this rule.
    pub patterns: &'static [&'static str],
    /// The classification produced when the rule matches.
    pub classification: Classification,
}

const fn rule(
    patterns: &'static [&'static str],
    code: ClassificationCode,
    suggestion: &'static str,
) -> Rule {
    Rule {
        patterns,
        classification: Classification { code, suggestion },
    }
}

/// The classification table, checked top to bottom.
///
/// Order is part of the contract: a message matching several rows is
/// classified by the first. In particular `connection refused` is checked
/// before `timeout`, and the file-system rows before everything else.
const RULES: &[Rule] = &[
    // File system
    rule(
        &["no such file"],
        ClassificationCode::MISSING_FILE,
        "verify the file path exists, check for typos, or create the file first",
    ),
    rule(
        &["permission denied"],
        ClassificationCode::PERMISSION_DENIED,
        "run with appropriate permissions, check file ownership, or modify file permissions",
    ),
    rule(
        &["file exists"],
        ClassificationCode::ALREADY_EXISTS,
        "remove or rename the existing file, or open it instead of creating it",
    ),
    rule(
        &["is a directory"],
        ClassificationCode::IS_A_DIRECTORY,
        "pass a file path rather than a directory, or use a directory operation",
    ),
    rule(
        &["not a directory"],
        ClassificationCode::NOT_A_DIRECTORY,
        "check each component of the path refers to a directory",
    ),
    // Network
    rule(
        &["connection refused"],
        ClassificationCode::CONNECTION_REFUSED,
        "ensure the target service is running, check firewall settings, or verify the address and port",
    ),
    rule(
        &["timeout"],
        ClassificationCode::TIMEOUT,
        "increase timeout duration, check network connectivity, or optimize the operation",
    ),
    rule(
        &["host not found"],
        ClassificationCode::HOST_NOT_FOUND,
        "check the host name for typos and verify DNS resolution",
    ),
    rule(
        &["network unreachable"],
        ClassificationCode::NETWORK_UNREACHABLE,
        "check the network connection, routing, or proxy settings",
    ),
    // Data
    rule(
        &["parse"],
        ClassificationCode::PARSE,
        "validate input format, check for encoding issues, or review the data structure",
    ),
    rule(
        &["invalid format"],
        ClassificationCode::INVALID_FORMAT,
        "compare the input against the expected format specification",
    ),
    rule(
        &["decode"],
        ClassificationCode::DECODE,
        "check the input encoding matches what the decoder expects",
    ),
    rule(
        &["encode"],
        ClassificationCode::ENCODE,
        "check the value can be represented in the target encoding",
    ),
    // Logic
    rule(
        &["index out of range", "index out of bounds"],
        ClassificationCode::INDEX_OUT_OF_RANGE,
        "add bounds checking, validate array/slice length, or review loop conditions",
    ),
    rule(
        &["nil pointer", "null pointer"],
        ClassificationCode::NULL_REFERENCE,
        "add nil checks, initialize variables properly, or review pointer assignments",
    ),
    rule(
        &["assertion failed"],
        ClassificationCode::ASSERTION_FAILED,
        "review the asserted condition and the values that led to it",
    ),
];

const FALLBACK: Classification = Classification {
    code: ClassificationCode::GENERIC,
    suggestion: "check the error context, consult documentation, or add debug logging",
};

/// Classifies a failure message.
///
/// Matching is by substring on the lower-cased message, first row wins, and
/// anything unmatched gets the generic code. Never fails.
pub fn classify(message: &str) -> Classification {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| lower.contains(p)))
        .map_or(FALLBACK, |rule| rule.classification)
}

/// Returns the table rows in matching order, followed by the fallback.
pub fn rules() -> impl Iterator<Item = Rule> {
    RULES.iter().copied().chain(std::iter::once(Rule {
        patterns: &[],
        classification: FALLBACK,
    }))
}
