//! Hints derived from the functions that led to a report.

use catch_common::{ContextMap, ContextValue};
use catch_source::location::base_name;
use catch_source::{is_engine_frame, StackFrame};

/// Caller frames examined before giving up.
const STACK_WINDOW: usize = 5;

/// Name fragments mapped to an `operation_type`, checked in order.
const OPERATION_KEYWORDS: &[&str] = &["read", "write", "open", "process", "handle"];

/// Infers context from the nearest resolvable caller frame.
///
/// Engine frames are skipped, and among the next five frames the first one
/// with a source location supplies `caller_function`, `caller_location`
/// (`file:line`, file name only) and, if its name mentions a known
/// operation, `operation_type`.
pub fn infer_from_stack(frames: &[StackFrame]) -> ContextMap {
    let mut hints = ContextMap::new();
    let caller = frames
        .iter()
        .filter(|frame| !is_engine_frame(frame.symbol()))
        .take(STACK_WINDOW)
        .find(|frame| frame.has_location());
    let Some(frame) = caller else {
        return hints;
    };

    let name = frame.function().to_lowercase();
    if let Some(operation) = OPERATION_KEYWORDS.iter().find(|kw| name.contains(*kw)) {
        hints.insert("operation_type".to_string(), ContextValue::from(*operation));
    }
    hints.insert(
        "caller_function".to_string(),
        ContextValue::from(frame.function()),
    );
    hints.insert(
        "caller_location".to_string(),
        ContextValue::Str(format!("{}:{}", base_name(frame.file()), frame.line())),
    );
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(map: &'a ContextMap, key: &str) -> Option<&'a str> {
        map.get(key).and_then(ContextValue::as_str)
    }

    #[test]
    fn first_resolvable_caller_wins() {
        let frames = vec![
            StackFrame::new("catch::report::report", "crates/catch/src/report.rs", 40),
            StackFrame::new("app::config::read_settings", "/work/app/src/config.rs", 12),
            StackFrame::new("app::main", "/work/app/src/main.rs", 3),
        ];
        let map = infer_from_stack(&frames);
        assert_eq!(get(&map, "operation_type"), Some("read"));
        assert_eq!(get(&map, "caller_function"), Some("config::read_settings"));
        assert_eq!(get(&map, "caller_location"), Some("config.rs:12"));
    }

    #[test]
    fn keyword_order_decides() {
        let frames = vec![StackFrame::new("app::open_and_write", "a.rs", 1)];
        assert_eq!(get(&infer_from_stack(&frames), "operation_type"), Some("write"));
    }

    #[test]
    fn no_keyword_no_operation_type() {
        let frames = vec![StackFrame::new("app::run", "main.rs", 9)];
        let map = infer_from_stack(&frames);
        assert!(map.get("operation_type").is_none());
        assert_eq!(get(&map, "caller_function"), Some("app::run"));
    }

    #[test]
    fn frames_without_location_are_skipped() {
        let frames = vec![
            StackFrame::new("app::handler", "", 0),
            StackFrame::new("app::handle_request", "server.rs", 77),
        ];
        let map = infer_from_stack(&frames);
        assert_eq!(get(&map, "caller_function"), Some("app::handle_request"));
        assert_eq!(get(&map, "operation_type"), Some("handle"));
    }

    #[test]
    fn gives_up_after_window() {
        let mut frames: Vec<StackFrame> = (0..STACK_WINDOW)
            .map(|i| StackFrame::new(format!("app::f{i}"), "", 0))
            .collect();
        frames.push(StackFrame::new("app::read_all", "late.rs", 1));
        assert!(infer_from_stack(&frames).is_empty());
        assert!(infer_from_stack(&[]).is_empty());
    }
}
