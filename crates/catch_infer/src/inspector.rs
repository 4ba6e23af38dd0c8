//! Syntax-based hints about the code surrounding a call site.

use catch_common::{ContextMap, ContextValue};
use catch_source::{is_engine_frame, resolve_source_path};
use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Lines inspected on each side of the reported line.
const INSPECT_RADIUS: usize = 2;

/// Bound names that carry the failure itself and say nothing about the operation.
const FAILURE_NAMES: &[&str] = &["err", "e", "error", "_"];

/// Extracts context hints from the source code around a line.
///
/// Implementations must not fail: anything they cannot read or understand
/// yields an empty map.
pub trait SourceInspector: Send + Sync {
    /// Returns hints for the code near `line` (1-indexed) of `path`.
    fn hints_near(&self, path: &Path, line: u32) -> ContextMap;
}

/// An inspector that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopInspector;

impl SourceInspector for NoopInspector {
    fn hints_near(&self, _path: &Path, _line: u32) -> ContextMap {
        ContextMap::new()
    }
}

thread_local! {
    static RUST_PARSER: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        // A language mismatch surfaces as a failed parse.
        let _ = p.set_language(&tree_sitter_rust::LANGUAGE.into());
        p
    });
}

/// Inspects Rust source files with tree-sitter.
///
/// Nodes starting within two lines of the reported line are examined:
///
/// - method and path calls (`reader.read(..)`, `File::open(..)`) record
///   `function_call`; each plain identifier argument records
///   `arg_<i>_<name>`, and one whose name mentions `file` or `path` also
///   records `target_file`. Calls into the reporting engine are ignored.
/// - `let` bindings and assignments record the bound name as
///   `assigned_var`, unless it is a conventional failure name.
///
/// Later nodes overwrite earlier ones. Files without an `.rs` extension
/// produce no hints.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustSourceInspector;

impl RustSourceInspector {
    /// Returns hints for the code near `line` of already-loaded `source`.
    pub fn hints_in_source(&self, source: &str, line: u32) -> ContextMap {
        let mut hints = ContextMap::new();
        let Some(tree) = RUST_PARSER.with(|p| p.borrow_mut().parse(source, None)) else {
            log::debug!("tree-sitter produced no tree");
            return hints;
        };
        let center = line as usize;
        let window = center.saturating_sub(INSPECT_RADIUS)..=center + INSPECT_RADIUS;
        visit(tree.root_node(), source.as_bytes(), &window, &mut hints);
        hints
    }
}

impl SourceInspector for RustSourceInspector {
    fn hints_near(&self, path: &Path, line: u32) -> ContextMap {
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            return ContextMap::new();
        }
        let Some(resolved) = resolve_source_path(path) else {
            log::debug!("source file {} not found", path.display());
            return ContextMap::new();
        };
        match std::fs::read_to_string(&resolved) {
            Ok(source) => self.hints_in_source(&source, line),
            Err(err) => {
                log::debug!("cannot read {}: {err}", resolved.display());
                ContextMap::new()
            }
        }
    }
}

fn visit(node: Node<'_>, source: &[u8], window: &RangeInclusive<usize>, hints: &mut ContextMap) {
    let start = node.start_position().row + 1;
    let end = node.end_position().row + 1;
    if end < *window.start() || start > *window.end() {
        return;
    }

    if window.contains(&start) {
        match node.kind() {
            "call_expression" => record_call(node, source, hints),
            "let_declaration" | "let_condition" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    record_bindings(pattern, source, hints);
                }
            }
            "assignment_expression" => {
                if let Some(left) = node.child_by_field_name("left") {
                    record_bindings(left, source, hints);
                }
            }
            _ => {}
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, source, window, hints);
    }
}

fn record_call(node: Node<'_>, source: &[u8], hints: &mut ContextMap) {
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };
    let qualified = match function.kind() {
        "field_expression" => {
            let receiver = function.child_by_field_name("value").map(|v| v.kind());
            if !matches!(receiver, Some("identifier" | "self" | "field_expression")) {
                return;
            }
            text(function, source)
        }
        "scoped_identifier" => text(function, source),
        _ => None,
    };
    let Some(qualified) = qualified else {
        return;
    };
    let qualified: String = qualified.split_whitespace().collect();
    if is_engine_frame(&qualified) {
        return;
    }
    hints.insert("function_call".to_string(), ContextValue::Str(qualified));

    let Some(arguments) = node.child_by_field_name("arguments") else {
        return;
    };
    let mut cursor = arguments.walk();
    let args = arguments.named_children(&mut cursor).filter(|arg| !arg.is_extra());
    for (index, arg) in args.enumerate() {
        let arg = strip_reference(arg);
        if arg.kind() != "identifier" {
            continue;
        }
        let Some(name) = text(arg, source) else {
            continue;
        };
        hints.insert(format!("arg_{index}_{name}"), ContextValue::from(name));
        let lower = name.to_lowercase();
        if lower.contains("file") || lower.contains("path") {
            hints.insert("target_file".to_string(), ContextValue::from(name));
        }
    }
}

/// `&x` and `&mut x` are looked through to `x`.
fn strip_reference(node: Node<'_>) -> Node<'_> {
    match node.kind() {
        "reference_expression" => node.child_by_field_name("value").unwrap_or(node),
        _ => node,
    }
}

fn record_bindings(pattern: Node<'_>, source: &[u8], hints: &mut ContextMap) {
    if pattern.kind() == "identifier" {
        if let Some(name) = text(pattern, source) {
            if !FAILURE_NAMES.contains(&name) {
                hints.insert("assigned_var".to_string(), ContextValue::from(name));
            }
        }
        return;
    }

    // Skip the `Some` of `Some(x)` and the `Point` of `Point { x, .. }`.
    let type_id = pattern.child_by_field_name("type").map(|t| t.id());
    let mut cursor = pattern.walk();
    for child in pattern.named_children(&mut cursor) {
        if Some(child.id()) != type_id {
            record_bindings(child, source, hints);
        }
    }
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn hints(source: &str, line: u32) -> ContextMap {
        RustSourceInspector.hints_in_source(source, line)
    }

    fn get<'a>(map: &'a ContextMap, key: &str) -> Option<&'a str> {
        map.get(key).and_then(ContextValue::as_str)
    }

    #[test]
    fn path_call_with_path_argument() {
        let map = hints("let file = File::open(path);\n", 1);
        assert_eq!(get(&map, "function_call"), Some("File::open"));
        assert_eq!(get(&map, "arg_0_path"), Some("path"));
        assert_eq!(get(&map, "target_file"), Some("path"));
        assert_eq!(get(&map, "assigned_var"), Some("file"));
    }

    #[test]
    fn method_call_looks_through_references() {
        let map = hints("let n = reader.read_to_string(&mut buf);\n", 1);
        assert_eq!(get(&map, "function_call"), Some("reader.read_to_string"));
        assert_eq!(get(&map, "arg_0_buf"), Some("buf"));
        assert!(map.get("target_file").is_none());
        assert_eq!(get(&map, "assigned_var"), Some("n"));
    }

    #[test]
    fn failure_names_are_not_recorded() {
        let map = hints("fn f() {\n    let err = make();\n    let _ = make();\n}\n", 2);
        assert!(map.get("assigned_var").is_none());
        // `make` is a bare function, neither a method nor a path call.
        assert!(map.get("function_call").is_none());
    }

    #[test]
    fn assignments_record_their_target() {
        let map = hints("fn f() {\n    let mut total = 0;\n    total = compute();\n}\n", 3);
        assert_eq!(get(&map, "assigned_var"), Some("total"));
    }

    #[test]
    fn tuple_struct_pattern_skips_the_variant() {
        let map = hints("fn f() {\n    if let Some(entry) = cache.get(key) {}\n}\n", 2);
        assert_eq!(get(&map, "assigned_var"), Some("entry"));
        assert_eq!(get(&map, "function_call"), Some("cache.get"));
        assert_eq!(get(&map, "arg_0_key"), Some("key"));
    }

    #[test]
    fn engine_calls_are_ignored() {
        let source = "fn f() {\n    let data = fs::read(config_file);\n    catch::report(&err);\n}\n";
        let map = hints(source, 3);
        assert_eq!(get(&map, "function_call"), Some("fs::read"));
        assert_eq!(get(&map, "target_file"), Some("config_file"));
        assert!(map.get("arg_0_err").is_none());
    }

    #[test]
    fn lines_outside_window_are_ignored() {
        let mut source = String::from("fn f() {\n    let early = File::open(path);\n");
        for _ in 0..10 {
            source.push_str("    step();\n");
        }
        source.push_str("}\n");
        let map = hints(&source, 12);
        assert!(map.is_empty(), "unexpected hints: {map:?}");
    }

    #[test]
    fn invalid_source_yields_partial_or_no_hints() {
        let map = hints("let = = ( ;;", 1);
        assert!(map.get("function_call").is_none());
    }

    #[test]
    fn reads_rust_files_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".rs").tempfile().unwrap();
        writeln!(file, "fn main() {{").unwrap();
        writeln!(file, "    let settings = Config::load(settings_path);").unwrap();
        writeln!(file, "}}").unwrap();
        let map = RustSourceInspector.hints_near(file.path(), 2);
        assert_eq!(get(&map, "function_call"), Some("Config::load"));
        assert_eq!(get(&map, "target_file"), Some("settings_path"));
    }

    #[test]
    fn other_files_yield_nothing() {
        let mut file = tempfile::Builder::new().suffix(".go").tempfile().unwrap();
        writeln!(file, "f, err := os.Open(path)").unwrap();
        assert!(RustSourceInspector.hints_near(file.path(), 1).is_empty());
        assert!(RustSourceInspector
            .hints_near(Path::new("/nonexistent/file.rs"), 1)
            .is_empty());
        assert!(NoopInspector.hints_near(file.path(), 1).is_empty());
    }
}
