#![doc = include_str!("../../../README.md")]

pub mod docstring;
pub mod encoding;
pub mod error;
pub mod event;
pub mod line_index;
pub mod options;
pub mod position;
pub mod scope;
pub mod serialize;
mod truncate;
mod walk;

pub use crate::{
    error::{AnalyzeError, AnalyzeErrorKind, SinkError},
    event::{Event, NoopSink, RecordingSink, Sink},
    line_index::LineIndex,
    options::{AnalyzerOptions, DocstringLineConvention},
    position::Position,
    scope::Scope,
};

/// Analyzes one source buffer, delivering structural events to `sink` in
/// source order.
///
/// `filename` is accepted for parity with embedders that pass a byte buffer
/// and a pseudo-filename together and want it threaded through for
/// identification; no event emitted by this crate carries it, since
/// `ruff_python_parser` needs only the source text.
///
/// A failure to parse is reported as a single `error` event and `Ok(())` is
/// returned — a parser failure is data, not a call failure. An `Err` is
/// returned only when a `sink` handler itself fails.
pub fn analyze(source: &str, filename: &str, options: AnalyzerOptions, sink: &mut impl Sink) -> Result<(), SinkError> {
    let _ = filename;
    let index = LineIndex::new(source);

    if let Some(decl) = encoding::detect(source, &index) {
        sink.on_encoding(&decl.name, decl.position)?;
    }

    let parsed = match ruff_python_parser::parse_module(source) {
        Ok(parsed) => parsed,
        Err(err) => {
            let range = ruff_text_size::Ranged::range(&err);
            let position = index.position(range.start());
            let offending_text = if range.is_empty() { None } else { Some(source[range].to_owned()) };
            let kind = AnalyzeErrorKind::classify(&err.to_string());
            let analyze_err = AnalyzeError::new(kind, position, offending_text, options.max_error_msg_len);
            sink.on_error(&analyze_err.to_string())?;
            return Ok(());
        }
    };

    let module = parsed.into_syntax();
    walk::Walker::new(source, &index, options, sink).run(&module)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::Event;

    fn run(source: &str) -> Vec<Event> {
        let mut sink = RecordingSink::new();
        analyze(source, "<test>", AnalyzerOptions::default(), &mut sink).expect("sink never fails in these tests");
        sink.into_events()
    }

    #[test]
    fn module_docstring_then_import() {
        let events = run("\"\"\"M\"\"\"\nimport os\n");
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], Event::Docstring { text, start_line: 1, end_line: 1 } if text == "M"));
        assert!(matches!(&events[1], Event::Import { module, position } if module == "os" && position.line == 2));
    }

    #[test]
    fn class_with_base_and_attribute() {
        let events = run("class A(B):\n    x = 1\n");
        assert!(matches!(&events[0], Event::Class { name, level: 0, .. } if name == "A"));
        assert!(matches!(&events[1], Event::BaseClass { text, .. } if text == "B"));
        assert!(matches!(&events[2], Event::ClassAttribute { name, level: 0, .. } if name == "x"));
    }

    #[test]
    fn method_with_instance_attribute() {
        let events = run("class C:\n    def m(self, x=1):\n        self.v = x\n");
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                Event::Class { .. } => "class",
                Event::Function { .. } => "function",
                Event::Argument { .. } => "argument",
                Event::ArgumentValue { .. } => "argument-value",
                Event::InstanceAttribute { .. } => "instance-attribute",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["class", "function", "argument", "argument", "argument-value", "instance-attribute"]);
        assert!(matches!(&events[1], Event::Function { level: 1, is_async: false, .. }));
        assert!(matches!(&events[5], Event::InstanceAttribute { name, level: 1, .. } if name == "v"));
    }

    #[test]
    fn static_method_has_no_instance_attribute() {
        let events = run("class C:\n    @staticmethod\n    def f():\n        y = 1\n");
        assert!(!events.iter().any(|e| matches!(e, Event::InstanceAttribute { .. })));
        assert!(matches!(&events[1], Event::Decorator { name, .. } if name == "staticmethod"));
    }

    #[test]
    fn async_function_with_annotations() {
        let events = run("async def f(x: int = 0) -> str:\n    \"\"\"D\"\"\"\n");
        assert!(matches!(
            &events[0],
            Event::Function { name, is_async: true, return_annotation, level: 0, .. }
            if name == "f" && return_annotation == "str"
        ));
        assert!(matches!(&events[1], Event::Argument { name, annotation, .. } if name == "x" && annotation == "int"));
        assert!(matches!(&events[2], Event::ArgumentValue { text, .. } if text == "0"));
        assert!(matches!(&events[3], Event::Docstring { text, .. } if text == "D"));
    }

    #[test]
    fn from_import_with_alias_and_star() {
        let events = run("from ..pkg import a as b, c\n");
        assert!(matches!(&events[0], Event::Import { module, .. } if module == "..pkg"));
        assert!(matches!(&events[1], Event::What { name, .. } if name == "a"));
        assert!(matches!(&events[2], Event::As { name, .. } if name == "b"));
        assert!(matches!(&events[3], Event::What { name, .. } if name == "c"));
    }

    #[test]
    fn wildcard_import_emits_no_what_events() {
        let events = run("from pkg import *\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::Import { module, .. } if module == "pkg"));
    }

    #[test]
    fn global_vs_function_local_scope() {
        let events = run("x = 1\ndef f():\n    y = 2\n");
        assert!(matches!(&events[0], Event::Global { name, .. } if name == "x"));
        assert!(matches!(&events[1], Event::Function { name, .. } if name == "f"));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn syntax_error_is_reported_without_panicking() {
        let events = run("def f(:\n    pass\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::Error { .. }));
    }
}
