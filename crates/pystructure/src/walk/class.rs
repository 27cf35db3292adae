//! Walks a `class` statement: name, keyword/colon positions, base-class
//! expressions, then recursion into the body with scope `Class`.

use ruff_python_ast::{self as ast};
use ruff_text_size::Ranged;

use crate::{error::SinkError, event::Sink, scope::Scope, serialize};

use super::{decorator, Walker};

pub(super) fn walk_class<S: Sink>(
    w: &mut Walker<'_, S>,
    class_def: &ast::StmtClassDef,
    scope: Scope,
    current_level: i32,
) -> Result<(), SinkError> {
    decorator::walk_decorators(w, &class_def.decorator_list)?;
    let level = current_level + 1;

    let class_start = u32::from(class_def.range().start());
    let name_start = u32::from(class_def.name.range().start());
    let class_keyword = super::find_keyword(w.source, class_start, name_start, "class")
        .map(|offset| w.position(offset.into()))
        .unwrap_or_else(|| w.position(class_def.range().start()));

    let signature_end = class_def
        .arguments
        .as_ref()
        .map(|a| a.range().end())
        .unwrap_or_else(|| class_def.name.range().end());
    let colon = super::find_colon_forward(w.source, u32::from(signature_end))
        .map(|offset| w.position(offset.into()))
        .unwrap_or_else(|| w.position(signature_end));

    let name_pos = w.position(class_def.name.range().start());
    w.sink.on_class(class_def.name.as_str(), name_pos, class_keyword, colon, level)?;

    if let Some(arguments) = &class_def.arguments {
        for base in &arguments.args {
            let text = serialize::serialize_expr(w.source, base, w.options.max_expr_len);
            w.sink.on_base_class(&text, w.position(base.range().start()))?;
        }
        for kw in &arguments.keywords {
            let value = serialize::serialize_expr(w.source, &kw.value, w.options.max_expr_len);
            let text = match &kw.arg {
                Some(name) => format!("{}={}", name.as_str(), value),
                None => format!("**{value}"),
            };
            w.sink.on_base_class(&text, w.position(kw.range().start()))?;
        }
    }

    w.emit_docstring(&class_def.body)?;

    w.walk_body(&class_def.body, Scope::Class, level, None)
}

#[cfg(test)]
mod tests {
    use ruff_python_parser::parse_module;

    use super::*;
    use crate::{
        event::{Event, RecordingSink},
        line_index::LineIndex,
        options::AnalyzerOptions,
    };

    fn run(source: &str) -> Vec<Event> {
        let module = parse_module(source).expect("valid module").into_syntax();
        let index = LineIndex::new(source);
        let mut sink = RecordingSink::new();
        Walker::new(source, &index, AnalyzerOptions::default(), &mut sink)
            .run(&module)
            .expect("sink never fails in these tests");
        sink.into_events()
    }

    #[test]
    fn keyword_argument_base_renders_as_name_equals_value() {
        let events = run("class C(Base, metaclass=Meta):\n    pass\n");
        let bases: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::BaseClass { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bases, vec!["Base", "metaclass=Meta"]);
    }
}
