//! Walks a `def`/`async def` statement: signature extraction, then
//! recursion into the body with a scope derived from the decorator/static-
//! method check.

use ruff_python_ast::{self as ast, Expr};
use ruff_text_size::Ranged;

use crate::{error::SinkError, event::Sink, scope::Scope, serialize};

use super::{decorator, Walker};

pub(super) fn walk_function<S: Sink>(
    w: &mut Walker<'_, S>,
    func: &ast::StmtFunctionDef,
    scope: Scope,
    current_level: i32,
) -> Result<(), SinkError> {
    let is_static = decorator::walk_decorators(w, &func.decorator_list)?;
    let level = current_level + 1;

    let func_start = u32::from(func.range().start());
    let name_start = u32::from(func.name.range().start());
    let def_keyword = super::find_keyword(w.source, func_start, name_start, "def")
        .map(|offset| w.position(offset.into()))
        .unwrap_or_else(|| w.position(func.range().start()));

    let params_or_returns_end = func
        .returns
        .as_ref()
        .map(|r| r.range().end())
        .unwrap_or_else(|| func.parameters.range().end());
    let colon = super::find_colon_forward(w.source, u32::from(params_or_returns_end))
        .map(|offset| w.position(offset.into()))
        .unwrap_or_else(|| w.position(params_or_returns_end));

    let return_annotation = func
        .returns
        .as_ref()
        .map(|r| serialize::serialize_expr(w.source, r, w.options.max_expr_len))
        .unwrap_or_default();

    let name_pos = w.position(func.name.range().start());
    w.sink.on_function(
        func.name.as_str(),
        name_pos,
        def_keyword,
        colon,
        level,
        func.is_async,
        &return_annotation,
    )?;

    let first_param = emit_parameters(w, &func.parameters)?;

    w.emit_docstring(&func.body)?;

    let new_scope = if scope == Scope::Class {
        if is_static {
            Scope::ClassStaticMethod
        } else {
            Scope::ClassMethod
        }
    } else {
        Scope::Function
    };
    let new_first_param = if new_scope == Scope::ClassMethod { first_param } else { None };

    w.walk_body(&func.body, new_scope, level, new_first_param.as_deref())
}

/// Emits one `argument` event per formal parameter (in declaration order)
/// followed by one `argument-value` event per default, then returns the
/// first positional parameter's name (used for instance-attribute
/// detection in the body).
fn emit_parameters<S: Sink>(w: &mut Walker<'_, S>, parameters: &ast::Parameters) -> Result<Option<String>, SinkError> {
    let mut first_param = None;
    let mut note_first = |name: &str, first_param: &mut Option<String>| {
        if first_param.is_none() {
            *first_param = Some(name.to_owned());
        }
    };

    for p in parameters.posonlyargs.iter().chain(parameters.args.iter()) {
        let name = p.parameter.name.as_str();
        note_first(name, &mut first_param);
        emit_argument(w, name, p.parameter.annotation.as_deref(), p.parameter.range().start())?;
    }

    if let Some(vararg) = &parameters.vararg {
        let name = format!("*{}", vararg.name.as_str());
        emit_argument(w, &name, vararg.annotation.as_deref(), vararg.range().start())?;
    } else if !parameters.kwonlyargs.is_empty() {
        if let Some(star_offset) = bare_star_offset(w.source, parameters) {
            w.sink.on_argument("*", "", w.position(star_offset.into()))?;
        }
    }

    for p in &parameters.kwonlyargs {
        let name = p.parameter.name.as_str();
        emit_argument(w, name, p.parameter.annotation.as_deref(), p.parameter.range().start())?;
    }

    if let Some(kwarg) = &parameters.kwarg {
        let name = format!("**{}", kwarg.name.as_str());
        emit_argument(w, &name, kwarg.annotation.as_deref(), kwarg.range().start())?;
    }

    for p in parameters.posonlyargs.iter().chain(parameters.args.iter()).chain(parameters.kwonlyargs.iter()) {
        if let Some(default) = &p.default {
            let text = serialize::serialize_expr(w.source, default, w.options.max_expr_len);
            w.sink.on_argument_value(&text, w.position(default.range().start()))?;
        }
    }

    Ok(first_param)
}

fn emit_argument<S: Sink>(
    w: &mut Walker<'_, S>,
    name: &str,
    annotation: Option<&Expr>,
    position_offset: ruff_text_size::TextSize,
) -> Result<(), SinkError> {
    let annotation_text = annotation
        .map(|a| serialize::serialize_expr(w.source, a, w.options.max_expr_len))
        .unwrap_or_default();
    w.sink.on_argument(name, &annotation_text, w.position(position_offset))
}

/// Locates the bare `*` separator (no following vararg name) between the
/// last positional-or-posonly parameter and the first keyword-only one.
fn bare_star_offset(source: &str, parameters: &ast::Parameters) -> Option<u32> {
    let search_start = parameters
        .posonlyargs
        .last()
        .or_else(|| parameters.args.last())
        .map(|p| u32::from(p.range().end()))
        .unwrap_or_else(|| u32::from(parameters.range().start()));
    let search_end = parameters.kwonlyargs.first().map(|p| u32::from(p.range().start()))?;
    let slice = &source[search_start as usize..search_end as usize];
    slice.find('*').map(|rel| search_start + rel as u32)
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
    fn bare_star_separator_emits_its_own_argument_event() {
        let events = run("def f(a, *, b):\n    pass\n");
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::Argument { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "*", "b"]);
    }

    #[test]
    fn vararg_suppresses_the_bare_star_event() {
        let events = run("def f(a, *args, b):\n    pass\n");
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::Argument { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "*args", "b"]);
    }
}
