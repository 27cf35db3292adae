//! Resolves a decorator's name and arguments, and reports whether any
//! sibling decorator was `staticmethod`.

use ruff_python_ast::{self as ast, Expr};
use ruff_text_size::Ranged;

use crate::{error::SinkError, event::Sink, serialize};

use super::Walker;

/// Walks every decorator of a class/function definition, emitting
/// `decorator`/`decorator-argument` events in source order, all preceding
/// the definition event itself. Returns whether any of them was a bare
/// `@staticmethod`.
pub(super) fn walk_decorators<S: Sink>(w: &mut Walker<'_, S>, decorators: &[ast::Decorator]) -> Result<bool, SinkError> {
    let mut is_static = false;
    for decorator in decorators {
        is_static |= walk_one(w, decorator)?;
    }
    Ok(is_static)
}

fn walk_one<S: Sink>(w: &mut Walker<'_, S>, decorator: &ast::Decorator) -> Result<bool, SinkError> {
    let (name_expr, call) = match &decorator.expression {
        Expr::Call(call) => (call.func.as_ref(), Some(call)),
        other => (other, None),
    };

    let name_text = serialize::serialize_expr(w.source, name_expr, w.options.max_expr_len);
    let name_pos = w.position(name_expr.range().start());
    w.sink.on_decorator(&name_text, name_pos)?;

    if let Some(call) = call {
        let arguments = &call.arguments;
        if arguments.args.is_empty() && arguments.keywords.is_empty() {
            let pos = w.position(arguments.range().start());
            w.sink.on_decorator_argument("", pos)?;
        } else {
            for arg in &arguments.args {
                let text = serialize::serialize_expr(w.source, arg, w.options.max_expr_len);
                let pos = w.position(arg.range().start());
                w.sink.on_decorator_argument(&text, pos)?;
            }
            for kw in &arguments.keywords {
                let value = serialize::serialize_expr(w.source, &kw.value, w.options.max_expr_len);
                let text = match &kw.arg {
                    Some(name) => format!("{}={}", name.as_str(), value),
                    None => format!("**{value}"),
                };
                let pos = w.position(kw.range().start());
                w.sink.on_decorator_argument(&text, pos)?;
            }
        }
    }

    Ok(name_text == "staticmethod")
}
