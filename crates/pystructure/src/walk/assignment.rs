//! Distinguishes declaration from use on an assignment's left-hand side
//! and, inside a method, recognizes `self.x = …` as an instance attribute.

use ruff_python_ast::Expr;
use ruff_text_size::Ranged;

use crate::{error::SinkError, event::Sink, scope::Scope};

use super::{collect_leaf_targets, Walker};

/// Classifies every LHS target of an assignment statement (there may be
/// more than one in `a = b = expr`), recursing through nested tuple/list
/// unpacking at every level.
pub(super) fn walk_targets<S: Sink>(
    w: &mut Walker<'_, S>,
    targets: &[Expr],
    scope: Scope,
    current_level: i32,
    first_param: Option<&str>,
) -> Result<(), SinkError> {
    let mut leaves = Vec::new();
    for target in targets {
        collect_leaf_targets(target, &mut leaves);
    }
    for leaf in leaves {
        classify_leaf(w, leaf, scope, current_level, first_param)?;
    }
    Ok(())
}

fn classify_leaf<S: Sink>(
    w: &mut Walker<'_, S>,
    leaf: &Expr,
    scope: Scope,
    current_level: i32,
    first_param: Option<&str>,
) -> Result<(), SinkError> {
    match leaf {
        // A bare name has no trailer: it's a declaration, classified by scope.
        Expr::Name(name) => {
            let pos = w.position(name.range().start());
            match scope {
                Scope::Global => w.sink.on_global(name.id.as_str(), pos, current_level),
                Scope::Class => w.sink.on_class_attribute(name.id.as_str(), pos, current_level),
                Scope::Function | Scope::ClassMethod | Scope::ClassStaticMethod => Ok(()),
            }
        }
        // An attribute access always carries one trailer — only the
        // `first_param.NAME` shape inside a method is special-cased as an
        // instance attribute; every other attribute target is a use.
        Expr::Attribute(attr) => {
            if scope == Scope::ClassMethod {
                if let (Some(first), Expr::Name(base)) = (first_param, attr.value.as_ref()) {
                    if base.id.as_str() == first {
                        let pos = w.position(attr.attr.range().start());
                        return w.sink.on_instance_attribute(attr.attr.as_str(), pos, current_level);
                    }
                }
            }
            Ok(())
        }
        // Subscript, call, or anything else carrying a trailer: a use.
        _ => Ok(()),
    }
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
    fn chained_targets_each_declare_at_module_scope() {
        let events = run("a = b = 1\n");
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::Global { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn a_leaf_with_its_own_trailer_is_not_a_declaration() {
        // `b.x` is an attribute access nested two levels deep inside the
        // unpack; it carries a trailer of its own and must be treated as a
        // use, same as a top-level attribute target would be.
        let events = run("(a, (b.x, c)) = f()\n");
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::Global { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
