//! The traversal driver: depth-first walk, scope threading, nesting-depth
//! tracking, and dispatch to the per-shape walkers below.

mod assignment;
mod class;
mod decorator;
mod function;
mod imports;

use ruff_python_ast::{self as ast, Expr, Stmt};
use ruff_text_size::{Ranged, TextSize};

use crate::{
    docstring, error::SinkError, event::Sink, line_index::LineIndex, options::AnalyzerOptions, position::Position,
    scope::Scope,
};

/// Shared state threaded through the whole walk: the source buffer, its
/// line index, the active options, and the sink receiving events.
///
/// Scope, nesting level, and the enclosing method's first-parameter name
/// are *not* stored here: they change per recursive call, so they're
/// threaded explicitly through the recursion instead of held as ambient
/// state shared across sibling subtrees.
pub struct Walker<'a, S> {
    pub(crate) source: &'a str,
    pub(crate) index: &'a LineIndex,
    pub(crate) options: AnalyzerOptions,
    pub(crate) sink: &'a mut S,
}

impl<'a, S: Sink> Walker<'a, S> {
    pub fn new(source: &'a str, index: &'a LineIndex, options: AnalyzerOptions, sink: &'a mut S) -> Self {
        Self { source, index, options, sink }
    }

    pub(crate) fn position(&self, offset: TextSize) -> Position {
        self.index.position(offset)
    }

    /// Runs the whole module body, emitting the module docstring (if any)
    /// before the first statement.
    pub fn run(&mut self, module: &ast::ModModule) -> Result<(), SinkError> {
        self.emit_docstring(&module.body)?;
        self.walk_body(&module.body, Scope::Global, -1, None)
    }

    pub(crate) fn emit_docstring(&mut self, body: &[Stmt]) -> Result<(), SinkError> {
        if let Some(doc) = docstring::extract(
            self.source,
            self.index,
            body,
            self.options.docstring_line_convention,
            self.options.max_docstring_len,
        ) {
            self.sink.on_docstring(&doc.text, doc.start_line, doc.end_line)?;
        }
        Ok(())
    }

    /// Walks every statement of `body` under `scope` at `current_level`,
    /// dispatching to the component walkers and recursing generically into
    /// compound statements that introduce no new scope (`if`/`for`/`while`/
    /// `with`/`try`/`match`).
    pub(crate) fn walk_body(
        &mut self,
        body: &[Stmt],
        scope: Scope,
        current_level: i32,
        first_param: Option<&str>,
    ) -> Result<(), SinkError> {
        for stmt in body {
            self.walk_stmt(stmt, scope, current_level, first_param)?;
        }
        Ok(())
    }

    fn walk_stmt(
        &mut self,
        stmt: &Stmt,
        scope: Scope,
        current_level: i32,
        first_param: Option<&str>,
    ) -> Result<(), SinkError> {
        match stmt {
            Stmt::Import(import_stmt) => imports::walk_import(self, import_stmt),
            Stmt::ImportFrom(import_from) => imports::walk_import_from(self, import_from),
            Stmt::FunctionDef(func) => function::walk_function(self, func, scope, current_level),
            Stmt::ClassDef(class_def) => class::walk_class(self, class_def, scope, current_level),
            Stmt::Assign(assign) => assignment::walk_targets(self, &assign.targets, scope, current_level, first_param),
            Stmt::AnnAssign(ann_assign) => {
                assignment::walk_targets(self, std::slice::from_ref(&ann_assign.target), scope, current_level, first_param)
            }
            other => self.recurse_into_compound(other, scope, current_level, first_param),
        }
    }

    /// Statements with no declaration shape of their own, but whose nested
    /// suites may still contain declarations at the *same* scope/level
    /// (an `if` inside a method body is not itself a new entity).
    fn recurse_into_compound(
        &mut self,
        stmt: &Stmt,
        scope: Scope,
        current_level: i32,
        first_param: Option<&str>,
    ) -> Result<(), SinkError> {
        match stmt {
            Stmt::If(s) => {
                self.walk_body(&s.body, scope, current_level, first_param)?;
                for clause in &s.elif_else_clauses {
                    self.walk_body(&clause.body, scope, current_level, first_param)?;
                }
                Ok(())
            }
            Stmt::For(s) => {
                self.walk_body(&s.body, scope, current_level, first_param)?;
                self.walk_body(&s.orelse, scope, current_level, first_param)
            }
            Stmt::While(s) => {
                self.walk_body(&s.body, scope, current_level, first_param)?;
                self.walk_body(&s.orelse, scope, current_level, first_param)
            }
            Stmt::With(s) => self.walk_body(&s.body, scope, current_level, first_param),
            Stmt::Try(s) => {
                self.walk_body(&s.body, scope, current_level, first_param)?;
                for handler in &s.handlers {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    self.walk_body(&handler.body, scope, current_level, first_param)?;
                }
                self.walk_body(&s.orelse, scope, current_level, first_param)?;
                self.walk_body(&s.finalbody, scope, current_level, first_param)
            }
            Stmt::Match(s) => {
                for case in &s.cases {
                    self.walk_body(&case.body, scope, current_level, first_param)?;
                }
                Ok(())
            }
            // Expression statements, `return`/`raise`/`del`/`pass`/`global`/
            // `nonlocal`/`assert`/augmented-assignment/type-alias: none
            // introduce declarations under this specification.
            _ => Ok(()),
        }
    }
}

/// Flattens a possibly-nested unpacking target list into its leaf
/// expressions, applying the "no trailer" rule recursively at every
/// nesting level rather than only the top (`(a, (b, c)) = f()` classifies
/// `a`, `b`, and `c` individually).
pub(crate) fn collect_leaf_targets<'e>(target: &'e Expr, out: &mut Vec<&'e Expr>) {
    match target {
        Expr::Tuple(t) => {
            for elt in &t.elts {
                collect_leaf_targets(elt, out);
            }
        }
        Expr::List(l) => {
            for elt in &l.elts {
                collect_leaf_targets(elt, out);
            }
        }
        Expr::Starred(s) => collect_leaf_targets(&s.value, out),
        other => out.push(other),
    }
}

/// Finds the first standalone occurrence of `keyword` inside `[start, end)`
/// of `source` (not preceded/followed by an identifier character), used to
/// recover the `def`/`class` keyword position the typed AST doesn't store
/// directly.
pub(crate) fn find_keyword(source: &str, start: u32, end: u32, keyword: &str) -> Option<u32> {
    let haystack = &source[start as usize..end as usize];
    let mut search_from = 0usize;
    while let Some(rel) = haystack[search_from..].find(keyword) {
        let idx = search_from + rel;
        let before_ok = idx == 0 || !is_ident_byte(haystack.as_bytes()[idx - 1]);
        let after = idx + keyword.len();
        let after_ok = after >= haystack.len() || !is_ident_byte(haystack.as_bytes()[after]);
        if before_ok && after_ok {
            return Some(start + idx as u32);
        }
        search_from = idx + 1;
    }
    None
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Finds the first `:` at or after `start`, recovering a `def`/`class`
/// signature's colon position.
pub(crate) fn find_colon_forward(source: &str, start: u32) -> Option<u32> {
    source[start as usize..].find(':').map(|rel| start + rel as u32)
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

    fn parse_target(src: &str) -> ast::ModModule {
        parse_module(src).expect("valid module").into_syntax()
    }

    #[test]
    fn collect_leaf_targets_flattens_nested_unpacking() {
        let module = parse_target("(a, (b, c)) = f()\n");
        let Stmt::Assign(assign) = &module.body[0] else {
            panic!("expected an assignment");
        };
        let mut leaves = Vec::new();
        collect_leaf_targets(&assign.targets[0], &mut leaves);
        let names: Vec<&str> = leaves
            .iter()
            .map(|e| match e {
                Expr::Name(n) => n.id.as_str(),
                other => panic!("unexpected leaf {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn nested_tuple_unpack_declares_every_leaf_at_module_scope() {
        let events = run("(a, (b, c)) = f()\n");
        let names: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                Event::Global { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn for_loop_target_is_not_classified_as_an_assignment() {
        let events = run("for (a, b) in x:\n    pass\n");
        assert!(!events.iter().any(|e| matches!(e, Event::Global { .. })));
    }
}
