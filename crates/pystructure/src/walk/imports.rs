//! `import a.b.c as d` and `from ..pkg import x as y, z` shapes.

use ruff_python_ast as ast;
use ruff_text_size::Ranged;

use crate::{error::SinkError, event::Sink, truncate};

use super::Walker;

pub(super) fn walk_import<S: Sink>(w: &mut Walker<'_, S>, stmt: &ast::StmtImport) -> Result<(), SinkError> {
    for alias in &stmt.names {
        let pos = w.position(alias.name.range().start());
        w.sink.on_import(alias.name.as_str(), pos)?;
        if let Some(asname) = &alias.asname {
            let pos = w.position(asname.range().start());
            w.sink.on_as(asname.as_str(), pos)?;
        }
    }
    Ok(())
}

pub(super) fn walk_import_from<S: Sink>(w: &mut Walker<'_, S>, stmt: &ast::StmtImportFrom) -> Result<(), SinkError> {
    let level = stmt.level;
    let module_name = stmt.module.as_ref().map(ast::Identifier::as_str).unwrap_or("");
    let mut reference = ".".repeat(level as usize);
    reference.push_str(module_name);
    truncate::truncate(&mut reference, w.options.max_dotted_name_len);

    let stmt_start = u32::from(stmt.range().start());
    let stmt_end = u32::from(stmt.range().end());
    let reference_offset = super::find_keyword(w.source, stmt_start, stmt_end, "from")
        .map(|kw_start| skip_whitespace(w.source, kw_start + 4))
        .unwrap_or(stmt_start);
    w.sink.on_import(&reference, w.position(reference_offset.into()))?;

    if let [single] = stmt.names.as_slice() {
        if single.name.as_str() == "*" {
            return Ok(());
        }
    }

    for alias in &stmt.names {
        let pos = w.position(alias.name.range().start());
        w.sink.on_what(alias.name.as_str(), pos)?;
        if let Some(asname) = &alias.asname {
            let pos = w.position(asname.range().start());
            w.sink.on_as(asname.as_str(), pos)?;
        }
    }
    Ok(())
}

fn skip_whitespace(source: &str, mut offset: u32) -> u32 {
    let bytes = source.as_bytes();
    while (offset as usize) < bytes.len() && bytes[offset as usize] == b' ' {
        offset += 1;
    }
    offset
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

    fn run(source: &str, options: AnalyzerOptions) -> Vec<Event> {
        let module = parse_module(source).expect("valid module").into_syntax();
        let index = LineIndex::new(source);
        let mut sink = RecordingSink::new();
        let mut walker = Walker::new(source, &index, options, &mut sink);
        let ast::Stmt::ImportFrom(stmt) = &module.body[0] else {
            panic!("expected a `from` import");
        };
        walk_import_from(&mut walker, stmt).expect("sink never fails in these tests");
        sink.into_events()
    }

    #[test]
    fn truncates_multibyte_dotted_name_without_panicking() {
        // A relative import built from 3-byte identifiers: the reference
        // string's byte length does not line up with a naive 4-byte cutoff.
        let source = "from .\u{4e2d}\u{6587} import x\n";
        let mut options = AnalyzerOptions::default();
        options.max_dotted_name_len = 4;
        let events = run(source, options);
        let Event::Import { module, .. } = &events[0] else {
            panic!("expected an import event");
        };
        assert!(module.len() <= 4);
        assert!(module.is_char_boundary(module.len()));
    }
}
