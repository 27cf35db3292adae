//! Re-serializes an expression sub-tree into a canonical, single-line source
//! fragment.
//!
//! Used for annotations, default values, inheritance arguments, and
//! decorator arguments. Unlike a raw source slice, the output is stable
//! across whitespace-only source variation: word-like keywords and binary
//! operators are always surrounded by exactly one space, `,`/`:` always
//! render as `", "`/`": "`, and brackets/dots are always tight. Leaf tokens
//! (names, literals) are copied verbatim from the source so that numeric
//! formatting (`0x1A`, `1_000`) and string quoting survive unchanged.

use ruff_python_ast::{self as ast, BoolOp, CmpOp, Expr, Operator, UnaryOp};
use ruff_text_size::Ranged;

use crate::truncate;

/// Serializes `expr` into a canonical source fragment, truncated to `max_len` bytes.
#[must_use]
pub fn serialize_expr(source: &str, expr: &Expr, max_len: usize) -> String {
    let mut serializer = Serializer { source, buf: String::new() };
    serializer.expr(expr);
    let mut out = serializer.buf;
    truncate::truncate(&mut out, max_len);
    out
}

/// Serializes the positional and keyword arguments of a call/class-bases
/// list into a single `", "`-joined fragment (used for `base-class` and
/// `decorator-argument` payloads when the caller wants the whole list).
#[must_use]
pub fn serialize_arguments(source: &str, arguments: &ast::Arguments, max_len: usize) -> String {
    let mut serializer = Serializer { source, buf: String::new() };
    serializer.arguments(arguments);
    let mut out = serializer.buf;
    truncate::truncate(&mut out, max_len);
    out
}

struct Serializer<'a> {
    source: &'a str,
    buf: String,
}

impl<'a> Serializer<'a> {
    fn raw(&mut self, node: &impl Ranged) {
        self.buf.push_str(&self.source[node.range()]);
    }

    fn tight(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn trim_trailing_space(&mut self) {
        while self.buf.ends_with(' ') {
            self.buf.pop();
        }
    }

    /// A keyword or binary-operator token: always padded with one space on
    /// each side, without ever producing a doubled space.
    fn padded(&mut self, s: &str) {
        if !self.buf.is_empty() && !self.buf.ends_with(' ') {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
        self.buf.push(' ');
    }

    fn comma(&mut self) {
        self.trim_trailing_space();
        self.buf.push_str(", ");
    }

    fn colon(&mut self) {
        self.trim_trailing_space();
        self.buf.push_str(": ");
    }

    fn comma_separated<T>(&mut self, items: &[T], mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            f(self, item);
        }
    }

    fn arguments(&mut self, arguments: &ast::Arguments) {
        let mut first = true;
        for arg in &arguments.args {
            if !first {
                self.comma();
            }
            first = false;
            self.expr(arg);
        }
        for kw in &arguments.keywords {
            if !first {
                self.comma();
            }
            first = false;
            match &kw.arg {
                Some(name) => {
                    self.tight(name.as_str());
                    self.tight("=");
                    self.expr(&kw.value);
                }
                None => {
                    self.tight("**");
                    self.expr(&kw.value);
                }
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(n) => self.tight(n.id.as_str()),
            Expr::Attribute(a) => {
                self.expr(&a.value);
                self.tight(".");
                self.tight(a.attr.as_str());
            }
            Expr::Call(c) => {
                self.expr(&c.func);
                self.tight("(");
                self.arguments(&c.arguments);
                self.tight(")");
            }
            Expr::Subscript(s) => {
                self.expr(&s.value);
                self.tight("[");
                self.expr(&s.slice);
                self.tight("]");
            }
            Expr::Tuple(t) => {
                self.tight("(");
                self.comma_separated(&t.elts, Self::expr);
                self.tight(")");
            }
            Expr::List(l) => {
                self.tight("[");
                self.comma_separated(&l.elts, Self::expr);
                self.tight("]");
            }
            Expr::Set(s) => {
                self.tight("{");
                self.comma_separated(&s.elts, Self::expr);
                self.tight("}");
            }
            Expr::Dict(d) => {
                self.tight("{");
                for (i, item) in d.items.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    match &item.key {
                        Some(key) => {
                            self.expr(key);
                            self.colon();
                            self.expr(&item.value);
                        }
                        None => {
                            self.tight("**");
                            self.expr(&item.value);
                        }
                    }
                }
                self.tight("}");
            }
            Expr::Starred(s) => {
                self.tight("*");
                self.expr(&s.value);
            }
            Expr::UnaryOp(u) => {
                match u.op {
                    UnaryOp::Not => self.padded("not"),
                    UnaryOp::UAdd => self.tight("+"),
                    UnaryOp::USub => self.tight("-"),
                    UnaryOp::Invert => self.tight("~"),
                }
                self.expr(&u.operand);
            }
            Expr::BinOp(b) => {
                self.expr(&b.left);
                self.padded(binop_str(b.op));
                self.expr(&b.right);
            }
            Expr::BoolOp(b) => {
                let op = match b.op {
                    BoolOp::And => "and",
                    BoolOp::Or => "or",
                };
                self.comma_separated_with(&b.values, op);
            }
            Expr::Compare(c) => {
                self.expr(&c.left);
                for (op, right) in c.ops.iter().zip(c.comparators.iter()) {
                    self.padded(cmpop_str(*op));
                    self.expr(right);
                }
            }
            Expr::NamedExpr(n) => {
                self.expr(&n.target);
                self.padded(":=");
                self.expr(&n.value);
            }
            Expr::Lambda(l) => {
                self.tight("lambda");
                if let Some(params) = &l.parameters {
                    self.tight(" ");
                    let mut first = true;
                    for p in params.posonlyargs.iter().chain(params.args.iter()).chain(params.kwonlyargs.iter()) {
                        if !first {
                            self.comma();
                        }
                        first = false;
                        self.tight(p.parameter.name.as_str());
                    }
                    if let Some(vararg) = &params.vararg {
                        if !first {
                            self.comma();
                        }
                        first = false;
                        self.tight("*");
                        self.tight(vararg.name.as_str());
                    }
                    if let Some(kwarg) = &params.kwarg {
                        if !first {
                            self.comma();
                        }
                        self.tight("**");
                        self.tight(kwarg.name.as_str());
                    }
                }
                self.colon();
                self.expr(&l.body);
            }
            Expr::If(e) => {
                self.expr(&e.body);
                self.padded("if");
                self.expr(&e.test);
                self.padded("else");
                self.expr(&e.orelse);
            }
            Expr::Slice(s) => {
                if let Some(lower) = &s.lower {
                    self.expr(lower);
                }
                self.tight(":");
                if let Some(upper) = &s.upper {
                    self.expr(upper);
                }
                if let Some(step) = &s.step {
                    self.tight(":");
                    self.expr(step);
                }
            }
            // Everything else (literals, f-strings, comprehensions, yield,
            // await, `...`) is reconstructed verbatim from the source: they
            // either have no internal structure worth canonicalizing
            // (numbers, strings) or canonicalizing them is not needed by
            // any caller of this serializer (annotations/defaults/decorator
            // and base-class arguments are rarely comprehensions).
            other => self.raw(other),
        }
    }

    fn comma_separated_with(&mut self, items: &[Expr], word: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.padded(word);
            }
            self.expr(item);
        }
    }
}

fn binop_str(op: Operator) -> &'static str {
    match op {
        Operator::Add => "+",
        Operator::Sub => "-",
        Operator::Mult => "*",
        Operator::MatMult => "@",
        Operator::Div => "/",
        Operator::Mod => "%",
        Operator::Pow => "**",
        Operator::LShift => "<<",
        Operator::RShift => ">>",
        Operator::BitOr => "|",
        Operator::BitXor => "^",
        Operator::BitAnd => "&",
        Operator::FloorDiv => "//",
    }
}

fn cmpop_str(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::NotEq => "!=",
        CmpOp::Lt => "<",
        CmpOp::LtE => "<=",
        CmpOp::Gt => ">",
        CmpOp::GtE => ">=",
        CmpOp::Is => "is",
        CmpOp::IsNot => "is not",
        CmpOp::In => "in",
        CmpOp::NotIn => "not in",
    }
}

#[cfg(test)]
mod tests {
    use ruff_python_parser::parse_module;

    use super::*;

    fn parse_expr(src: &str) -> ruff_python_ast::ModModule {
        parse_module(src).expect("valid expression module").into_syntax()
    }

    fn first_expr(module: &ruff_python_ast::ModModule) -> &Expr {
        match &module.body[0] {
            ast::Stmt::Expr(e) => &e.value,
            _ => panic!("expected an expression statement"),
        }
    }

    #[test]
    fn pads_binary_operators_and_keywords() {
        let src = "a+b and c in d\n";
        let module = parse_expr(src);
        let out = serialize_expr(src, first_expr(&module), 2048);
        assert_eq!(out, "a + b and c in d");
    }

    #[test]
    fn renders_call_and_attribute_tight() {
        let src = "pkg.mod.Cls(1, key=2)\n";
        let module = parse_expr(src);
        let out = serialize_expr(src, first_expr(&module), 2048);
        assert_eq!(out, "pkg.mod.Cls(1, key=2)");
    }

    #[test]
    fn truncates_to_max_len() {
        let src = "aaaaaaaaaa\n";
        let module = parse_expr(src);
        let out = serialize_expr(src, first_expr(&module), 4);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn truncates_multibyte_name_without_panicking() {
        // A non-ASCII identifier (PEP 3131) whose 3-byte characters don't
        // land on the byte limit.
        let src = "\u{4e2d}\u{6587}\u{540d}\u{524d}\n";
        let module = parse_expr(src);
        let out = serialize_expr(src, first_expr(&module), 4);
        assert!(out.len() <= 4);
        assert!(out.is_char_boundary(out.len()));
    }
}
