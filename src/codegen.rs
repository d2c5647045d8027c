//! Class emitter and the single formatting pass over the Python IR.
//!
//! All indentation and line-separator decisions are made here; the IR itself
//! carries no layout. Output is a pure function of the IR and the [`Layout`],
//! so identical inputs always render byte-identical text.
use std::fmt::Write;

use serde::Deserialize;

use crate::ir::{ClassDef, Expr, Item, MethodDef, Program, Statement, StmtKind};
use crate::literal::python_literal;

/// Stored attributes are named `<prefix><field>`.
pub const ATTRIBUTE_PREFIX: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub indent: String,
    pub newline: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self { indent: "    ".to_string(), newline: "\n".to_string() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CLASS EMITTER
// ————————————————————————————————————————————————————————————————————————————

/// Plain-old-property class: `__init__` storing one attribute per field, then
/// one read accessor per field. Both follow `field_names` order.
pub fn popo_class<S: AsRef<str>>(name: &str, field_names: &[S]) -> ClassDef {
    let params: Vec<String> = field_names.iter().map(|f| f.as_ref().to_string()).collect();

    let mut init_body: Vec<Statement> = params
        .iter()
        .map(|f| Statement::assign(Expr::attr(f), Expr::name(f)))
        .collect();
    if init_body.is_empty() {
        init_body.push(Statement::new(StmtKind::Pass));
    }

    let mut methods = vec![MethodDef {
        comments: Vec::new(),
        name: "__init__".to_string(),
        params: params.clone(),
        body: init_body,
    }];
    methods.extend(params.iter().map(|f| MethodDef {
        comments: Vec::new(),
        name: accessor_name(f),
        params: Vec::new(),
        body: vec![Statement::ret(Expr::attr(f))],
    }));

    ClassDef { comments: Vec::new(), name: name.to_string(), methods }
}

/// `uniqueName` → `getUniqueName`
pub fn accessor_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Render a standalone plain-old-property class with the default layout.
pub fn emit_class<S: AsRef<str>>(class_name: &str, field_names: &[S]) -> String {
    let mut cg = Codegen::new();
    cg.emit_class(&popo_class(class_name, field_names));
    cg.into_string()
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERER
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen {
    layout: Layout,
    out: String,
}

impl Codegen {
    pub fn new() -> Self { Self::with_layout(Layout::default()) }

    pub fn with_layout(layout: Layout) -> Self { Self { layout, out: String::new() } }

    pub fn into_string(self) -> String { self.out }

    /// Render a whole program; it always ends with one blank line.
    pub fn emit(&mut self, program: &Program) {
        for item in &program.items {
            match item {
                Item::Class(class) => self.emit_class(class),
                Item::Statement(stmt) => self.emit_statement(stmt, 0),
            }
        }
        self.blank();
    }

    pub fn emit_class(&mut self, class: &ClassDef) {
        self.comments(&class.comments, 0);
        self.line(0, &format!("class {}:", class.name));
        for method in &class.methods {
            self.emit_method(method);
        }
    }

    fn emit_method(&mut self, method: &MethodDef) {
        self.comments(&method.comments, 1);
        let mut sig = format!("def {}(self", method.name);
        for p in &method.params {
            sig.push_str(", ");
            sig.push_str(p);
        }
        sig.push_str("):");
        self.line(1, &sig);
        for stmt in &method.body {
            self.emit_statement(stmt, 2);
        }
        self.blank();
    }

    fn emit_statement(&mut self, stmt: &Statement, level: usize) {
        self.comments(&stmt.comments, level);
        let text = match &stmt.kind {
            StmtKind::Assign { target, value } => format!("{} = {}", render_expr(target), render_expr(value)),
            StmtKind::Return(expr) => format!("return {}", render_expr(expr)),
            StmtKind::Pass => "pass".to_string(),
        };
        self.line(level, &text);
    }

    fn comments(&mut self, lines: &[String], level: usize) {
        for c in lines {
            self.line(level, &format!("# {c}"));
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str(&self.layout.indent);
        }
        self.out.push_str(text);
        self.out.push_str(&self.layout.newline);
    }

    fn blank(&mut self) {
        self.out.push_str(&self.layout.newline);
    }
}

impl Default for Codegen {
    fn default() -> Self { Self::new() }
}

pub fn render_expr(expr: &Expr) -> String {
    let mut s = String::new();
    write_expr(&mut s, expr);
    s
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Name(n) => out.push_str(n),
        Expr::SelfAttr(field) => {
            let _ = write!(out, "self.{ATTRIBUTE_PREFIX}{field}");
        }
        Expr::Literal(p) => out.push_str(&python_literal(p)),
        Expr::Call { callee, kwargs } => {
            out.push_str(callee);
            out.push('(');
            for (i, (key, value)) in kwargs.iter().enumerate() {
                if i > 0 { out.push_str(", "); }
                out.push_str(key);
                out.push('=');
                write_expr(out, value);
            }
            out.push(')');
        }
        Expr::Compare { lhs, op, rhs } => {
            out.push('(');
            write_expr(out, lhs);
            let _ = write!(out, " {} ", op.symbol());
            write_expr(out, rhs);
            out.push(')');
        }
        Expr::And(terms) if terms.is_empty() => out.push_str("True"),
        Expr::And(terms) => {
            out.push('(');
            for (i, term) in terms.iter().enumerate() {
                if i > 0 { out.push_str(" and "); }
                write_expr(out, term);
            }
            out.push(')');
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::CompareOp;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn popo_class_text() {
        let src = emit_class("Point", &["x", "yValue"]);
        assert_eq!(src, indoc! {"
            class Point:
                def __init__(self, x, yValue):
                    self._x = x
                    self._yValue = yValue

                def getX(self):
                    return self._x

                def getYValue(self):
                    return self._yValue

        "});
    }

    #[test]
    fn empty_field_list_still_makes_a_valid_class() {
        let src = emit_class::<&str>("Empty", &[]);
        assert_eq!(src, "class Empty:\n    def __init__(self):\n        pass\n\n");
    }

    #[test]
    fn one_accessor_per_field_in_input_order() {
        let fields = ["c", "a", "b", "zed"];
        let class = popo_class("K", &fields);
        let accessors: Vec<&str> = class.methods.iter().skip(1).map(|m| m.name.as_str()).collect();
        assert_eq!(accessors, ["getC", "getA", "getB", "getZed"]);
        assert_eq!(class.methods[0].params, fields);
    }

    #[test]
    fn rendering_is_deterministic() {
        let fields = vec!["alpha".to_string(), "beta".to_string()];
        assert_eq!(emit_class("Same", &fields), emit_class("Same", &fields));
    }

    #[test]
    fn layout_is_configurable() {
        let mut cg = Codegen::with_layout(Layout { indent: "\t".into(), newline: "\r\n".into() });
        cg.emit_class(&popo_class("T", &["v"]));
        assert_eq!(
            cg.into_string(),
            "class T:\r\n\tdef __init__(self, v):\r\n\t\tself._v = v\r\n\r\n\tdef getV(self):\r\n\t\treturn self._v\r\n\r\n"
        );
    }

    #[test]
    fn expressions() {
        let cmp = Expr::And(vec![
            Expr::compare(Expr::name("x"), CompareOp::Ge, Expr::attr("lo")),
            Expr::compare(Expr::name("x"), CompareOp::Le, Expr::attr("hi")),
        ]);
        assert_eq!(render_expr(&cmp), "((x >= self._lo) and (x <= self._hi))");
        assert_eq!(render_expr(&Expr::And(vec![])), "True");

        let call = Expr::call("Box", [("srs", Expr::Literal("EPSG:4326".into())), ("n", Expr::attr("n"))]);
        assert_eq!(render_expr(&call), "Box(srs='EPSG:4326', n=self._n)");
        assert_eq!(render_expr(&Expr::call::<&str>("Nothing", [])), "Nothing()");
    }

    #[test]
    fn accessor_names() {
        assert_eq!(accessor_name("mgaZone"), "getMgaZone");
        assert_eq!(accessor_name("_hidden"), "get_hidden");
        assert_eq!(accessor_name("x"), "getX");
    }
}
