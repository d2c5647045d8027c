// Structured IR for the emitted Python program. Layout lives in `codegen` only.

use crate::model::Primitive;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Class(ClassDef),
    Statement(Statement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub comments: Vec<String>,
    pub name: String,
    pub methods: Vec<MethodDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub comments: Vec<String>,
    pub name: String,
    pub params: Vec<String>, // `self` is implied
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub comments: Vec<String>,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Assign { target: Expr, value: Expr },
    Return(Expr),
    Pass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(String),
    /// `self.<prefix><field>`; the prefix is applied by the renderer
    SelfAttr(String),
    Literal(Primitive),
    Call { callee: String, kwargs: Vec<(String, Expr)> },
    Compare { lhs: Box<Expr>, op: CompareOp, rhs: Box<Expr> },
    And(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Ge,
    Le,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        }
    }
}

// small constructors, keeps the assembler readable

impl Statement {
    pub fn new(kind: StmtKind) -> Self { Self { comments: Vec::new(), kind } }
    pub fn ret(expr: Expr) -> Self { Self::new(StmtKind::Return(expr)) }
    pub fn assign(target: Expr, value: Expr) -> Self { Self::new(StmtKind::Assign { target, value }) }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }
}

impl MethodDef {
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }
}

impl ClassDef {
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

impl Expr {
    pub fn name(s: impl Into<String>) -> Self { Expr::Name(s.into()) }
    pub fn attr(field: impl Into<String>) -> Self { Expr::SelfAttr(field.into()) }

    pub fn call<K: Into<String>>(callee: impl Into<String>, kwargs: impl IntoIterator<Item = (K, Expr)>) -> Self {
        Expr::Call {
            callee: callee.into(),
            kwargs: kwargs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn compare(lhs: Expr, op: CompareOp, rhs: Expr) -> Self {
        Expr::Compare { lhs: Box::new(lhs), op, rhs: Box::new(rhs) }
    }
}
