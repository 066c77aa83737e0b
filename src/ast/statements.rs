use super::{
    ast::Block,
    expressions::{CallExpr, Expr, FunctionBody},
};

/// Assignment to one or more names.
///
/// `x = e` and `local x = e` are the single-target case. With several
/// targets the values are matched to targets by position.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<String>,
    pub values: Vec<Expr>,
    pub is_local: bool,
}

impl AssignStmt {
    pub fn single(target: &str, value: Expr, is_local: bool) -> Self {
        AssignStmt {
            targets: vec![String::from(target)],
            values: vec![value],
            is_local,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclStmt {
    pub name: String,
    pub function: FunctionBody,
    pub is_local: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatUntilStmt {
    pub body: Block,
    pub condition: Expr,
}

/// `for var = start, end [, step] do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForNumericStmt {
    pub variable: String,
    pub start: Expr,
    pub end: Expr,
    pub step: Option<Expr>,
    pub body: Block,
}

impl ForNumericStmt {
    /// The step expression, or the constant `1` when it was omitted.
    pub fn step_or_default(&self) -> Expr {
        self.step.clone().unwrap_or(Expr::float(1.0))
    }
}

/// `for a, b in explist do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForGenericStmt {
    pub names: Vec<String>,
    pub expressions: Vec<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Block,
    pub elseif_clauses: Vec<ElseIfClause>,
    pub else_body: Option<Block>,
}

/// Statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    FunctionDecl(FunctionDeclStmt),
    While(WhileStmt),
    RepeatUntil(RepeatUntilStmt),
    ForNumeric(ForNumericStmt),
    ForGeneric(ForGenericStmt),
    If(IfStmt),
    Do(Block),
    Return(Vec<Expr>),
    Break,
    Call(CallExpr),
}
