use std::slice::Iter;

use super::{expressions::Expr, statements::Stmt};

/// An ordered statement sequence. Source order is execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block { statements }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_block(self)
    }
}

impl Stmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_stmt(self)
    }
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_expr(self)
    }
}

/// Visitor Trait
///
/// Implemented by every consumer of the tree (analyzer, printer). Each
/// implementation matches exhaustively on [`Stmt`] and [`Expr`], so adding a
/// node variant fails to compile until every consumer handles it.
pub trait Visitor {
    type Output;

    fn visit_block(&mut self, block: &Block) -> Self::Output;
    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::Output;
    fn visit_expr(&mut self, expr: &Expr) -> Self::Output;
}
