//! Semantic analysis over a parsed program.
//!
//! The analyzer walks the tree once, in source order, tracking scopes in a
//! [`SymbolTable`]. It never stops early: every finding is recorded as a
//! [`Diagnostic`] and the walk continues into every child node, so one run
//! surfaces as many problems as possible.

use std::mem;

use log::{debug, info, trace};

use crate::ast::{
    ast::{Block, Visitor},
    expressions::{BinaryOperator, CallExpr, Callee, Expr, UnaryOperator},
    statements::{AssignStmt, ForGenericStmt, ForNumericStmt, FunctionDeclStmt, IfStmt, Stmt},
    types::LuaType,
};

use super::{
    diagnostics::{Diagnostic, DiagnosticKind, ForPart, OperandSide},
    symbol_table::{SymbolCategory, SymbolTable, SymbolTableError},
};

const DEFAULT_BUILTINS: [&str; 16] = [
    "print",
    "type",
    "tostring",
    "tonumber",
    "pairs",
    "ipairs",
    "pcall",
    "error",
    "assert",
    "require",
    "unpack",
    "select",
    "rawget",
    "rawset",
    "setmetatable",
    "getmetatable",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    /// Names registered as global functions before the walk. Their parameter
    /// lists are unknown, so calls to them are never arity-checked.
    pub builtins: Vec<String>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            builtins: DEFAULT_BUILTINS.iter().map(|name| String::from(*name)).collect(),
        }
    }
}

impl AnalyzerOptions {
    pub fn with_builtins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtins.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    /// The symbol table as it stood at the end of the walk
    pub symbols: SymbolTable,
}

impl AnalysisResult {
    /// A unit passes when it has no errors; warnings never fail it.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

pub struct Analyzer {
    options: AnalyzerOptions,
    symbols: SymbolTable,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(AnalyzerOptions::default())
    }
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Analyzer {
            options,
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Analyzes `program` from a clean state. Running twice over the same
    /// tree gives identical results.
    pub fn analyze(&mut self, program: &Block) -> AnalysisResult {
        self.symbols.reset();
        self.errors.clear();
        self.warnings.clear();
        self.register_builtins();

        program.accept(self);

        info!(
            "analysis finished: {} error(s), {} warning(s), {} symbol(s)",
            self.errors.len(),
            self.warnings.len(),
            self.symbols.symbols().len()
        );

        AnalysisResult {
            errors: mem::take(&mut self.errors),
            warnings: mem::take(&mut self.warnings),
            symbols: self.symbols.clone(),
        }
    }

    fn register_builtins(&mut self) {
        for name in &self.options.builtins {
            let added = self.symbols.add_symbol(
                name,
                SymbolCategory::Function,
                LuaType::Function,
                None,
                false,
                false,
            );

            if let Err(error) = added {
                debug!("skipping built-in: {}", error);
            }
        }
    }

    fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(kind);
        trace!("{}", diagnostic);

        if diagnostic.is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    fn report_symbol_error(&mut self, error: SymbolTableError) {
        self.report(DiagnosticKind::from(error));
    }

    fn enter_scope(&mut self) {
        self.symbols.enter_scope();
    }

    fn exit_scope(&mut self) {
        if let Err(error) = self.symbols.exit_scope() {
            self.report_symbol_error(error);
        }
    }

    fn declare_variable(&mut self, name: &str, ty: LuaType) {
        if let Err(error) =
            self.symbols
                .add_symbol(name, SymbolCategory::Variable, ty, None, false, true)
        {
            self.report_symbol_error(error);
        }
    }

    /// Updates a visible symbol's type, or implicitly declares a new local.
    fn assign(&mut self, name: &str, ty: LuaType) {
        match self.symbols.lookup_id(name, false) {
            Some(id) => self.symbols.set_type(id, ty),
            None => self.declare_variable(name, ty),
        }
    }

    /// Visits `block` inside a fresh scope.
    fn visit_scoped(&mut self, block: &Block) {
        self.enter_scope();
        block.accept(self);
        self.exit_scope();
    }

    fn visit_assign(&mut self, stmt: &AssignStmt) {
        let types: Vec<LuaType> = stmt.values.iter().map(|value| value.accept(self)).collect();

        // Surplus targets get nil, unless the last value may expand to several
        let surplus = match stmt.values.last() {
            Some(value) if value.is_multi_valued() => LuaType::Unknown,
            _ => LuaType::Nil,
        };

        for (index, target) in stmt.targets.iter().enumerate() {
            let ty = types.get(index).copied().unwrap_or(surplus);
            self.assign(target, ty);
        }
    }

    fn visit_function_decl(&mut self, stmt: &FunctionDeclStmt) {
        let function = &stmt.function;

        if let Err(error) = self.symbols.add_symbol(
            &stmt.name,
            SymbolCategory::Function,
            LuaType::Function,
            Some(function.parameters.clone()),
            function.is_variadic,
            stmt.is_local,
        ) {
            self.report_symbol_error(error);
        }

        self.enter_scope();
        for parameter in &function.parameters {
            self.declare_variable(parameter, LuaType::Unknown);
        }
        function.body.accept(self);
        self.exit_scope();
    }

    fn check_for_control(&mut self, part: ForPart, expr: &Expr) {
        let ty = expr.accept(self);
        if ty.is_concrete() && ty != LuaType::Number {
            self.report(DiagnosticKind::ForControlType { part, found: ty });
        }
    }

    fn visit_for_numeric(&mut self, stmt: &ForNumericStmt) {
        self.enter_scope();
        self.declare_variable(&stmt.variable, LuaType::Number);

        self.check_for_control(ForPart::Start, &stmt.start);
        self.check_for_control(ForPart::End, &stmt.end);
        if let Some(step) = &stmt.step {
            self.check_for_control(ForPart::Step, step);
        }

        stmt.body.accept(self);
        self.exit_scope();
    }

    fn visit_for_generic(&mut self, stmt: &ForGenericStmt) {
        for expr in &stmt.expressions {
            expr.accept(self);
        }

        self.enter_scope();
        for name in &stmt.names {
            self.declare_variable(name, LuaType::Unknown);
        }
        stmt.body.accept(self);
        self.exit_scope();
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        stmt.condition.accept(self);
        self.visit_scoped(&stmt.then_body);

        for clause in &stmt.elseif_clauses {
            clause.condition.accept(self);
            self.visit_scoped(&clause.body);
        }

        if let Some(else_body) = &stmt.else_body {
            self.visit_scoped(else_body);
        }
    }

    fn visit_call(&mut self, call: &CallExpr) -> LuaType {
        match &call.callee {
            Callee::Name(name) => self.check_callee(name, call.arguments.len()),
            Callee::Expr(callee) => {
                callee.accept(self);
            }
            Callee::Method { object, .. } => {
                object.accept(self);
            }
        }

        for argument in &call.arguments {
            argument.accept(self);
        }

        LuaType::Unknown
    }

    fn check_callee(&mut self, name: &str, received: usize) {
        let Some(symbol) = self.symbols.lookup(name, false) else {
            self.report(DiagnosticKind::UndeclaredFunction {
                name: String::from(name),
            });
            return;
        };

        let is_function = symbol.is_function();
        let arity = symbol
            .params
            .as_ref()
            .map(|params| (params.len(), symbol.is_variadic));

        if !is_function {
            self.report(DiagnosticKind::NotAFunction {
                name: String::from(name),
            });
        }

        if let Some((expected, is_variadic)) = arity {
            let mismatch = if is_variadic {
                received < expected
            } else {
                received != expected
            };

            if mismatch {
                self.report(DiagnosticKind::ArityMismatch {
                    name: String::from(name),
                    expected,
                    received,
                });
            }
        }
    }

    fn visit_unary(&mut self, operator: UnaryOperator, operand: &Expr) -> LuaType {
        let ty = operand.accept(self);

        match operator {
            UnaryOperator::Negate => {
                if ty.is_concrete() && ty != LuaType::Number {
                    self.report(DiagnosticKind::NegateOperand { found: ty });
                }
                LuaType::Number
            }
            UnaryOperator::Not => LuaType::Boolean,
            UnaryOperator::Length => LuaType::Unknown,
        }
    }

    fn check_arithmetic_operand(&mut self, operator: BinaryOperator, side: OperandSide, ty: LuaType) {
        if ty.is_concrete() && ty != LuaType::Number && ty != LuaType::Nil {
            self.report(DiagnosticKind::ArithmeticOperand {
                operator,
                side,
                found: ty,
            });
        }
    }

    fn visit_binary(&mut self, operator: BinaryOperator, left: &Expr, right: &Expr) -> LuaType {
        let left_ty = left.accept(self);
        let right_ty = right.accept(self);

        if operator.is_arithmetic() {
            self.check_arithmetic_operand(operator, OperandSide::Left, left_ty);
            self.check_arithmetic_operand(operator, OperandSide::Right, right_ty);
            LuaType::Number
        } else if operator.is_relational() {
            LuaType::Boolean
        } else {
            // `and` / `or` evaluate to one of their operands
            left_ty
        }
    }
}

impl Visitor for Analyzer {
    type Output = LuaType;

    fn visit_block(&mut self, block: &Block) -> LuaType {
        for stmt in block.iter() {
            stmt.accept(self);
        }
        LuaType::Unknown
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> LuaType {
        match stmt {
            Stmt::Assign(assign) => self.visit_assign(assign),
            Stmt::FunctionDecl(decl) => self.visit_function_decl(decl),
            Stmt::While(stmt) => {
                stmt.condition.accept(self);
                self.visit_scoped(&stmt.body);
            }
            Stmt::RepeatUntil(stmt) => {
                self.visit_scoped(&stmt.body);
                stmt.condition.accept(self);
            }
            Stmt::ForNumeric(stmt) => self.visit_for_numeric(stmt),
            Stmt::ForGeneric(stmt) => self.visit_for_generic(stmt),
            Stmt::If(stmt) => self.visit_if(stmt),
            Stmt::Do(body) => self.visit_scoped(body),
            Stmt::Return(values) => {
                let types: Vec<LuaType> = values.iter().map(|value| value.accept(self)).collect();
                return types.first().copied().unwrap_or(LuaType::Nil);
            }
            Stmt::Break => {}
            Stmt::Call(call) => {
                self.visit_call(call);
            }
        }

        LuaType::Unknown
    }

    fn visit_expr(&mut self, expr: &Expr) -> LuaType {
        match expr {
            Expr::Number(_) => LuaType::Number,
            Expr::String(_) => LuaType::String,
            Expr::Boolean(_) => LuaType::Boolean,
            Expr::Nil => LuaType::Nil,
            Expr::Vararg => LuaType::Unknown,
            Expr::Var(name) => match self.symbols.lookup(name, false).map(|symbol| symbol.ty) {
                Some(ty) => ty,
                None => {
                    self.report(DiagnosticKind::UndeclaredVariable { name: name.clone() });
                    LuaType::Unknown
                }
            },
            Expr::Unary { operator, operand } => self.visit_unary(*operator, operand),
            Expr::Binary {
                operator,
                left,
                right,
            } => self.visit_binary(*operator, left, right),
            Expr::Concat { left, right } => {
                left.accept(self);
                right.accept(self);
                LuaType::Unknown
            }
            Expr::Call(call) => self.visit_call(call),
            Expr::Index { object, key } => {
                object.accept(self);
                key.accept(self);
                LuaType::Unknown
            }
            Expr::Function(_) => LuaType::Function,
            Expr::Table(_) => LuaType::Table,
        }
    }
}

/// Analyzes `program` with the default built-ins.
pub fn analyze(program: &Block) -> AnalysisResult {
    Analyzer::default().analyze(program)
}
