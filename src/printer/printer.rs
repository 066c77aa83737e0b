use crate::ast::{
    ast::{Block, Visitor},
    expressions::{CallExpr, Callee, Expr, FunctionBody, NumberLiteral, TableField},
    statements::{ForNumericStmt, IfStmt, Stmt},
};

const INDENT: &str = "    ";

/// Regenerates source text from a tree.
///
/// Operator expressions are fully parenthesised, so parsing the output
/// yields the tree that was printed.
pub struct Printer {
    depth: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Printer { depth: 0 }
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.depth)
    }

    /// Prints `block` one level deeper, one statement per line.
    fn nested(&mut self, block: &Block) -> String {
        self.depth += 1;
        let output = block.accept(self);
        self.depth -= 1;
        output
    }

    fn list(&mut self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|expr| expr.accept(self))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Prefix expressions print bare; anything else needs parentheses
    /// before it can be called or indexed.
    fn prefix(&mut self, expr: &Expr) -> String {
        let output = expr.accept(self);
        match expr {
            Expr::Var(_) | Expr::Index { .. } | Expr::Call(_) => output,
            _ => format!("({})", output),
        }
    }

    fn call(&mut self, call: &CallExpr) -> String {
        let callee = match &call.callee {
            Callee::Name(name) => name.clone(),
            Callee::Expr(expr) => self.prefix(expr),
            Callee::Method { object, method } => format!("{}:{}", self.prefix(object), method),
        };

        format!("{}({})", callee, self.list(&call.arguments))
    }

    fn function_body(&mut self, function: &FunctionBody) -> String {
        let mut parameters = function.parameters.clone();
        if function.is_variadic {
            parameters.push(String::from("..."));
        }

        format!(
            "({})\n{}{}end",
            parameters.join(", "),
            self.nested(&function.body),
            self.indent()
        )
    }

    fn table(&mut self, fields: &[TableField]) -> String {
        if fields.is_empty() {
            return String::from("{}");
        }

        let fields = fields
            .iter()
            .map(|field| match field {
                TableField::Positional(value) => value.accept(self),
                TableField::Named(name, value) => format!("{} = {}", name, value.accept(self)),
                TableField::Keyed(key, value) => {
                    format!("[{}] = {}", key.accept(self), value.accept(self))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("{{ {} }}", fields)
    }

    fn if_stmt(&mut self, stmt: &IfStmt) -> String {
        let indent = self.indent();
        let mut output = format!(
            "if {} then\n{}",
            stmt.condition.accept(self),
            self.nested(&stmt.then_body)
        );

        for clause in &stmt.elseif_clauses {
            output += &format!(
                "{}elseif {} then\n{}",
                indent,
                clause.condition.accept(self),
                self.nested(&clause.body)
            );
        }

        if let Some(else_body) = &stmt.else_body {
            output += &format!("{}else\n{}", indent, self.nested(else_body));
        }

        output + &indent + "end"
    }

    fn for_numeric(&mut self, stmt: &ForNumericStmt) -> String {
        let mut control = format!(
            "{} = {}, {}",
            stmt.variable,
            stmt.start.accept(self),
            stmt.end.accept(self)
        );
        if let Some(step) = &stmt.step {
            control += &format!(", {}", step.accept(self));
        }

        format!("for {} do\n{}{}end", control, self.nested(&stmt.body), self.indent())
    }
}

/// Escapes a string value as a double-quoted literal.
fn quote(value: &str) -> String {
    let mut output = String::from("\"");

    for ch in value.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\r' => output.push_str("\\r"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                output.push_str(&format!("\\{:03}", c as u32));
            }
            c => output.push(c),
        }
    }

    output.push('"');
    output
}

impl Visitor for Printer {
    type Output = String;

    fn visit_block(&mut self, block: &Block) -> String {
        let indent = self.indent();
        block
            .iter()
            .map(|stmt| {
                let line = stmt.accept(self);
                // Keep a leading `(` from continuing the previous statement
                if line.starts_with('(') {
                    format!("{};{}\n", indent, line)
                } else {
                    format!("{}{}\n", indent, line)
                }
            })
            .collect()
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Assign(assign) => {
                let prefix = if assign.is_local { "local " } else { "" };
                let targets = assign.targets.join(", ");
                if assign.values.is_empty() {
                    format!("{}{}", prefix, targets)
                } else {
                    format!("{}{} = {}", prefix, targets, self.list(&assign.values))
                }
            }
            Stmt::FunctionDecl(decl) => {
                let prefix = if decl.is_local { "local " } else { "" };
                format!("{}function {}{}", prefix, decl.name, self.function_body(&decl.function))
            }
            Stmt::While(stmt) => format!(
                "while {} do\n{}{}end",
                stmt.condition.accept(self),
                self.nested(&stmt.body),
                self.indent()
            ),
            Stmt::RepeatUntil(stmt) => format!(
                "repeat\n{}{}until {}",
                self.nested(&stmt.body),
                self.indent(),
                stmt.condition.accept(self)
            ),
            Stmt::ForNumeric(stmt) => self.for_numeric(stmt),
            Stmt::ForGeneric(stmt) => format!(
                "for {} in {} do\n{}{}end",
                stmt.names.join(", "),
                self.list(&stmt.expressions),
                self.nested(&stmt.body),
                self.indent()
            ),
            Stmt::If(stmt) => self.if_stmt(stmt),
            Stmt::Do(body) => format!("do\n{}{}end", self.nested(body), self.indent()),
            Stmt::Return(values) if values.is_empty() => String::from("return"),
            Stmt::Return(values) => format!("return {}", self.list(values)),
            Stmt::Break => String::from("break"),
            Stmt::Call(call) => self.call(call),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Number(NumberLiteral::Integer(value)) => format!("0x{:X}", value),
            // Overflowing decimal literals lex as infinity
            Expr::Number(NumberLiteral::Float(value)) if *value == f64::INFINITY => {
                String::from("1e999")
            }
            Expr::Number(NumberLiteral::Float(value)) => format!("{:?}", value),
            Expr::String(value) => quote(value),
            Expr::Boolean(value) => value.to_string(),
            Expr::Nil => String::from("nil"),
            Expr::Vararg => String::from("..."),
            Expr::Var(name) => name.clone(),
            Expr::Unary { operator, operand } => {
                format!("({}{})", operator.symbol(), operand.accept(self))
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => format!("({} {} {})", left.accept(self), operator, right.accept(self)),
            Expr::Concat { left, right } => {
                format!("({} .. {})", left.accept(self), right.accept(self))
            }
            Expr::Call(call) => self.call(call),
            Expr::Index { object, key } => {
                format!("{}[{}]", self.prefix(object), key.accept(self))
            }
            Expr::Function(function) => format!("function{}", self.function_body(function)),
            Expr::Table(fields) => self.table(fields),
        }
    }
}

/// Regenerates source text for a whole program.
pub fn print_block(block: &Block) -> String {
    Printer::new().visit_block(block)
}
