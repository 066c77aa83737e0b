use std::fmt::Display;

use log::debug;
use thiserror::Error;

use crate::ast::types::LuaType;

/// Identifier of a scope. Ids are handed out by a counter and never reused
/// within one analysis run; the global scope is always `ScopeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a record in the symbol arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCategory {
    Variable,
    Function,
}

impl Display for SymbolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolCategory::Variable => write!(f, "variable"),
            SymbolCategory::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub category: SymbolCategory,
    pub ty: LuaType,
    /// Scope the symbol was declared in
    pub scope: ScopeId,
    pub is_local: bool,
    /// Declaration order across the whole run
    pub offset: usize,
    /// Parameter names; `None` for variables and for functions whose
    /// parameters are unknown (built-ins), which are never arity-checked.
    pub params: Option<Vec<String>>,
    pub is_variadic: bool,
}

impl Symbol {
    pub fn is_function(&self) -> bool {
        self.category == SymbolCategory::Function
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolTableError {
    #[error("cannot exit the global scope")]
    ScopeUnderflow,
    #[error("symbol '{name}' already declared in scope {scope}")]
    DuplicateSymbol { name: String, scope: ScopeId },
}

/// Arena of symbol records plus the stack of open scopes.
///
/// Records are never removed. Closing a scope only pops its id from the
/// stack, which hides the scope's records from [`SymbolTable::lookup`] while
/// keeping them addressable through [`SymbolTable::get`] and
/// [`SymbolTable::symbols`].
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scope_stack: Vec<ScopeId>,
    next_scope: usize,
    next_offset: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: Vec::new(),
            scope_stack: vec![ScopeId::GLOBAL],
            next_scope: 1,
            next_offset: 0,
        }
    }

    /// Back to the state of a fresh table: no symbols, only the global scope open.
    pub fn reset(&mut self) {
        *self = SymbolTable::new();
    }

    pub fn enter_scope(&mut self) -> ScopeId {
        let scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.scope_stack.push(scope);

        debug!("enter scope {} (depth {})", scope, self.scope_stack.len());
        scope
    }

    pub fn exit_scope(&mut self) -> Result<ScopeId, SymbolTableError> {
        if self.scope_stack.len() <= 1 {
            return Err(SymbolTableError::ScopeUnderflow);
        }

        let scope = self.scope_stack.pop().ok_or(SymbolTableError::ScopeUnderflow)?;
        debug!("exit scope {} (depth {})", scope, self.scope_stack.len());
        Ok(scope)
    }

    pub fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    pub fn scope_stack(&self) -> &[ScopeId] {
        &self.scope_stack
    }

    /// Declares `name` in the current scope.
    pub fn add_symbol(
        &mut self,
        name: &str,
        category: SymbolCategory,
        ty: LuaType,
        params: Option<Vec<String>>,
        is_variadic: bool,
        is_local: bool,
    ) -> Result<SymbolId, SymbolTableError> {
        let scope = self.current_scope();
        if self.lookup(name, true).is_some() {
            return Err(SymbolTableError::DuplicateSymbol {
                name: String::from(name),
                scope,
            });
        }

        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            name: String::from(name),
            category,
            ty,
            scope,
            is_local,
            offset: self.next_offset,
            params,
            is_variadic,
        });
        self.next_offset += 1;

        debug!("add {} '{}' in scope {}", category, name, scope);
        Ok(id)
    }

    /// Most recently declared visible record named `name`.
    ///
    /// With `current_scope_only` only records of the current scope match,
    /// otherwise any record whose scope is still on the stack.
    pub fn lookup_id(&self, name: &str, current_scope_only: bool) -> Option<SymbolId> {
        let current = self.current_scope();

        self.symbols
            .iter()
            .enumerate()
            .rev()
            .find(|(_, symbol)| {
                symbol.name == name
                    && if current_scope_only {
                        symbol.scope == current
                    } else {
                        self.scope_stack.contains(&symbol.scope)
                    }
            })
            .map(|(index, _)| SymbolId(index))
    }

    pub fn lookup(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        self.lookup_id(name, current_scope_only)
            .and_then(|id| self.get(id))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name, false).is_some()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    /// Updates the recorded type of an existing record in place.
    pub fn set_type(&mut self, id: SymbolId, ty: LuaType) {
        if let Some(symbol) = self.symbols.get_mut(id.0) {
            symbol.ty = ty;
        }
    }

    /// Every record ever declared, in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<20} {:<10} {:<10} {:>5} {:>6} {:>6}  {}",
            "name", "category", "type", "scope", "local", "offset", "params"
        )?;

        for symbol in &self.symbols {
            let params = match &symbol.params {
                Some(params) if symbol.is_variadic => {
                    let mut params = params.clone();
                    params.push(String::from("..."));
                    params.join(", ")
                }
                Some(params) => params.join(", "),
                None => String::from("-"),
            };

            writeln!(
                f,
                "{:<20} {:<10} {:<10} {:>5} {:>6} {:>6}  {}",
                symbol.name,
                symbol.category.to_string(),
                symbol.ty.to_string(),
                symbol.scope.0,
                symbol.is_local,
                symbol.offset,
                params
            )?;
        }

        Ok(())
    }
}
