/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Blocks and the visitor trait
/// - expressions: Expression nodes, operators and literals
/// - statements: Statement nodes
/// - types: Inferred value types used by semantic analysis
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
