//! Source regeneration from the AST, the second consumer of the visitor trait.
pub mod printer;

#[cfg(test)]
mod tests;
