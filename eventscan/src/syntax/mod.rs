//! C# front end: lexer, parser and the immutable syntax tree.

mod kind;
mod lexer;
mod parser;
mod tree;

pub use kind::SyntaxKind;
pub use lexer::tokenize;
pub use tree::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
