//! Rewrites for virtual event declarations.
//!
//! Edits are plain byte ranges applied by [`ByteRangeRewriter`]; every applied
//! edit yields a freshly parsed [`crate::syntax::SyntaxTree`].

mod engine;
mod modifier;
mod resolver;
mod rewriter;
mod synth;

pub use engine::{
    code_action, list_fixes, CodeAction, DeclarationTarget, Fix, FixError, FixKind,
};
pub use modifier::{remove_modifier, remove_modifier_edit};
pub use resolver::{resolve_backing_identifier, ResolutionError};
pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
pub use synth::{build_raise_method, raise_method_name, RaiseMethod};
