//! Immutable, lossless syntax tree.
//!
//! Every token carries the trivia (whitespace, comments, preprocessor lines)
//! that precedes it, so concatenating the leaves reproduces the file. Trees are
//! never mutated: [`SyntaxTree::with_edits`] applies byte-range edits to the
//! source and parses the result into a new tree. Node references obtained from
//! the old tree are stale after that and have to be looked up again by offset.

use super::kind::SyntaxKind;
use super::{lexer, parser};
use crate::fix::{ByteRangeRewriter, Edit, RewriteError};
use crate::utils::LineIndex;
use compact_str::CompactString;
use text_size::{TextRange, TextSize};

/// A leaf of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    text: CompactString,
    leading_trivia: CompactString,
    range: TextRange,
}

impl SyntaxToken {
    /// Creates a token. `range` covers `text` only, not the trivia.
    #[must_use]
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<CompactString>,
        leading_trivia: impl Into<CompactString>,
        range: TextRange,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            leading_trivia: leading_trivia.into(),
            range,
        }
    }

    /// Token kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Token text without trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Trivia between the previous token and this one.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        &self.leading_trivia
    }

    /// Byte range of the token text.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.range
    }
}

/// A node or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    /// Inner node.
    Node(SyntaxNode),
    /// Leaf token.
    Token(SyntaxToken),
}

impl SyntaxElement {
    /// Kind of the wrapped node or token.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// Range of the wrapped node or token.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        match self {
            Self::Node(node) => node.text_range(),
            Self::Token(token) => token.text_range(),
        }
    }

    /// The wrapped node, if any.
    #[must_use]
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// The wrapped token, if any.
    #[must_use]
    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}

/// An inner node. Its range spans from its first to its last token, trivia excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    range: TextRange,
    children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    /// Creates a node. An empty node is placed at `fallback`.
    #[must_use]
    pub fn new(kind: SyntaxKind, children: Vec<SyntaxElement>, fallback: TextSize) -> Self {
        let range = match (children.first(), children.last()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.text_range().start(), last.text_range().end())
            }
            _ => TextRange::empty(fallback),
        };
        Self {
            kind,
            range,
            children,
        }
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Byte range from the first token start to the last token end.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.range
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    /// Direct child nodes.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// Direct child tokens.
    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    /// First direct child node of the given kind.
    #[must_use]
    pub fn child_node(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|node| node.kind == kind)
    }

    /// First direct child token of the given kind.
    #[must_use]
    pub fn child_token(&self, kind: SyntaxKind) -> Option<&SyntaxToken> {
        self.child_tokens().find(|token| token.kind == kind)
    }

    /// All tokens below this node, in source order.
    #[must_use]
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a SyntaxToken>) {
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.collect_tokens(out),
                SyntaxElement::Token(token) => out.push(token),
            }
        }
    }

    /// Source text of the node without its leading trivia.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, token) in self.tokens().into_iter().enumerate() {
            if i > 0 {
                text.push_str(token.leading_trivia());
            }
            text.push_str(token.text());
        }
        text
    }

    /// All nodes below this node (self included), pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut out = vec![self];
        let mut i = 0;
        while i < out.len() {
            let node = out[i];
            out.extend(node.child_nodes());
            i += 1;
        }
        out.sort_by_key(|node| (node.range.start(), std::cmp::Reverse(node.range.end())));
        out
    }

    /// Path from this node down to the deepest node whose range contains `offset`.
    ///
    /// The first element is `self` when `self` contains the offset.
    #[must_use]
    pub fn covering_path(&self, offset: TextSize) -> Vec<&SyntaxNode> {
        let mut path = Vec::new();
        if !self.range.contains_inclusive(offset) {
            return path;
        }
        let mut current = self;
        path.push(current);
        while let Some(next) = current
            .child_nodes()
            .find(|child| child.range.contains(offset))
        {
            path.push(next);
            current = next;
        }
        path
    }
}

/// A parsed source file. Owns its text and its root node.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    root: SyntaxNode,
    line_index: LineIndex,
}

impl SyntaxTree {
    /// Parses `source`. Parsing never fails; unknown text ends up in opaque nodes.
    #[must_use]
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = lexer::tokenize(&source);
        let root = parser::parse(tokens, TextSize::of(source.as_str()));
        let line_index = LineIndex::new(&source);
        Self {
            source,
            root,
            line_index,
        }
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root `CompilationUnit` node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Offset to line/column mapping for this source.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Source text covered by `range`.
    #[must_use]
    pub fn slice(&self, range: TextRange) -> &str {
        &self.source[range]
    }

    /// Deepest-first ancestors of the token at `offset` that satisfy `pred`.
    #[must_use]
    pub fn find_ancestor(
        &self,
        offset: TextSize,
        pred: impl Fn(&SyntaxNode) -> bool,
    ) -> Option<&SyntaxNode> {
        self.root
            .covering_path(offset)
            .into_iter()
            .rev()
            .find(|node| pred(node))
    }

    /// Applies `edits` to the source and parses the result into a new tree.
    ///
    /// # Errors
    /// Returns an error if edits overlap or fall outside the source.
    pub fn with_edits(&self, edits: impl IntoIterator<Item = Edit>) -> Result<Self, RewriteError> {
        let mut rewriter = ByteRangeRewriter::new(self.source.as_str());
        rewriter.add_edits(edits);
        Ok(Self::parse(rewriter.apply()?))
    }

    /// Newline sequence used by this file (`\r\n` if the first line break is CRLF).
    #[must_use]
    pub fn newline(&self) -> &'static str {
        match self.source.find('\n') {
            Some(i) if i > 0 && self.source.as_bytes()[i - 1] == b'\r' => "\r\n",
            _ => "\n",
        }
    }

    /// Whitespace from the start of the line containing `offset` up to the first
    /// non-blank character of that line.
    #[must_use]
    pub fn line_indent(&self, offset: TextSize) -> &str {
        let offset = usize::from(offset).min(self.source.len());
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &self.source[line_start..];
        let width = line
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(line.len());
        &line[..width]
    }
}
