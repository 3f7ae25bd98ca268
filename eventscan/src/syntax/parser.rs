//! Error-tolerant recursive-descent parser for the member-level C# grammar.
//!
//! Declarations are parsed precisely down to event accessors and method bodies.
//! Everything else (properties, constructors, control flow, ...) is kept as
//! opaque `OtherMember`/`OtherStatement` nodes so the tree stays lossless.

use super::kind::SyntaxKind;
use super::tree::{SyntaxElement, SyntaxNode, SyntaxToken};
use text_size::TextSize;

type Children = Vec<SyntaxElement>;

/// Contextual keywords accepted in a modifier list.
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file"];

/// Contextual keywords allowed before a parameter's type.
const PARAMETER_MODIFIERS: &[&str] = &["ref", "out", "in", "params", "scoped"];

/// Statement keywords whose statements are kept opaque.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "try", "catch", "finally", "lock",
    "fixed", "checked", "unchecked", "goto", "break", "continue", "throw", "yield", "case",
    "default",
];

/// Parses a token stream into a `CompilationUnit` node.
#[must_use]
pub fn parse(tokens: Vec<SyntaxToken>, eof: TextSize) -> SyntaxNode {
    let mut parser = Parser {
        tokens,
        pos: 0,
        eof,
    };
    let mut children = Vec::new();
    while !parser.at_eof() {
        parser.namespace_member(&mut children);
    }
    parser.node(SyntaxKind::CompilationUnit, children)
}

struct Parser {
    tokens: Vec<SyntaxToken>,
    pos: usize,
    eof: TextSize,
}

impl Parser {
    fn nth_kind(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(SyntaxToken::kind)
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.nth_kind(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth_is_ident(&self, n: usize, texts: &[&str]) -> bool {
        self.tokens
            .get(self.pos + n)
            .is_some_and(|t| t.kind() == SyntaxKind::Ident && texts.contains(&t.text()))
    }

    fn offset(&self) -> TextSize {
        self.tokens
            .get(self.pos)
            .map_or(self.eof, |t| t.text_range().start())
    }

    fn node(&self, kind: SyntaxKind, children: Children) -> SyntaxNode {
        SyntaxNode::new(kind, children, self.offset())
    }

    fn bump(&mut self, out: &mut Children) {
        if let Some(token) = self.tokens.get(self.pos) {
            out.push(SyntaxElement::Token(token.clone()));
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind, out: &mut Children) -> bool {
        if self.at(kind) {
            self.bump(out);
            true
        } else {
            false
        }
    }

    /// Consumes an opening bracket through its matching close (or EOF).
    fn bump_balanced(&mut self, out: &mut Children) {
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LBrace | SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
                SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::RBracket => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump(out);
            if depth == 0 {
                break;
            }
        }
    }

    // Declarations

    fn namespace_member(&mut self, out: &mut Children) {
        match self.current() {
            Some(SyntaxKind::UsingKw) if self.nth_kind(1) != Some(SyntaxKind::LParen) => {
                let mut children = Vec::new();
                while let Some(kind) = self.current() {
                    self.bump(&mut children);
                    if kind == SyntaxKind::Semicolon {
                        break;
                    }
                }
                out.push(SyntaxElement::Node(
                    self.node(SyntaxKind::UsingDirective, children),
                ));
            }
            Some(SyntaxKind::NamespaceKw) => self.namespace_declaration(out),
            Some(SyntaxKind::RBrace) => {
                let mut children = Vec::new();
                self.bump(&mut children);
                out.push(SyntaxElement::Node(self.node(SyntaxKind::ErrorNode, children)));
            }
            _ => self.member(out),
        }
    }

    fn namespace_declaration(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump(&mut children);
        while matches!(
            self.current(),
            Some(SyntaxKind::Ident | SyntaxKind::Dot | SyntaxKind::ColonColon)
        ) {
            self.bump(&mut children);
        }
        if self.eat(SyntaxKind::Semicolon, &mut children) {
            while !self.at_eof() {
                self.namespace_member(&mut children);
            }
        } else if self.eat(SyntaxKind::LBrace, &mut children) {
            while !self.at_eof() && !self.at(SyntaxKind::RBrace) {
                self.namespace_member(&mut children);
            }
            self.eat(SyntaxKind::RBrace, &mut children);
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::NamespaceDeclaration, children),
        ));
    }

    fn member(&mut self, out: &mut Children) {
        let start = self.pos;
        let mut children = Vec::new();
        while self.at(SyntaxKind::LBracket) {
            self.attribute_list(&mut children);
        }
        self.modifier_list(&mut children);

        match self.current() {
            Some(SyntaxKind::EventKw) => self.event_member(children, out),
            Some(
                SyntaxKind::ClassKw
                | SyntaxKind::StructKw
                | SyntaxKind::InterfaceKw
                | SyntaxKind::EnumKw,
            ) => self.type_declaration(children, out),
            Some(SyntaxKind::Ident) if self.at_record_declaration() => {
                self.type_declaration(children, out);
            }
            Some(SyntaxKind::NamespaceKw) if children.is_empty() => {
                self.namespace_declaration(out);
            }
            _ => {
                if self.try_method(&mut children) {
                    out.push(SyntaxElement::Node(
                        self.node(SyntaxKind::MethodDeclaration, children),
                    ));
                    return;
                }
                self.other_member(&mut children);
                if self.pos == start {
                    self.bump(&mut children);
                }
                out.push(SyntaxElement::Node(
                    self.node(SyntaxKind::OtherMember, children),
                ));
            }
        }
    }

    fn at_record_declaration(&self) -> bool {
        self.nth_is_ident(0, &["record"])
            && matches!(
                self.nth_kind(1),
                Some(SyntaxKind::Ident | SyntaxKind::ClassKw | SyntaxKind::StructKw)
            )
    }

    fn attribute_list(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump_balanced(&mut children);
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::AttributeList, children),
        ));
    }

    fn modifier_list(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        loop {
            let Some(kind) = self.current() else { break };
            let contextual = self.nth_is_ident(0, CONTEXTUAL_MODIFIERS)
                && self.nth_kind(1).is_some_and(|next| {
                    next == SyntaxKind::Ident || next.keyword_text().is_some()
                });
            if kind.is_modifier_keyword() || contextual {
                self.bump(&mut children);
            } else {
                break;
            }
        }
        if !children.is_empty() {
            out.push(SyntaxElement::Node(
                self.node(SyntaxKind::ModifierList, children),
            ));
        }
    }

    fn type_declaration(&mut self, mut children: Children, out: &mut Children) {
        let kind = match self.current() {
            Some(SyntaxKind::ClassKw) => SyntaxKind::ClassDeclaration,
            Some(SyntaxKind::StructKw) => SyntaxKind::StructDeclaration,
            Some(SyntaxKind::InterfaceKw) => SyntaxKind::InterfaceDeclaration,
            Some(SyntaxKind::EnumKw) => SyntaxKind::EnumDeclaration,
            _ => SyntaxKind::RecordDeclaration,
        };
        self.bump(&mut children);
        if kind == SyntaxKind::RecordDeclaration
            && matches!(
                self.current(),
                Some(SyntaxKind::ClassKw | SyntaxKind::StructKw)
            )
        {
            self.bump(&mut children);
        }

        // Name, type parameters, primary constructor, base list, constraints.
        loop {
            match self.current() {
                None | Some(SyntaxKind::LBrace | SyntaxKind::Semicolon | SyntaxKind::RBrace) => {
                    break
                }
                Some(SyntaxKind::LParen | SyntaxKind::LBracket) => {
                    self.bump_balanced(&mut children);
                }
                Some(_) => self.bump(&mut children),
            }
        }

        if self.at(SyntaxKind::LBrace) {
            if kind == SyntaxKind::EnumDeclaration {
                self.bump_balanced(&mut children);
            } else {
                self.bump(&mut children);
                while !self.at_eof() && !self.at(SyntaxKind::RBrace) {
                    self.member(&mut children);
                }
                self.eat(SyntaxKind::RBrace, &mut children);
            }
        }
        self.eat(SyntaxKind::Semicolon, &mut children);
        out.push(SyntaxElement::Node(self.node(kind, children)));
    }

    fn event_member(&mut self, mut children: Children, out: &mut Children) {
        self.bump(&mut children);
        let Some(ty) = self.parse_type() else {
            self.other_member(&mut children);
            out.push(SyntaxElement::Node(
                self.node(SyntaxKind::OtherMember, children),
            ));
            return;
        };

        let mut last = 0;
        while self.nth_kind(last) == Some(SyntaxKind::Ident)
            && self.nth_kind(last + 1) == Some(SyntaxKind::Dot)
        {
            last += 2;
        }
        let accessor_like = self.nth_kind(last) == Some(SyntaxKind::Ident)
            && self.nth_kind(last + 1) == Some(SyntaxKind::LBrace);

        if accessor_like {
            children.push(SyntaxElement::Node(ty));
            if last > 0 {
                let mut specifier = Vec::new();
                for _ in 0..last {
                    self.bump(&mut specifier);
                }
                children.push(SyntaxElement::Node(
                    self.node(SyntaxKind::ExplicitInterfaceSpecifier, specifier),
                ));
            }
            self.bump(&mut children);
            self.accessor_list(&mut children);
            out.push(SyntaxElement::Node(
                self.node(SyntaxKind::EventDeclaration, children),
            ));
            return;
        }

        let mut declaration = vec![SyntaxElement::Node(ty)];
        while self.variable_declarator(&mut declaration) {
            if !self.eat(SyntaxKind::Comma, &mut declaration) {
                break;
            }
        }
        children.push(SyntaxElement::Node(
            self.node(SyntaxKind::VariableDeclaration, declaration),
        ));
        if !self.eat(SyntaxKind::Semicolon, &mut children) {
            self.other_member(&mut children);
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::EventFieldDeclaration, children),
        ));
    }

    fn variable_declarator(&mut self, out: &mut Children) -> bool {
        if !self.at(SyntaxKind::Ident) {
            return false;
        }
        let mut children = Vec::new();
        self.bump(&mut children);
        if self.eat(SyntaxKind::Eq, &mut children) {
            if let Some(value) = self.expression(&[SyntaxKind::Comma, SyntaxKind::Semicolon]) {
                children.push(SyntaxElement::Node(value));
            }
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::VariableDeclarator, children),
        ));
        true
    }

    fn accessor_list(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump(&mut children);
        while !self.at_eof() && !self.at(SyntaxKind::RBrace) {
            self.accessor_declaration(&mut children);
        }
        self.eat(SyntaxKind::RBrace, &mut children);
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::AccessorList, children),
        ));
    }

    fn accessor_declaration(&mut self, out: &mut Children) {
        let start = self.pos;
        let mut children = Vec::new();
        while self.at(SyntaxKind::LBracket) {
            self.attribute_list(&mut children);
        }
        self.modifier_list(&mut children);
        self.eat(SyntaxKind::Ident, &mut children);
        match self.current() {
            Some(SyntaxKind::LBrace) => self.block(&mut children),
            Some(SyntaxKind::FatArrow) => {
                self.arrow_clause(&mut children);
                self.eat(SyntaxKind::Semicolon, &mut children);
            }
            Some(SyntaxKind::Semicolon) => self.bump(&mut children),
            _ => {}
        }
        if self.pos == start {
            self.bump(&mut children);
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::AccessorDeclaration, children),
        ));
    }

    fn arrow_clause(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump(&mut children);
        if let Some(body) = self.expression_or_assignment(&[SyntaxKind::Semicolon]) {
            children.push(SyntaxElement::Node(body));
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::ArrowExpressionClause, children),
        ));
    }

    /// `Type Name<T>(...)` followed by a body. Restores the position on mismatch.
    fn try_method(&mut self, children: &mut Children) -> bool {
        let saved = self.pos;
        let Some(return_type) = self.parse_type() else {
            return false;
        };

        let mut last = 0;
        while self.nth_kind(last) == Some(SyntaxKind::Ident)
            && self.nth_kind(last + 1) == Some(SyntaxKind::Dot)
        {
            last += 2;
        }
        let mut after_name = last + 1;
        if self.nth_kind(last) != Some(SyntaxKind::Ident) {
            self.pos = saved;
            return false;
        }
        if self.nth_kind(after_name) == Some(SyntaxKind::Lt) {
            let mut depth = 0usize;
            while let Some(kind) = self.nth_kind(after_name) {
                after_name += 1;
                match kind {
                    SyntaxKind::Lt => depth += 1,
                    SyntaxKind::Gt => depth -= 1,
                    _ => {}
                }
                if depth == 0 {
                    break;
                }
            }
        }
        if self.nth_kind(after_name) != Some(SyntaxKind::LParen) {
            self.pos = saved;
            return false;
        }

        children.push(SyntaxElement::Node(return_type));
        if last > 0 {
            let mut specifier = Vec::new();
            for _ in 0..last {
                self.bump(&mut specifier);
            }
            children.push(SyntaxElement::Node(
                self.node(SyntaxKind::ExplicitInterfaceSpecifier, specifier),
            ));
        }
        self.bump(children);
        if self.at(SyntaxKind::Lt) {
            let mut type_parameters = Vec::new();
            while !self.at(SyntaxKind::LParen) {
                self.bump(&mut type_parameters);
            }
            children.push(SyntaxElement::Node(
                self.node(SyntaxKind::TypeParameterList, type_parameters),
            ));
        }
        self.parameter_list(children);

        // Constraints and anything else up to the body.
        while let Some(kind) = self.current() {
            if matches!(
                kind,
                SyntaxKind::LBrace | SyntaxKind::FatArrow | SyntaxKind::Semicolon | SyntaxKind::RBrace
            ) {
                break;
            }
            self.bump(children);
        }
        match self.current() {
            Some(SyntaxKind::LBrace) => self.block(children),
            Some(SyntaxKind::FatArrow) => {
                self.arrow_clause(children);
                self.eat(SyntaxKind::Semicolon, children);
            }
            Some(SyntaxKind::Semicolon) => self.bump(children),
            _ => {}
        }
        true
    }

    fn parameter_list(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump(&mut children);
        while !self.at_eof() && !self.at(SyntaxKind::RParen) {
            self.parameter(&mut children);
            if !self.eat(SyntaxKind::Comma, &mut children) {
                break;
            }
        }
        self.eat(SyntaxKind::RParen, &mut children);
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::ParameterList, children),
        ));
    }

    fn parameter(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        while self.at(SyntaxKind::LBracket) {
            self.attribute_list(&mut children);
        }
        while self.at(SyntaxKind::ThisKw) || self.nth_is_ident(0, PARAMETER_MODIFIERS) {
            self.bump(&mut children);
        }
        let saved = self.pos;
        if let Some(ty) = self.parse_type() {
            if self.at(SyntaxKind::Ident) {
                children.push(SyntaxElement::Node(ty));
                self.bump(&mut children);
            } else {
                self.pos = saved;
            }
        }
        if let Some(rest) = self.expression(&[SyntaxKind::Comma]) {
            children.push(SyntaxElement::Node(rest));
        }
        if !children.is_empty() {
            out.push(SyntaxElement::Node(self.node(SyntaxKind::Parameter, children)));
        }
    }

    fn other_member(&mut self, out: &mut Children) {
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::Semicolon => {
                    self.bump(out);
                    break;
                }
                SyntaxKind::RBrace => break,
                SyntaxKind::LBrace => {
                    self.bump_balanced(out);
                    if self.eat(SyntaxKind::Semicolon, out) {
                        break;
                    }
                    if !self.at(SyntaxKind::Eq) {
                        break;
                    }
                }
                SyntaxKind::LParen | SyntaxKind::LBracket => self.bump_balanced(out),
                _ => self.bump(out),
            }
        }
    }

    // Types

    fn parse_type(&mut self) -> Option<SyntaxNode> {
        let mut ty = match self.current()? {
            SyntaxKind::LParen => {
                let mut children = Vec::new();
                self.bump_balanced(&mut children);
                self.node(SyntaxKind::TupleType, children)
            }
            SyntaxKind::Ident => self.simple_name(),
            _ => return None,
        };
        while matches!(
            self.current(),
            Some(SyntaxKind::Dot | SyntaxKind::ColonColon)
        ) && self.nth_kind(1) == Some(SyntaxKind::Ident)
        {
            let mut children = vec![SyntaxElement::Node(ty)];
            self.bump(&mut children);
            children.push(SyntaxElement::Node(self.simple_name()));
            ty = self.node(SyntaxKind::QualifiedName, children);
        }
        loop {
            if self.at(SyntaxKind::Question) {
                let mut children = vec![SyntaxElement::Node(ty)];
                self.bump(&mut children);
                ty = self.node(SyntaxKind::NullableType, children);
            } else if self.at(SyntaxKind::LBracket)
                && matches!(
                    self.nth_kind(1),
                    Some(SyntaxKind::RBracket | SyntaxKind::Comma)
                )
            {
                let mut children = vec![SyntaxElement::Node(ty)];
                self.bump_balanced(&mut children);
                ty = self.node(SyntaxKind::ArrayType, children);
            } else {
                break;
            }
        }
        Some(ty)
    }

    /// Identifier with optional type arguments. The current token must be an identifier.
    fn simple_name(&mut self) -> SyntaxNode {
        let mut children = Vec::new();
        self.bump(&mut children);
        if self.at(SyntaxKind::Lt) {
            let saved = self.pos;
            if let Some(arguments) = self.type_argument_list() {
                children.push(SyntaxElement::Node(arguments));
                return self.node(SyntaxKind::GenericName, children);
            }
            self.pos = saved;
        }
        self.node(SyntaxKind::IdentifierName, children)
    }

    fn type_argument_list(&mut self) -> Option<SyntaxNode> {
        let mut children = Vec::new();
        self.bump(&mut children);
        loop {
            let ty = self.parse_type()?;
            children.push(SyntaxElement::Node(ty));
            if self.eat(SyntaxKind::Comma, &mut children) {
                continue;
            }
            if self.eat(SyntaxKind::Gt, &mut children) {
                break;
            }
            return None;
        }
        Some(self.node(SyntaxKind::TypeArgumentList, children))
    }

    // Statements

    fn block(&mut self, out: &mut Children) {
        let mut children = Vec::new();
        self.bump(&mut children);
        while !self.at_eof() && !self.at(SyntaxKind::RBrace) {
            self.statement(&mut children);
        }
        self.eat(SyntaxKind::RBrace, &mut children);
        out.push(SyntaxElement::Node(self.node(SyntaxKind::Block, children)));
    }

    fn statement(&mut self, out: &mut Children) {
        match self.current() {
            Some(SyntaxKind::LBrace) => self.block(out),
            Some(SyntaxKind::ReturnKw) => {
                let mut children = Vec::new();
                self.bump(&mut children);
                if let Some(value) = self.expression(&[SyntaxKind::Semicolon]) {
                    children.push(SyntaxElement::Node(value));
                }
                self.eat(SyntaxKind::Semicolon, &mut children);
                out.push(SyntaxElement::Node(
                    self.node(SyntaxKind::ReturnStatement, children),
                ));
            }
            Some(
                SyntaxKind::Semicolon
                | SyntaxKind::UsingKw
                | SyntaxKind::UnsafeKw
                | SyntaxKind::ConstKw,
            ) => self.other_statement(out),
            Some(SyntaxKind::Ident) if self.nth_is_ident(0, CONTROL_KEYWORDS) => {
                self.other_statement(out);
            }
            _ if self.looks_like_local_declaration() => self.other_statement(out),
            _ => {
                let start = self.pos;
                let mut children = Vec::new();
                if let Some(expression) = self.expression_or_assignment(&[SyntaxKind::Semicolon]) {
                    children.push(SyntaxElement::Node(expression));
                }
                self.eat(SyntaxKind::Semicolon, &mut children);
                if self.pos == start {
                    self.bump(&mut children);
                }
                out.push(SyntaxElement::Node(
                    self.node(SyntaxKind::ExpressionStatement, children),
                ));
            }
        }
    }

    fn other_statement(&mut self, out: &mut Children) {
        let start = self.pos;
        let mut children = Vec::new();
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::Semicolon => {
                    self.bump(&mut children);
                    break;
                }
                SyntaxKind::RBrace => break,
                SyntaxKind::LParen | SyntaxKind::LBracket => self.bump_balanced(&mut children),
                SyntaxKind::LBrace => {
                    self.bump_balanced(&mut children);
                    if self.eat(SyntaxKind::Semicolon, &mut children) {
                        break;
                    }
                    if !self.at(SyntaxKind::Dot) && !self.nth_is_ident(0, &["while"]) {
                        break;
                    }
                }
                _ => self.bump(&mut children),
            }
        }
        if self.pos == start {
            self.bump(&mut children);
        }
        out.push(SyntaxElement::Node(
            self.node(SyntaxKind::OtherStatement, children),
        ));
    }

    /// `Type name ...` at statement start: two adjacent names before any
    /// assignment operator, call or terminator.
    fn looks_like_local_declaration(&self) -> bool {
        let mut previous: Option<SyntaxKind> = None;
        let mut n = 0;
        while let Some(kind) = self.nth_kind(n) {
            if kind.is_assignment_operator()
                || matches!(
                    kind,
                    SyntaxKind::Semicolon
                        | SyntaxKind::LParen
                        | SyntaxKind::LBrace
                        | SyntaxKind::RBrace
                )
            {
                return false;
            }
            if kind == SyntaxKind::Ident
                && matches!(
                    previous,
                    Some(
                        SyntaxKind::Ident
                            | SyntaxKind::Gt
                            | SyntaxKind::RBracket
                            | SyntaxKind::Question
                    )
                )
            {
                return true;
            }
            previous = Some(kind);
            n += 1;
        }
        false
    }

    // Expressions

    /// Opaque expression up to a stop token (or an unbalanced closing bracket) at depth 0.
    fn expression(&mut self, stops: &[SyntaxKind]) -> Option<SyntaxNode> {
        let mut children = Vec::new();
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            let closing = matches!(
                kind,
                SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::RBracket
            );
            if depth == 0 && (stops.contains(&kind) || closing) {
                break;
            }
            if matches!(
                kind,
                SyntaxKind::LBrace | SyntaxKind::LParen | SyntaxKind::LBracket
            ) {
                depth += 1;
            } else if closing {
                depth -= 1;
            }
            self.bump(&mut children);
        }
        if children.is_empty() {
            return None;
        }
        let kind = classify_expression(&children);
        Some(self.node(kind, children))
    }

    fn expression_or_assignment(&mut self, stops: &[SyntaxKind]) -> Option<SyntaxNode> {
        if !self.assignment_ahead(stops) {
            return self.expression(stops);
        }
        let mut left_stops = stops.to_vec();
        left_stops.extend([
            SyntaxKind::Eq,
            SyntaxKind::PlusEq,
            SyntaxKind::MinusEq,
            SyntaxKind::CompoundAssign,
        ]);
        let mut children = Vec::new();
        if let Some(left) = self.expression(&left_stops) {
            children.push(SyntaxElement::Node(left));
        }
        self.bump(&mut children);
        if let Some(right) = self.expression(stops) {
            children.push(SyntaxElement::Node(right));
        }
        Some(self.node(SyntaxKind::AssignmentExpression, children))
    }

    fn assignment_ahead(&self, stops: &[SyntaxKind]) -> bool {
        let mut depth = 0usize;
        let mut n = 0;
        while let Some(kind) = self.nth_kind(n) {
            match kind {
                SyntaxKind::LBrace | SyntaxKind::LParen | SyntaxKind::LBracket => depth += 1,
                SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::RBracket => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ if depth == 0 && stops.contains(&kind) => return false,
                _ if depth == 0 && kind.is_assignment_operator() => return true,
                _ => {}
            }
            n += 1;
        }
        false
    }
}

fn classify_expression(children: &[SyntaxElement]) -> SyntaxKind {
    let kinds: Vec<SyntaxKind> = children.iter().map(SyntaxElement::kind).collect();
    match kinds.as_slice() {
        [SyntaxKind::Ident] => SyntaxKind::IdentifierName,
        [SyntaxKind::Ident | SyntaxKind::ThisKw, rest @ ..]
            if !rest.is_empty()
                && rest.len() % 2 == 0
                && rest
                    .chunks(2)
                    .all(|pair| pair == [SyntaxKind::Dot, SyntaxKind::Ident]) =>
        {
            SyntaxKind::MemberAccessExpression
        }
        _ => SyntaxKind::Expression,
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

    fn find(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<&SyntaxNode> {
        tree.root()
            .descendants()
            .into_iter()
            .filter(|n| n.kind() == kind)
            .collect()
    }

    #[test]
    fn test_field_like_event() {
        let tree = SyntaxTree::parse(
            "namespace N\n{\n    public class Driver\n    {\n        public virtual event EventHandler<EventArgs> OnVirtualEvent;\n    }\n}\n",
        );
        let events = find(&tree, SyntaxKind::EventFieldDeclaration);
        assert_eq!(events.len(), 1);
        let declaration = events[0].child_node(SyntaxKind::VariableDeclaration).unwrap();
        let ty = declaration.child_node(SyntaxKind::GenericName).unwrap();
        assert_eq!(ty.text(), "EventHandler<EventArgs>");
        let declarator = declaration.child_node(SyntaxKind::VariableDeclarator).unwrap();
        assert_eq!(declarator.text(), "OnVirtualEvent");
    }

    #[test]
    fn test_accessor_like_event() {
        let tree = SyntaxTree::parse(
            "class Driver {\n  public virtual event EventHandler<EventArgs> OnVirtualEvent\n  {\n    add { eventField += value; }\n    remove { eventField -= value; }\n  }\n}",
        );
        let events = find(&tree, SyntaxKind::EventDeclaration);
        assert_eq!(events.len(), 1);
        let accessors: Vec<_> = events[0]
            .child_node(SyntaxKind::AccessorList)
            .unwrap()
            .child_nodes()
            .collect();
        assert_eq!(accessors.len(), 2);
        let assignment = find(&tree, SyntaxKind::AssignmentExpression)[0];
        assert_eq!(assignment.text(), "eventField += value");
        let operands: Vec<_> = assignment.child_nodes().map(SyntaxNode::kind).collect();
        assert_eq!(
            operands,
            vec![SyntaxKind::IdentifierName, SyntaxKind::IdentifierName]
        );
    }

    #[test]
    fn test_method_declaration() {
        let tree = SyntaxTree::parse(
            "class C {\n  protected virtual EventArgs RaiseChanged(EventArgs args)\n  {\n    Changed?.Invoke(this, args);\n    return args;\n  }\n}",
        );
        let methods = find(&tree, SyntaxKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        let block = methods[0].child_node(SyntaxKind::Block).unwrap();
        let statements: Vec<_> = block.child_nodes().map(SyntaxNode::kind).collect();
        assert_eq!(
            statements,
            vec![SyntaxKind::ExpressionStatement, SyntaxKind::ReturnStatement]
        );
        let parameter = find(&tree, SyntaxKind::Parameter)[0];
        assert_eq!(parameter.text(), "EventArgs args");
    }

    #[test]
    fn test_opaque_members_do_not_swallow_events() {
        let tree = SyntaxTree::parse(
            r#"
class C : Base, IThing
{
    [Obsolete("x")]
    public int Count { get; set; } = 3;
    private readonly Func<int> f = () => { return 1; };
    public C(int x) : base(x) { if (x > 0) { Count = x; } else { Count = 0; } }
    public static C operator +(C a, C b) => a;
    public event Action Simple;
    protected virtual event EventHandler<MyArgs> Fired;
}
"#,
        );
        assert_eq!(find(&tree, SyntaxKind::EventFieldDeclaration).len(), 2);
        assert_eq!(find(&tree, SyntaxKind::OtherMember).len(), 4);
    }

    #[test]
    fn test_file_scoped_namespace_and_nested_types() {
        let tree = SyntaxTree::parse(
            "using System;\nnamespace A.B;\npublic interface I { event EventHandler E; }\npublic record R(int X);\nclass Outer { class Inner { public virtual event Action E; } }\n",
        );
        assert_eq!(find(&tree, SyntaxKind::UsingDirective).len(), 1);
        let namespace = find(&tree, SyntaxKind::NamespaceDeclaration)[0];
        assert_eq!(namespace.child_nodes().count(), 3);
        assert_eq!(find(&tree, SyntaxKind::InterfaceDeclaration).len(), 1);
        assert_eq!(find(&tree, SyntaxKind::RecordDeclaration).len(), 1);
        assert_eq!(find(&tree, SyntaxKind::ClassDeclaration).len(), 2);
        assert_eq!(find(&tree, SyntaxKind::EventFieldDeclaration).len(), 2);
    }

    #[test]
    fn test_local_declaration_is_not_an_assignment() {
        let tree = SyntaxTree::parse("class C { void M() { var handler = value; x = 1; } }");
        let assignments = find(&tree, SyntaxKind::AssignmentExpression);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].text(), "x = 1");
    }

    #[test]
    fn test_unbalanced_input_terminates() {
        let tree = SyntaxTree::parse("class { event ; } } ) virtual event EventHandler<");
        assert_eq!(tree.root().kind(), SyntaxKind::CompilationUnit);
    }
}
