//! Token and node kinds of the C# syntax tree.

/// Kind of a token or node.
///
/// Tokens come first, node kinds start at [`SyntaxKind::CompilationUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // Tokens
    /// An identifier, including contextual keywords such as `add` or `value`.
    Ident,
    /// Numeric literal.
    NumericLiteral,
    /// String literal of any flavor (regular, verbatim, interpolated, raw).
    StringLiteral,
    /// Character literal.
    CharLiteral,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `=`
    Eq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// Any other compound assignment (`*=`, `??=`, `<<=` ...).
    CompoundAssign,
    /// `=>`
    FatArrow,
    /// `?.`
    QuestionDot,
    /// Any other operator.
    Operator,
    /// A character the lexer does not understand.
    Error,

    // Reserved keywords
    /// `event`
    EventKw,
    /// `namespace`
    NamespaceKw,
    /// `using`
    UsingKw,
    /// `class`
    ClassKw,
    /// `struct`
    StructKw,
    /// `interface`
    InterfaceKw,
    /// `enum`
    EnumKw,
    /// `delegate`
    DelegateKw,
    /// `return`
    ReturnKw,
    /// `this`
    ThisKw,
    /// `public`
    PublicKw,
    /// `private`
    PrivateKw,
    /// `protected`
    ProtectedKw,
    /// `internal`
    InternalKw,
    /// `static`
    StaticKw,
    /// `virtual`
    VirtualKw,
    /// `override`
    OverrideKw,
    /// `abstract`
    AbstractKw,
    /// `sealed`
    SealedKw,
    /// `new`
    NewKw,
    /// `readonly`
    ReadonlyKw,
    /// `extern`
    ExternKw,
    /// `unsafe`
    UnsafeKw,
    /// `volatile`
    VolatileKw,
    /// `const`
    ConstKw,

    // Nodes
    /// Root of a file.
    CompilationUnit,
    /// `using System;`
    UsingDirective,
    /// Block or file-scoped namespace.
    NamespaceDeclaration,
    /// `class` declaration.
    ClassDeclaration,
    /// `struct` declaration.
    StructDeclaration,
    /// `record` / `record class` / `record struct` declaration.
    RecordDeclaration,
    /// `interface` declaration.
    InterfaceDeclaration,
    /// `enum` declaration (body kept opaque).
    EnumDeclaration,
    /// `[Attr(...)]`
    AttributeList,
    /// Modifiers in front of a member.
    ModifierList,
    /// `event T a, b;`
    EventFieldDeclaration,
    /// Type plus declarators of a field-like event.
    VariableDeclaration,
    /// One declared name with an optional initializer.
    VariableDeclarator,
    /// `event T Name { add {...} remove {...} }`
    EventDeclaration,
    /// `IFoo.` in front of an explicitly implemented member name.
    ExplicitInterfaceSpecifier,
    /// `{ add ... remove ... }`
    AccessorList,
    /// One `add`/`remove`/`get`/`set`/`init` accessor.
    AccessorDeclaration,
    /// `=> expr`
    ArrowExpressionClause,
    /// Method declaration.
    MethodDeclaration,
    /// `<T, U>` after a method name.
    TypeParameterList,
    /// `(int a, string b)`
    ParameterList,
    /// One parameter.
    Parameter,
    /// `{ statements }`
    Block,
    /// `expr;`
    ExpressionStatement,
    /// `return expr;`
    ReturnStatement,
    /// Any statement kept opaque (control flow, local declarations ...).
    OtherStatement,
    /// `left op right`
    AssignmentExpression,
    /// Single identifier used as an expression or type.
    IdentifierName,
    /// `this.a.b` / `a.b` member access chain.
    MemberAccessExpression,
    /// Expression kept opaque.
    Expression,
    /// `Name<Args>`
    GenericName,
    /// `<Args>` of a generic name.
    TypeArgumentList,
    /// `A.B` type name.
    QualifiedName,
    /// `T?`
    NullableType,
    /// `T[]`
    ArrayType,
    /// `(int, string)`
    TupleType,
    /// Member kept opaque (fields, properties, constructors, delegates ...).
    OtherMember,
    /// Tokens skipped during error recovery.
    ErrorNode,
}

impl SyntaxKind {
    /// Returns the reserved keyword kind for `text`, if any.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "event" => Self::EventKw,
            "namespace" => Self::NamespaceKw,
            "using" => Self::UsingKw,
            "class" => Self::ClassKw,
            "struct" => Self::StructKw,
            "interface" => Self::InterfaceKw,
            "enum" => Self::EnumKw,
            "delegate" => Self::DelegateKw,
            "return" => Self::ReturnKw,
            "this" => Self::ThisKw,
            "public" => Self::PublicKw,
            "private" => Self::PrivateKw,
            "protected" => Self::ProtectedKw,
            "internal" => Self::InternalKw,
            "static" => Self::StaticKw,
            "virtual" => Self::VirtualKw,
            "override" => Self::OverrideKw,
            "abstract" => Self::AbstractKw,
            "sealed" => Self::SealedKw,
            "new" => Self::NewKw,
            "readonly" => Self::ReadonlyKw,
            "extern" => Self::ExternKw,
            "unsafe" => Self::UnsafeKw,
            "volatile" => Self::VolatileKw,
            "const" => Self::ConstKw,
            _ => return None,
        };
        Some(kind)
    }

    /// Source text of a keyword kind.
    #[must_use]
    pub const fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            Self::EventKw => "event",
            Self::NamespaceKw => "namespace",
            Self::UsingKw => "using",
            Self::ClassKw => "class",
            Self::StructKw => "struct",
            Self::InterfaceKw => "interface",
            Self::EnumKw => "enum",
            Self::DelegateKw => "delegate",
            Self::ReturnKw => "return",
            Self::ThisKw => "this",
            Self::PublicKw => "public",
            Self::PrivateKw => "private",
            Self::ProtectedKw => "protected",
            Self::InternalKw => "internal",
            Self::StaticKw => "static",
            Self::VirtualKw => "virtual",
            Self::OverrideKw => "override",
            Self::AbstractKw => "abstract",
            Self::SealedKw => "sealed",
            Self::NewKw => "new",
            Self::ReadonlyKw => "readonly",
            Self::ExternKw => "extern",
            Self::UnsafeKw => "unsafe",
            Self::VolatileKw => "volatile",
            Self::ConstKw => "const",
            _ => return None,
        };
        Some(text)
    }

    /// Whether this keyword may appear in a member's modifier list.
    #[must_use]
    pub const fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            Self::PublicKw
                | Self::PrivateKw
                | Self::ProtectedKw
                | Self::InternalKw
                | Self::StaticKw
                | Self::VirtualKw
                | Self::OverrideKw
                | Self::AbstractKw
                | Self::SealedKw
                | Self::NewKw
                | Self::ReadonlyKw
                | Self::ExternKw
                | Self::UnsafeKw
                | Self::VolatileKw
                | Self::ConstKw
        )
    }

    /// Whether this is an assignment operator token.
    #[must_use]
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::PlusEq | Self::MinusEq | Self::CompoundAssign
        )
    }

    /// Whether this kind names a type declaration node.
    #[must_use]
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::StructDeclaration
                | Self::RecordDeclaration
                | Self::InterfaceDeclaration
                | Self::EnumDeclaration
        )
    }

    /// Whether this kind is a token kind (as opposed to a node kind).
    #[must_use]
    pub fn is_token(self) -> bool {
        self < Self::CompilationUnit
    }
}
