//! Event-shape matcher.
//!
//! Classifies a member node as a field-like event (`event T a;`) or an
//! accessor-like event (`event T A { add {...} remove {...} }`) and extracts a
//! normalized view of it. Everything here is a pure function of the tree.

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use compact_str::CompactString;
use smallvec::SmallVec;
use text_size::TextRange;

/// The two syntactic shapes of an event member.
#[derive(Debug, Clone)]
pub enum EventShape<'a> {
    /// `event T a, b;` The declarator names double as the backing storage.
    FieldLike {
        /// `VariableDeclarator` nodes, in source order. Never empty.
        declarators: SmallVec<[&'a SyntaxNode; 1]>,
    },
    /// `event T A { add ... remove ... }`
    AccessorLike {
        /// The `add` accessor, if present.
        add: Option<Accessor<'a>>,
        /// The `remove` accessor, if present.
        remove: Option<Accessor<'a>>,
    },
}

/// Element (delegate) type of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// `Name<Argument>` with exactly one type argument, e.g. `EventHandler<MyArgs>`.
    Generic {
        /// Generic type name, possibly qualified (`System.EventHandler`).
        name: CompactString,
        /// The single type argument as written.
        argument: CompactString,
    },
    /// Any other type (`Action`, `Func<A, B>`, `EventHandler<T>?` ...).
    Other {
        /// Type as written.
        text: CompactString,
    },
}

impl ElementType {
    fn from_node(node: &SyntaxNode) -> Self {
        let generic = match node.kind() {
            SyntaxKind::GenericName => Some(node),
            SyntaxKind::QualifiedName => node
                .child_nodes()
                .last()
                .filter(|right| right.kind() == SyntaxKind::GenericName),
            _ => None,
        };
        let single_argument = generic.and_then(|generic| {
            let arguments: SmallVec<[&SyntaxNode; 2]> = generic
                .child_node(SyntaxKind::TypeArgumentList)?
                .child_nodes()
                .collect();
            match arguments.as_slice() {
                [argument] => Some(argument.text()),
                _ => None,
            }
        });
        match single_argument {
            Some(argument) => {
                let text = node.text();
                let name = text.split('<').next().unwrap_or_default().trim_end();
                Self::Generic {
                    name: name.into(),
                    argument: argument.into(),
                }
            }
            None => Self::Other {
                text: node.text().into(),
            },
        }
    }

    /// The type argument of a single-argument generic element type.
    #[must_use]
    pub fn generic_argument(&self) -> Option<&str> {
        match self {
            Self::Generic { argument, .. } => Some(argument),
            Self::Other { .. } => None,
        }
    }
}

/// One modifier token of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// Token kind (`VirtualKw`, `PublicKw`, or `Ident` for contextual modifiers).
    pub kind: SyntaxKind,
    /// Modifier text.
    pub text: CompactString,
    /// Range of the token.
    pub range: TextRange,
}

impl From<&SyntaxToken> for Modifier {
    fn from(token: &SyntaxToken) -> Self {
        Self {
            kind: token.kind(),
            text: token.text().into(),
            range: token.text_range(),
        }
    }
}

/// Kind of an event accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// `add`
    Add,
    /// `remove`
    Remove,
}

/// An `add` or `remove` accessor.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'a> {
    /// Which accessor this is.
    pub kind: AccessorKind,
    /// The `AccessorDeclaration` node.
    pub node: &'a SyntaxNode,
}

impl<'a> Accessor<'a> {
    /// Statements of the accessor body, in order.
    ///
    /// An expression body (`add => x += value;`) counts as a single statement.
    #[must_use]
    pub fn statements(&self) -> Vec<Statement<'a>> {
        if let Some(block) = self.node.child_node(SyntaxKind::Block) {
            return block.child_nodes().map(Statement::from_node).collect();
        }
        self.node
            .child_node(SyntaxKind::ArrowExpressionClause)
            .and_then(|arrow| arrow.child_nodes().next())
            .map(Statement::from_expression)
            .into_iter()
            .collect()
    }
}

/// One statement of an accessor body.
#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    /// `left op right`
    Assignment {
        /// Left operand.
        left: &'a SyntaxNode,
        /// Operator token kind (`Eq`, `PlusEq`, `MinusEq`, `CompoundAssign`).
        operator: SyntaxKind,
        /// Right operand.
        right: &'a SyntaxNode,
    },
    /// Anything else.
    Other(&'a SyntaxNode),
}

impl<'a> Statement<'a> {
    fn from_node(node: &'a SyntaxNode) -> Self {
        match node.kind() {
            SyntaxKind::ExpressionStatement => node
                .child_nodes()
                .next()
                .map_or(Self::Other(node), Self::from_expression),
            _ => Self::Other(node),
        }
    }

    fn from_expression(node: &'a SyntaxNode) -> Self {
        if node.kind() != SyntaxKind::AssignmentExpression {
            return Self::Other(node);
        }
        let mut operands = node.child_nodes();
        let operator = node
            .child_tokens()
            .map(SyntaxToken::kind)
            .find(|kind| kind.is_assignment_operator());
        match (operands.next(), operator, operands.next()) {
            (Some(left), Some(operator), Some(right)) => Self::Assignment {
                left,
                operator,
                right,
            },
            _ => Self::Other(node),
        }
    }
}

/// Normalized view of an event member.
#[derive(Debug, Clone)]
pub struct EventDeclaration<'a> {
    /// Field-like or accessor-like.
    pub shape: EventShape<'a>,
    /// Event name (first declarator for field-like events). Never empty.
    pub name: CompactString,
    /// Range of the name token.
    pub name_range: TextRange,
    /// Delegate type of the event.
    pub element_type: ElementType,
    /// Modifier tokens in source order.
    pub modifiers: SmallVec<[Modifier; 4]>,
    /// The `EventFieldDeclaration` or `EventDeclaration` node.
    pub node: &'a SyntaxNode,
}

impl EventDeclaration<'_> {
    /// Whether the declaration carries `virtual`.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifier(SyntaxKind::VirtualKw).is_some()
    }

    /// The modifier token of the given kind, if present.
    #[must_use]
    pub fn modifier(&self, kind: SyntaxKind) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.kind == kind)
    }

    /// Number of declarators (always 1 for accessor-like events).
    #[must_use]
    pub fn declarator_count(&self) -> usize {
        match &self.shape {
            EventShape::FieldLike { declarators } => declarators.len(),
            EventShape::AccessorLike { .. } => 1,
        }
    }
}

/// Matches an event member node. Returns `None` for anything else.
#[must_use]
pub fn match_event(node: &SyntaxNode) -> Option<EventDeclaration<'_>> {
    match node.kind() {
        SyntaxKind::EventFieldDeclaration => match_field_like(node),
        SyntaxKind::EventDeclaration => match_accessor_like(node),
        _ => None,
    }
}

fn modifiers_of(node: &SyntaxNode) -> SmallVec<[Modifier; 4]> {
    node.child_node(SyntaxKind::ModifierList)
        .map(|list| list.child_tokens().map(Modifier::from).collect())
        .unwrap_or_default()
}

fn is_type_node(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IdentifierName
            | SyntaxKind::GenericName
            | SyntaxKind::QualifiedName
            | SyntaxKind::NullableType
            | SyntaxKind::ArrayType
            | SyntaxKind::TupleType
    )
}

fn match_field_like(node: &SyntaxNode) -> Option<EventDeclaration<'_>> {
    let declaration = node.child_node(SyntaxKind::VariableDeclaration)?;
    let ty = declaration
        .child_nodes()
        .find(|child| is_type_node(child.kind()))?;
    let declarators: SmallVec<[&SyntaxNode; 1]> = declaration
        .child_nodes()
        .filter(|child| child.kind() == SyntaxKind::VariableDeclarator)
        .collect();
    let name = declarators.first()?.child_token(SyntaxKind::Ident)?;

    Some(EventDeclaration {
        name: name.text().into(),
        name_range: name.text_range(),
        element_type: ElementType::from_node(ty),
        modifiers: modifiers_of(node),
        shape: EventShape::FieldLike { declarators },
        node,
    })
}

fn match_accessor_like(node: &SyntaxNode) -> Option<EventDeclaration<'_>> {
    let ty = node.child_nodes().find(|child| is_type_node(child.kind()))?;
    let name = node.child_token(SyntaxKind::Ident)?;
    let accessors = node.child_node(SyntaxKind::AccessorList)?;

    let mut add = None;
    let mut remove = None;
    for accessor in accessors
        .child_nodes()
        .filter(|child| child.kind() == SyntaxKind::AccessorDeclaration)
    {
        let keyword = accessor.child_token(SyntaxKind::Ident).map(SyntaxToken::text);
        match keyword {
            Some("add") if add.is_none() => {
                add = Some(Accessor {
                    kind: AccessorKind::Add,
                    node: accessor,
                });
            }
            Some("remove") if remove.is_none() => {
                remove = Some(Accessor {
                    kind: AccessorKind::Remove,
                    node: accessor,
                });
            }
            _ => {}
        }
    }

    Some(EventDeclaration {
        name: name.text().into(),
        name_range: name.text_range(),
        element_type: ElementType::from_node(ty),
        modifiers: modifiers_of(node),
        shape: EventShape::AccessorLike { add, remove },
        node,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTree;

    fn events(tree: &SyntaxTree) -> Vec<EventDeclaration<'_>> {
        tree.root()
            .descendants()
            .into_iter()
            .filter_map(match_event)
            .collect()
    }

    #[test]
    fn test_field_like_generic() {
        let source = "class C { public virtual event EventHandler<EventArgs> OnVirtualEvent; }";
        let tree = SyntaxTree::parse(source);
        let found = events(&tree);
        assert_eq!(found.len(), 1);
        let event = &found[0];
        assert!(matches!(event.shape, EventShape::FieldLike { .. }));
        assert_eq!(event.name, "OnVirtualEvent");
        assert_eq!(&source[event.name_range], "OnVirtualEvent");
        assert_eq!(event.element_type.generic_argument(), Some("EventArgs"));
        assert!(event.is_virtual());
        let texts: Vec<&str> = event.modifiers.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["public", "virtual"]);
    }

    #[test]
    fn test_element_types() {
        let tree = SyntaxTree::parse(
            "class C {\n event Action A;\n event System.EventHandler<Args> B;\n event Func<int, int> F;\n event EventHandler<Args>? N;\n}",
        );
        let found = events(&tree);
        assert_eq!(
            found[0].element_type,
            ElementType::Other {
                text: "Action".into()
            }
        );
        assert_eq!(
            found[1].element_type,
            ElementType::Generic {
                name: "System.EventHandler".into(),
                argument: "Args".into()
            }
        );
        assert_eq!(found[2].element_type.generic_argument(), None);
        assert_eq!(found[3].element_type.generic_argument(), None);
        assert!(found.iter().all(|e| !e.is_virtual()));
    }

    #[test]
    fn test_multiple_declarators() {
        let tree = SyntaxTree::parse("class C { public virtual event Action A, B; }");
        let found = events(&tree);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "A");
        assert_eq!(found[0].declarator_count(), 2);
    }

    #[test]
    fn test_accessor_like() {
        let tree = SyntaxTree::parse(
            "class C {\n  public virtual event EventHandler<EventArgs> Changed\n  {\n    add { log(); this.handlers += value; }\n    remove => handlers -= value;\n  }\n}",
        );
        let found = events(&tree);
        assert_eq!(found.len(), 1);
        let EventShape::AccessorLike { add, remove } = &found[0].shape else {
            panic!("expected accessor-like event");
        };
        let statements = add.unwrap().statements();
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Statement::Other(_)));
        let Statement::Assignment {
            left,
            operator,
            right,
        } = statements[1]
        else {
            panic!("expected assignment");
        };
        assert_eq!(left.text(), "this.handlers");
        assert_eq!(operator, SyntaxKind::PlusEq);
        assert_eq!(right.text(), "value");

        let removal = remove.unwrap().statements();
        assert!(matches!(
            removal[..],
            [Statement::Assignment {
                operator: SyntaxKind::MinusEq,
                ..
            }]
        ));
        assert_eq!(found[0].name, "Changed");
    }

    #[test]
    fn test_non_events_do_not_match() {
        let tree = SyntaxTree::parse("class C { public virtual void M() {} int P { get; } }");
        assert!(events(&tree).is_empty());
    }
}
