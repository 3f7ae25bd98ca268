use crate::rules::{Context, Diagnostic, Rule};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Walks a syntax tree and hands every event member to the rules.
pub struct LinterVisitor<'a> {
    rules: &'a [Box<dyn Rule>],
    context: Context<'a>,
    /// Diagnostics collected during the traversal.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> LinterVisitor<'a> {
    /// Creates a visitor for one file.
    #[must_use]
    pub fn new(rules: &'a [Box<dyn Rule>], context: Context<'a>) -> Self {
        Self {
            rules,
            context,
            diagnostics: Vec::new(),
        }
    }

    /// Visits `node` and everything below it. Interface bodies are not visited.
    pub fn visit_node(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::EventFieldDeclaration | SyntaxKind::EventDeclaration => {
                for rule in self.rules {
                    if let Some(mut diagnostics) = rule.check_member(node, &self.context) {
                        self.diagnostics.append(&mut diagnostics);
                    }
                }
            }
            SyntaxKind::InterfaceDeclaration => {}
            _ => {
                for child in node.child_nodes() {
                    self.visit_node(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageTable;
    use crate::rules::get_rules;
    use crate::syntax::SyntaxTree;
    use std::path::Path;

    #[test]
    fn test_visits_nested_types_and_skips_interfaces() {
        let tree = SyntaxTree::parse(
            r"
namespace N
{
    public interface IEvents { event Action Skipped; }
    public class Outer
    {
        public virtual event Action A;
        private class Inner
        {
            protected virtual event EventHandler<EventArgs> B { add { b += value; } remove { b -= value; } }
        }
    }
    public struct S { public event Action NotVirtual; }
}
",
        );
        let rules = get_rules();
        let messages = MessageTable::default();
        let context = Context {
            filename: Path::new("N.cs"),
            line_index: tree.line_index(),
            messages: &messages,
        };
        let mut visitor = LinterVisitor::new(&rules, context);
        visitor.visit_node(tree.root());

        let names: Vec<_> = visitor
            .diagnostics
            .iter()
            .map(|d| (d.rule_id.as_str(), d.event_name.as_str()))
            .collect();
        assert_eq!(names, vec![("EVS-V001", "A"), ("EVS-V002", "B")]);
    }
}
