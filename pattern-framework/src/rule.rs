use crate::error::{Error, Result};
use crate::pattern::{Node, Pattern};
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) struct RuleCell {
    name: String,
    definition: OnceCell<Pattern>,
}

impl RuleCell {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn definition(&self) -> Option<&Pattern> {
        self.definition.get()
    }
}

/// A named, late-bound grammar rule used to build self-referential grammars.
///
/// The handle owns the rule's definition; patterns that mention the rule hold
/// only a weak reference, so a rule referring to itself does not leak. Keep
/// the handle alive for as long as any pattern using it is parsed.
///
/// ```
/// use pattern_framework::{lit, Rule};
///
/// let group = Rule::new("group");
/// group
///     .define(lit('{') >> group.pattern().list(',') >> '}')
///     .unwrap();
/// assert!(pattern_framework::check(&group.pattern(), "{{},{{}}}"));
/// ```
pub struct Rule {
    cell: Rc<RuleCell>,
}

impl Rule {
    /// Creates an undefined rule named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            cell: Rc::new(RuleCell {
                name: name.into(),
                definition: OnceCell::new(),
            }),
        }
    }

    /// Name used in error messages and logs.
    pub fn name(&self) -> &str {
        &self.cell.name
    }

    /// Returns true once [`Rule::define`] has been called.
    pub fn is_defined(&self) -> bool {
        self.cell.definition.get().is_some()
    }

    /// Binds the rule to its definition. A rule can be bound only once.
    pub fn define(&self, definition: Pattern) -> Result<()> {
        self.cell
            .definition
            .set(definition)
            .map_err(|_| Error::RuleAlreadyBound {
                name: self.cell.name.clone(),
            })
    }

    /// Returns a pattern referring to this rule.
    pub fn pattern(&self) -> Pattern {
        Pattern::from_node(Node::Rule(RuleRef {
            cell: Rc::downgrade(&self.cell),
            name: self.cell.name.as_str().into(),
        }))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.cell.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// Non-owning reference from a pattern to a rule.
#[derive(Clone)]
pub(crate) struct RuleRef {
    cell: Weak<RuleCell>,
    name: Rc<str>,
}

impl RuleRef {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn upgrade(&self) -> Option<Rc<RuleCell>> {
        self.cell.upgrade()
    }
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self.name)
    }
}

/// Strong references to every rule reachable from a root pattern.
///
/// Drivers build one before parsing: it proves that every rule is bound and
/// keeps the definitions alive for the duration of the parse.
#[derive(Default)]
pub(crate) struct RuleSet {
    rules: Vec<Rc<RuleCell>>,
}

impl RuleSet {
    pub(crate) fn collect(root: &Pattern) -> Result<Self> {
        let mut set = Self::default();
        set.visit(root)?;
        Ok(set)
    }

    fn visit(&mut self, pattern: &Pattern) -> Result<()> {
        if let Node::Rule(rule) = pattern.node() {
            let cell = rule.upgrade().ok_or_else(|| Error::UnboundRule {
                name: rule.name().to_string(),
            })?;
            if self.rules.iter().any(|seen| Rc::ptr_eq(seen, &cell)) {
                return Ok(());
            }
            let definition = cell.definition().cloned().ok_or_else(|| Error::UnboundRule {
                name: cell.name().to_string(),
            })?;
            self.rules.push(cell);
            return self.visit(&definition);
        }
        let mut result = Ok(());
        pattern.for_each_child(|child| {
            if result.is_ok() {
                result = self.visit(child);
            }
        });
        result
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{int, lit};

    #[test]
    fn test_define_twice_is_rejected() {
        let rule = Rule::new("value");
        rule.define(int()).unwrap();
        assert_eq!(
            rule.define(int()),
            Err(Error::RuleAlreadyBound {
                name: "value".to_string()
            })
        );
    }

    #[test]
    fn test_collect_reports_unbound_rule() {
        let rule = Rule::new("missing");
        let pattern = lit('(') >> rule.pattern() >> ')';
        match RuleSet::collect(&pattern) {
            Err(Error::UnboundRule { name }) => assert_eq!(name, "missing"),
            other => panic!("expected an unbound rule error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_collect_visits_recursive_rule_once() {
        let expr = Rule::new("expr");
        let term = Rule::new("term");
        term.define(int() | (lit('(') >> expr.pattern() >> ')'))
            .unwrap();
        expr.define(term.pattern().list('+')).unwrap();
        let set = RuleSet::collect(&expr.pattern()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_dropped_rule_is_unbound() {
        let pattern = {
            let rule = Rule::new("gone");
            rule.define(int()).unwrap();
            rule.pattern()
        };
        assert!(RuleSet::collect(&pattern).is_err());
    }
}
