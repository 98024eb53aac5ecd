//! Structural markup rules applied per document kind.

/// A properties element that, when present, must be the first child of its parent.
#[derive(Debug, Clone, Copy)]
pub struct FirstChildRule {
    /// Parent local name
    pub parent: &'static str,
    /// Child local name
    pub child: &'static str,
    /// Sibling local names the schema allows ahead of the child
    pub preceded_by: &'static [&'static str],
}

impl FirstChildRule {
    /// `child` must lead `parent`.
    pub const fn new(parent: &'static str, child: &'static str) -> Self {
        Self {
            parent,
            child,
            preceded_by: &[],
        }
    }

    /// Allow `names` ahead of the child.
    pub const fn after(mut self, names: &'static [&'static str]) -> Self {
        self.preceded_by = names;
        self
    }

    /// Whether a sibling named `name` may come before the child.
    pub fn may_precede(&self, name: &str) -> bool {
        self.preceded_by.iter().any(|n| *n == name)
    }
}

/// A child element the parent must contain.
#[derive(Debug, Clone, Copy)]
pub struct RequiredChildRule {
    /// Parent local name
    pub parent: &'static str,
    /// Child local name
    pub child: &'static str,
}

/// Rules over the elements of one namespace.
#[derive(Debug)]
pub struct MarkupRules {
    /// Namespace both parent and child belong to
    pub namespace: &'static str,
    /// Ordering rules
    pub first_child: &'static [FirstChildRule],
    /// Content rules
    pub required_children: &'static [RequiredChildRule],
}

impl MarkupRules {
    /// Ordering rules for `parent`.
    pub fn first_child_rules<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'static FirstChildRule> + 'a {
        let rules: &'static [FirstChildRule] = self.first_child;
        rules.iter().filter(move |r| r.parent == parent)
    }

    /// Content rules for `parent`.
    pub fn required_child_rules<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'static RequiredChildRule> + 'a {
        let rules: &'static [RequiredChildRule] = self.required_children;
        rules.iter().filter(move |r| r.parent == parent)
    }
}
