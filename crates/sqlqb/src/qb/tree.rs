//! AND/OR composition of fragments.

use crate::error::QbResult;
use crate::qb::cond::{SQL_FALSE, SQL_TRUE};
use crate::qb::param::Value;
use crate::qb::traits::Fragment;
use std::sync::Arc;

/// Boolean connective of a [`BoolTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn separator(self) -> &'static str {
        match self {
            Connective::And => " AND ",
            Connective::Or => " OR ",
        }
    }

    /// Rendering of a tree without conditions: AND of nothing holds, OR of nothing doesn't.
    fn empty_sql(self) -> &'static str {
        match self {
            Connective::And => SQL_TRUE,
            Connective::Or => SQL_FALSE,
        }
    }
}

/// Ordered fragments joined by one connective.
///
/// Child order is preserved. A non-empty tree renders parenthesized; a child
/// tree with the same connective is spliced flat, one with the other
/// connective keeps its own parentheses.
#[derive(Clone, Debug)]
pub struct BoolTree {
    connective: Connective,
    children: Vec<Arc<dyn Fragment>>,
}

impl BoolTree {
    pub fn new(connective: Connective) -> Self {
        Self {
            connective,
            children: Vec::new(),
        }
    }

    pub fn push<F: Fragment + 'static>(&mut self, child: F) {
        self.children.push(Arc::new(child));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn collect(&self, parts: &mut Vec<String>, args: &mut Vec<Value>) -> QbResult<()> {
        for child in &self.children {
            if let Some(tree) = child.as_tree() {
                if tree.connective == self.connective {
                    tree.collect(parts, args)?;
                    continue;
                }
            }

            let (sql, child_args) = child.render_nested()?;
            if sql.is_empty() {
                continue;
            }
            parts.push(sql);
            args.extend(child_args);
        }
        Ok(())
    }
}

impl Fragment for BoolTree {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        let mut parts = Vec::with_capacity(self.children.len());
        let mut args = Vec::new();
        self.collect(&mut parts, &mut args)?;

        if parts.is_empty() {
            return Ok((self.connective.empty_sql().to_string(), args));
        }
        Ok((format!("({})", parts.join(self.connective.separator())), args))
    }

    fn as_tree(&self) -> Option<&BoolTree> {
        Some(self)
    }
}

macro_rules! bool_trees {
    ($($(#[$doc:meta])* $name:ident => $connective:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug)]
            pub struct $name(BoolTree);

            impl $name {
                pub fn new() -> Self {
                    Self(BoolTree::new(Connective::$connective))
                }

                /// Append a child fragment.
                pub fn with<F: Fragment + 'static>(mut self, child: F) -> Self {
                    self.0.push(child);
                    self
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl Fragment for $name {
                fn render(&self) -> QbResult<(String, Vec<Value>)> {
                    self.0.render()
                }

                fn as_tree(&self) -> Option<&BoolTree> {
                    Some(&self.0)
                }
            }
        )*
    };
}

bool_trees! {
    /// All children must hold: `(a AND b AND ...)`.
    And => And;
    /// At least one child must hold: `(a OR b OR ...)`.
    Or => Or;
}
