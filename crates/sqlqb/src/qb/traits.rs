//! The fragment contract shared by every renderable piece of SQL.

use crate::error::QbResult;
use crate::qb::cond::Eq;
use crate::qb::param::{Operand, Value};
use crate::qb::tree::BoolTree;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A unit of SQL text plus the arguments bound to its `?` markers.
///
/// Anything implementing `Fragment` can be used wherever the builders accept
/// one: columns, FROM, joins, WHERE/HAVING, ORDER BY, prefixes and suffixes.
///
/// Contract: the returned SQL uses the generic `?` marker (unless a statement
/// builder applied its own placeholder format) and the number of returned
/// arguments equals the number of markers emitted.
pub trait Fragment: fmt::Debug + Send + Sync {
    /// Render to SQL text and its ordered arguments.
    fn render(&self) -> QbResult<(String, Vec<Value>)>;

    /// Render for splicing into an enclosing fragment.
    ///
    /// Statement builders override this to keep generic markers so that the
    /// outermost statement numbers all placeholders in one pass.
    fn render_nested(&self) -> QbResult<(String, Vec<Value>)> {
        self.render()
    }

    #[doc(hidden)]
    fn as_tree(&self) -> Option<&BoolTree> {
        None
    }
}

impl Fragment for &str {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        Ok(((*self).to_string(), Vec::new()))
    }
}

impl Fragment for String {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        Ok((self.clone(), Vec::new()))
    }
}

/// `None` renders as an empty fragment, which the builders drop.
impl<F: Fragment> Fragment for Option<F> {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        match self {
            Some(inner) => inner.render(),
            None => Ok((String::new(), Vec::new())),
        }
    }

    fn render_nested(&self) -> QbResult<(String, Vec<Value>)> {
        match self {
            Some(inner) => inner.render_nested(),
            None => Ok((String::new(), Vec::new())),
        }
    }

    fn as_tree(&self) -> Option<&BoolTree> {
        self.as_ref().and_then(Fragment::as_tree)
    }
}

impl<F: Fragment + ?Sized> Fragment for Box<F> {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        (**self).render()
    }

    fn render_nested(&self) -> QbResult<(String, Vec<Value>)> {
        (**self).render_nested()
    }

    fn as_tree(&self) -> Option<&BoolTree> {
        (**self).as_tree()
    }
}

impl<F: Fragment + ?Sized> Fragment for Arc<F> {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        (**self).render()
    }

    fn render_nested(&self) -> QbResult<(String, Vec<Value>)> {
        (**self).render_nested()
    }

    fn as_tree(&self) -> Option<&BoolTree> {
        (**self).as_tree()
    }
}

/// A plain map renders as an [`Eq`] condition map.
impl<V> Fragment for HashMap<String, V>
where
    V: Clone + Into<Operand> + fmt::Debug + Send + Sync,
{
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        self.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Eq>()
            .render()
    }
}

impl<V> Fragment for BTreeMap<String, V>
where
    V: Clone + Into<Operand> + fmt::Debug + Send + Sync,
{
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        self.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Eq>()
            .render()
    }
}
