//! Raw SQL expressions.
//!
//! - [`Expr`]: literal SQL with `?` placeholders; fragment arguments are
//!   rendered and spliced in at their marker.
//! - [`ConcatExpr`]: concatenation of literal SQL and fragments.
//! - [`Alias`]: `(<fragment>) AS name`.

use crate::error::{QbError, QbResult};
use crate::qb::param::{Arg, Value};
use crate::qb::traits::Fragment;
use std::sync::Arc;

/// Literal SQL with positional arguments.
///
/// # Example
/// ```ignore
/// let e = Expr::new("a > ?", args![100]);
/// // Fragment arguments are spliced at their marker:
/// let e = Expr::new("x = ? OR y IN (?)", args![1, Arg::fragment(sub_select)]);
/// ```
#[derive(Clone, Debug)]
pub struct Expr {
    sql: String,
    args: Vec<Arg>,
}

/// Shorthand for [`Expr::new`].
pub fn expr(sql: impl Into<String>, args: Vec<Arg>) -> Expr {
    Expr::new(sql, args)
}

impl Expr {
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// SQL without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// Walk the SQL, replacing each `?` bound to a fragment with that
    /// fragment's rendering. `??` is an escaped `?` and is copied unchanged.
    fn splice(&self) -> QbResult<(String, Vec<Value>)> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut args = Vec::with_capacity(self.args.len());
        let mut pending = self.args.iter();
        let mut rest = self.sql.as_str();

        while let Some(pos) = rest.find('?') {
            sql.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];

            if let Some(after) = rest.strip_prefix('?') {
                sql.push_str("??");
                rest = after;
                continue;
            }

            match pending.next() {
                Some(Arg::Value(value)) => {
                    sql.push('?');
                    args.push(value.clone());
                }
                Some(Arg::Fragment(fragment)) => {
                    let (nested_sql, nested_args) = fragment.render_nested()?;
                    sql.push_str(&nested_sql);
                    args.extend(nested_args);
                }
                None => sql.push('?'),
            }
        }
        sql.push_str(rest);

        for leftover in pending {
            match leftover {
                Arg::Value(value) => args.push(value.clone()),
                Arg::Fragment(fragment) => {
                    return Err(QbError::validation(format!(
                        "expression `{}` has no placeholder for fragment argument {:?}",
                        self.sql, fragment
                    )));
                }
            }
        }

        Ok((sql, args))
    }
}

impl Fragment for Expr {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        if self.args.iter().any(Arg::is_fragment) {
            return self.splice();
        }

        let args = self
            .args
            .iter()
            .filter_map(|arg| match arg {
                Arg::Value(value) => Some(value.clone()),
                Arg::Fragment(_) => None,
            })
            .collect();
        Ok((self.sql.clone(), args))
    }
}

/// Concatenation of literal SQL and fragments, with no separator.
///
/// Text values are literal SQL; any other value is rejected at render time.
///
/// # Example
/// ```ignore
/// let c = ConcatExpr::new(args![
///     "COALESCE(name,",
///     Arg::fragment(Expr::new("CONCAT(?,' ',?)", args!["f", "l"])),
///     ")",
/// ]);
/// ```
#[derive(Clone, Debug)]
pub struct ConcatExpr {
    parts: Vec<Arg>,
}

impl ConcatExpr {
    pub fn new(parts: Vec<Arg>) -> Self {
        Self { parts }
    }
}

impl Fragment for ConcatExpr {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        let mut sql = String::new();
        let mut args = Vec::new();

        for part in &self.parts {
            match part {
                Arg::Value(Value::Text(text)) => sql.push_str(text),
                Arg::Fragment(fragment) => {
                    let (part_sql, part_args) = fragment.render_nested()?;
                    sql.push_str(&part_sql);
                    args.extend(part_args);
                }
                Arg::Value(other) => return Err(QbError::UnsupportedPart(other.to_string())),
            }
        }

        Ok((sql, args))
    }
}

/// `(<fragment>) AS name`, for aliased columns and sub-selects.
#[derive(Clone, Debug)]
pub struct Alias {
    inner: Arc<dyn Fragment>,
    name: String,
}

impl Alias {
    pub fn new<F: Fragment + 'static>(inner: F, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(inner),
            name: name.into(),
        }
    }
}

impl Fragment for Alias {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        let (sql, args) = self.inner.render_nested()?;
        Ok((format!("({}) AS {}", sql, self.name), args))
    }
}
