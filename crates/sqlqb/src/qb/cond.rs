//! Condition maps: column → value mappings rendered as a conjunction.
//!
//! Every map type keeps its entries in a `BTreeMap`, so columns always render
//! in ascending order no matter how they were inserted.
//!
//! ```ignore
//! use sqlqb::{Eq, Fragment};
//!
//! let (sql, args) = Eq::new().with("b", 2).with("a", vec![1, 3]).render()?;
//! assert_eq!(sql, "a IN (?,?) AND b = ?");
//! ```

use crate::error::{QbError, QbResult};
use crate::qb::param::{Operand, Value};
use crate::qb::traits::Fragment;
use std::collections::BTreeMap;

pub(crate) const SQL_TRUE: &str = "(1=1)";
pub(crate) const SQL_FALSE: &str = "(1=0)";

/// Wildcards spliced around the bound parameter of the `LikeLower*` family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wildcard {
    None,
    Prefix,
    Suffix,
    Both,
}

impl Wildcard {
    fn param(self) -> &'static str {
        match self {
            Wildcard::None => "?",
            Wildcard::Prefix => "'%' || ?",
            Wildcard::Suffix => "? || '%'",
            Wildcard::Both => "'%' || ? || '%'",
        }
    }
}

/// How a map renders each of its entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Comparison {
    /// `=` / `<>` with NULL and IN-list handling.
    Equality { negated: bool },
    /// `<`, `<=`, `>`, `>=`.
    Ordering(&'static str),
    /// `LIKE`, `NOT LIKE`, `ILIKE`, `NOT ILIKE`.
    Like(&'static str),
    /// `lower(col) [NOT ]LIKE lower(...)`.
    LikeLower { negated: bool, wildcard: Wildcard },
}

impl Comparison {
    fn render_entry(self, column: &str, operand: &Operand, args: &mut Vec<Value>) -> QbResult<String> {
        match self {
            Comparison::Equality { negated } => Ok(match operand {
                Operand::Null => {
                    if negated {
                        format!("{} IS NOT NULL", column)
                    } else {
                        format!("{} IS NULL", column)
                    }
                }
                Operand::List(values) if values.is_empty() => {
                    // NOT IN () holds vacuously, IN () never does.
                    let sql = if negated { SQL_TRUE } else { SQL_FALSE };
                    sql.to_string()
                }
                Operand::List(values) => {
                    args.extend(values.iter().cloned());
                    let op = if negated { "NOT IN" } else { "IN" };
                    format!("{} {} ({})", column, op, placeholders(values.len()))
                }
                Operand::Scalar(value) => {
                    args.push(value.clone());
                    let op = if negated { "<>" } else { "=" };
                    format!("{} {} ?", column, op)
                }
            }),
            Comparison::Ordering(op) => {
                let value = scalar(operand, "less than or greater than")?;
                args.push(value.clone());
                Ok(format!("{} {} ?", column, op))
            }
            Comparison::Like(op) => {
                let value = scalar(operand, "like")?;
                args.push(value.clone());
                Ok(format!("{} {} ?", column, op))
            }
            Comparison::LikeLower { negated, wildcard } => {
                let value = scalar(operand, "like")?;
                args.push(value.clone());
                let op = if negated { "NOT LIKE" } else { "LIKE" };
                Ok(format!("lower({}) {} lower({})", column, op, wildcard.param()))
            }
        }
    }
}

fn scalar<'a>(operand: &'a Operand, family: &'static str) -> QbResult<&'a Value> {
    match operand {
        Operand::Scalar(value) => Ok(value),
        Operand::Null => Err(QbError::NullOperand(family)),
        Operand::List(_) => Err(QbError::ListOperand(family)),
    }
}

/// `n` generic markers joined by commas: `placeholders(3) == "?,?,?"`.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

fn render_map(entries: &BTreeMap<String, Operand>, cmp: Comparison) -> QbResult<(String, Vec<Value>)> {
    if entries.is_empty() {
        return Ok((SQL_TRUE.to_string(), Vec::new()));
    }

    let mut args = Vec::new();
    let parts = entries
        .iter()
        .map(|(column, operand)| cmp.render_entry(column, operand, &mut args))
        .collect::<QbResult<Vec<_>>>()?;
    Ok((parts.join(" AND "), args))
}

/// Shared behaviour of every condition-map type.
pub trait ConditionMap: Fragment + Clone + 'static {
    /// Entries in rendering order.
    fn entries(&self) -> &BTreeMap<String, Operand>;

    /// Copy of this map without entries bound to the empty string.
    fn without_empty_strings(&self) -> Self;

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

macro_rules! condition_maps {
    ($($(#[$doc:meta])* $name:ident => $cmp:expr;)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct $name(BTreeMap<String, Operand>);

            impl $name {
                pub fn new() -> Self {
                    Self::default()
                }

                /// Add (or replace) the condition for `column`.
                pub fn with(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
                    self.0.insert(column.into(), value.into());
                    self
                }

                /// In-place variant of [`Self::with`].
                pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Operand>) -> &mut Self {
                    self.0.insert(column.into(), value.into());
                    self
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }
            }

            impl ConditionMap for $name {
                fn entries(&self) -> &BTreeMap<String, Operand> {
                    &self.0
                }

                fn without_empty_strings(&self) -> Self {
                    Self(
                        self.0
                            .iter()
                            .filter(|(_, v)| !v.is_empty_text())
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .collect(),
                    )
                }
            }

            impl Fragment for $name {
                fn render(&self) -> QbResult<(String, Vec<Value>)> {
                    render_map(&self.0, $cmp)
                }
            }

            impl<K: Into<String>, V: Into<Operand>> FromIterator<(K, V)> for $name {
                fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
                }
            }

            impl<K: Into<String>, V: Into<Operand>, const N: usize> From<[(K, V); N]> for $name {
                fn from(entries: [(K, V); N]) -> Self {
                    entries.into_iter().collect()
                }
            }
        )*
    };
}

condition_maps! {
    /// `col = ?`, `col IN (...)`, `col IS NULL`.
    Eq => Comparison::Equality { negated: false };
    /// `col <> ?`, `col NOT IN (...)`, `col IS NOT NULL`.
    NotEq => Comparison::Equality { negated: true };
    /// `col < ?`
    Lt => Comparison::Ordering("<");
    /// `col <= ?`
    LtOrEq => Comparison::Ordering("<=");
    /// `col > ?`
    Gt => Comparison::Ordering(">");
    /// `col >= ?`
    GtOrEq => Comparison::Ordering(">=");
    /// `col LIKE ?`
    Like => Comparison::Like("LIKE");
    /// `col NOT LIKE ?`
    NotLike => Comparison::Like("NOT LIKE");
    /// `col ILIKE ?` (PostgreSQL)
    ILike => Comparison::Like("ILIKE");
    /// `col NOT ILIKE ?` (PostgreSQL)
    NotILike => Comparison::Like("NOT ILIKE");
    /// `lower(col) LIKE lower(?)`
    LikeLower => Comparison::LikeLower { negated: false, wildcard: Wildcard::None };
    /// `lower(col) LIKE lower('%' || ?)`
    LikeLowerPercentPrefix => Comparison::LikeLower { negated: false, wildcard: Wildcard::Prefix };
    /// `lower(col) LIKE lower(? || '%')`
    LikeLowerPercentSuffix => Comparison::LikeLower { negated: false, wildcard: Wildcard::Suffix };
    /// `lower(col) LIKE lower('%' || ? || '%')`
    LikeLowerPercentPrefixSuffix => Comparison::LikeLower { negated: false, wildcard: Wildcard::Both };
    /// `lower(col) NOT LIKE lower(?)`
    NotLikeLower => Comparison::LikeLower { negated: true, wildcard: Wildcard::None };
    /// `lower(col) NOT LIKE lower('%' || ?)`
    NotLikeLowerPercentPrefix => Comparison::LikeLower { negated: true, wildcard: Wildcard::Prefix };
    /// `lower(col) NOT LIKE lower(? || '%')`
    NotLikeLowerPercentSuffix => Comparison::LikeLower { negated: true, wildcard: Wildcard::Suffix };
    /// `lower(col) NOT LIKE lower('%' || ? || '%')`
    NotLikeLowerPercentPrefixSuffix => Comparison::LikeLower { negated: true, wildcard: Wildcard::Both };
}
