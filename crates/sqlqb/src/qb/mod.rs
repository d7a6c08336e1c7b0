//! Composable SQL fragments and the SELECT statement builder.
//!
//! Everything here implements [`Fragment`]: it renders to SQL text with
//! generic `?` markers plus the ordered arguments bound to them. Fragments nest
//! freely; the outermost statement rewrites the markers into the configured
//! [`PlaceholderFormat`] in a single pass.
//!
//! # Usage
//!
//! ```ignore
//! use sqlqb::qb::*;
//! use sqlqb::args;
//!
//! let active = select(["id"]).from("sessions").and_where(Expr::raw("expires_at > now()"));
//!
//! let (sql, args) = StatementBuilder::new()
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .select(["u.id", "u.name"])
//!     .from("users u")
//!     .and_where(Eq::new().with("u.status", "active").with("u.role", vec!["admin", "owner"]))
//!     .and_where(Or::new().with(Expr::new("u.score > ?", args![10])).with(Eq::new().with("u.vip", true)))
//!     .and_where(Expr::new("u.id IN (?)", args![Arg::fragment(active)]))
//!     .order_by("u.id DESC")
//!     .limit(20)
//!     .render()?;
//! ```

mod cond;
mod expr;
mod param;
mod placeholder;
mod select;
mod statement;
mod traits;
mod tree;

pub use cond::{
    ConditionMap, Eq, Gt, GtOrEq, ILike, Like, LikeLower, LikeLowerPercentPrefix,
    LikeLowerPercentPrefixSuffix, LikeLowerPercentSuffix, Lt, LtOrEq, NotEq, NotILike, NotLike,
    NotLikeLower, NotLikeLowerPercentPrefix, NotLikeLowerPercentPrefixSuffix,
    NotLikeLowerPercentSuffix, placeholders,
};
pub use expr::{Alias, ConcatExpr, Expr, expr};
pub use param::{Arg, Operand, Value};
pub use placeholder::PlaceholderFormat;
pub use select::SelectBuilder;
pub use statement::{StatementBuilder, select};
pub use traits::Fragment;
pub use tree::{And, BoolTree, Connective, Or};

#[cfg(test)]
mod tests;
