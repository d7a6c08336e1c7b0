//! Convenient imports for typical `sqlqb` usage.
//!
//! ```ignore
//! use sqlqb::prelude::*;
//! ```
//!
//! Only the connectives and the most common condition maps are included; the
//! full set lives in [`crate::qb`]. `Eq` is exported as a condition map and
//! shadows the `std` trait of the same name in glob imports.

pub use crate::args;
pub use crate::{
    Alias, And, Arg, ConcatExpr, Eq, Expr, Fragment, Gt, GtOrEq, Like, Lt, LtOrEq, NotEq, Or,
    PlaceholderFormat, QbError, QbResult, Row, Runner, SelectBuilder, StatementBuilder, Value,
    expr, select,
};
