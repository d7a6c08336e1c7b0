//! # sqlqb
//!
//! A composable SQL fragment builder.
//!
//! ## Features
//!
//! - **Fragments all the way down**: conditions, expressions and whole
//!   statements implement one [`Fragment`] trait and nest freely
//! - **Deterministic output**: condition maps render their columns in sorted order
//! - **Dialect-agnostic**: fragments use `?`; the outermost statement rewrites
//!   markers into `$N`, `:N` or `@pN` in one pass
//! - **Immutable builders**: each chained call returns a new snapshot; cloning is cheap
//! - **Bring your own driver**: statements execute through an injected [`Runner`]
//!
//! ## Usage
//!
//! ```ignore
//! use sqlqb::prelude::*;
//!
//! let (sql, args) = StatementBuilder::new()
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .select(["id", "name"])
//!     .from("users")
//!     .and_where(Eq::new().with("status", "active"))
//!     .and_where(Or::new().with(Gt::new().with("age", 18)).with(Eq::new().with("verified", true)))
//!     .order_by("id DESC")
//!     .limit(10)
//!     .render()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id, name FROM users WHERE status = $1 AND (age > $2 OR verified = $3) ORDER BY id DESC LIMIT 10"
//! );
//! assert_eq!(args.len(), 3);
//! ```

pub mod debug;
pub mod error;
pub mod prelude;
pub mod qb;
pub mod runner;

#[cfg(feature = "postgres")]
pub mod pg;

pub use debug::debug_sql;
pub use error::{QbError, QbResult};
pub use runner::{Row, Runner};

pub use qb::{
    Alias, And, Arg, BoolTree, ConcatExpr, ConditionMap, Connective, Eq, Expr, Fragment, Gt,
    GtOrEq, ILike, Like, LikeLower, LikeLowerPercentPrefix, LikeLowerPercentPrefixSuffix,
    LikeLowerPercentSuffix, Lt, LtOrEq, NotEq, NotILike, NotLike, NotLikeLower,
    NotLikeLowerPercentPrefix, NotLikeLowerPercentPrefixSuffix, NotLikeLowerPercentSuffix,
    Operand, Or, PlaceholderFormat, SelectBuilder, StatementBuilder, Value, expr, placeholders,
    select,
};

#[cfg(feature = "postgres")]
pub use pg::pg_params;
