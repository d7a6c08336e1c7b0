//! Dialect-specific placeholder rewriting.
//!
//! Fragments always render the generic `?` marker. The outermost statement
//! rewrites them once, left to right, with a running 1-based counter.

use crate::error::QbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder syntax of the target database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderFormat {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1, $2, ...` (PostgreSQL)
    Dollar,
    /// `:1, :2, ...` (Oracle)
    Colon,
    /// `@p1, @p2, ...` (SQL Server)
    AtP,
}

impl PlaceholderFormat {
    fn prefix(self) -> Option<&'static str> {
        match self {
            PlaceholderFormat::Question => None,
            PlaceholderFormat::Dollar => Some("$"),
            PlaceholderFormat::Colon => Some(":"),
            PlaceholderFormat::AtP => Some("@p"),
        }
    }

    /// Rewrite every `?` in `sql` into this dialect.
    ///
    /// `??` is an escaped literal `?`: numbered formats emit a single `?` and
    /// do not advance the counter. `Question` returns the text unchanged.
    pub fn replace_placeholders(self, sql: &str) -> String {
        self.rewrite(sql, false)
    }

    /// Like [`replace_placeholders`](Self::replace_placeholders), but `??`
    /// stays escaped. Used for SQL that an enclosing statement rewrites again.
    pub(crate) fn replace_placeholders_nested(self, sql: &str) -> String {
        self.rewrite(sql, true)
    }

    fn rewrite(self, sql: &str, keep_escapes: bool) -> String {
        let Some(prefix) = self.prefix() else {
            return sql.to_string();
        };

        let mut out = String::with_capacity(sql.len() + 16);
        let mut n = 0usize;
        let mut rest = sql;

        while let Some(pos) = rest.find('?') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];

            if let Some(after) = rest.strip_prefix('?') {
                out.push_str(if keep_escapes { "??" } else { "?" });
                rest = after;
                continue;
            }

            n += 1;
            out.push_str(prefix);
            out.push_str(&n.to_string());
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for PlaceholderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceholderFormat::Question => "question",
            PlaceholderFormat::Dollar => "dollar",
            PlaceholderFormat::Colon => "colon",
            PlaceholderFormat::AtP => "at_p",
        })
    }
}

impl FromStr for PlaceholderFormat {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(PlaceholderFormat::Question),
            "dollar" | "$" => Ok(PlaceholderFormat::Dollar),
            "colon" | ":" => Ok(PlaceholderFormat::Colon),
            "at_p" | "atp" | "@p" => Ok(PlaceholderFormat::AtP),
            other => Err(QbError::validation(format!(
                "unknown placeholder format '{}'",
                other
            ))),
        }
    }
}
