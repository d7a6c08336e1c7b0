//! Literal-inlining renderer for logs and error messages.
//!
//! The output is not escaped for safe execution; never send it to a database.

use crate::qb::{Fragment, Value};

/// Render `fragment` and substitute every `?` marker with its argument as a
/// SQL literal. `??` becomes a literal `?`.
///
/// Only generic `?` markers are inlined. A nested builder marked
/// [`independent_placeholders`](crate::qb::SelectBuilder::independent_placeholders)
/// with a numbered format has already written its own `$N`/`:N`/`@pN`
/// markers; those stay in the text and leave its arguments unmatched, which
/// is reported as an argument mismatch.
///
/// Failures are reported inline as `[debug_sql error: ...]`.
pub fn debug_sql(fragment: &dyn Fragment) -> String {
    let (sql, args) = match fragment.render_nested() {
        Ok(out) => out,
        Err(e) => return format!("[debug_sql error: {}]", e),
    };

    let mut out = String::with_capacity(sql.len() + args.len() * 8);
    let mut pending = args.iter();
    let mut rest = sql.as_str();

    while let Some(pos) = rest.find('?') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(after) = rest.strip_prefix('?') {
            out.push('?');
            rest = after;
            continue;
        }

        match pending.next() {
            Some(value) => out.push_str(&literal(value)),
            None => return format!("[debug_sql error: not enough arguments for `{}`]", sql),
        }
    }
    out.push_str(rest);

    if pending.next().is_some() {
        return format!("[debug_sql error: too many arguments for `{}`]", sql);
    }
    out
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int(_) | Value::UInt(_) | Value::Float(_) => value.to_string(),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}
