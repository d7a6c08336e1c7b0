//! SELECT statement builder.
//!
//! Every chained call consumes the builder and returns the next snapshot.
//! Clauses hold their parts as shared fragments, so cloning a builder to
//! branch off a variant is cheap.

use crate::error::{QbError, QbResult};
use crate::qb::cond::ConditionMap;
use crate::qb::expr::Alias;
use crate::qb::param::Value;
use crate::qb::placeholder::PlaceholderFormat;
use crate::qb::traits::Fragment;
use crate::runner::{trace_render_error, trace_sql, Row, Runner};
use std::sync::Arc;

/// A join clause, optionally introduced by a keyword (`LEFT JOIN`, ...).
#[derive(Clone, Debug)]
struct JoinPart {
    keyword: Option<&'static str>,
    clause: Arc<dyn Fragment>,
}

impl Fragment for JoinPart {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        let (sql, args) = self.clause.render_nested()?;
        match self.keyword {
            Some(keyword) if !sql.is_empty() => Ok((format!("{} {}", keyword, sql), args)),
            _ => Ok((sql, args)),
        }
    }
}

/// SELECT statement builder.
///
/// # Example
/// ```ignore
/// use sqlqb::prelude::*;
///
/// let (sql, args) = select(["id", "name"])
///     .from("users")
///     .and_where(Eq::new().with("status", "active"))
///     .order_by("id DESC")
///     .limit(10)
///     .placeholder_format(PlaceholderFormat::Dollar)
///     .render()?;
///
/// assert_eq!(sql, "SELECT id, name FROM users WHERE status = $1 ORDER BY id DESC LIMIT 10");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    placeholder: PlaceholderFormat,
    independent_placeholders: bool,
    runner: Option<Arc<dyn Runner>>,

    prefixes: Vec<Arc<dyn Fragment>>,
    options: Vec<String>,
    distinct: bool,
    columns: Vec<Arc<dyn Fragment>>,
    from: Option<Arc<dyn Fragment>>,
    joins: Vec<Arc<dyn Fragment>>,
    where_parts: Vec<Arc<dyn Fragment>>,
    group_bys: Vec<String>,
    having_parts: Vec<Arc<dyn Fragment>>,
    order_bys: Vec<Arc<dyn Fragment>>,
    limit: Option<u64>,
    offset: Option<u64>,
    row_limit: Option<u64>,
    page: Option<u64>,
    count_all: bool,
    suffixes: Vec<Arc<dyn Fragment>>,
}

impl SelectBuilder {
    /// Empty builder: no columns, `?` placeholders, no runner.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_config(placeholder: PlaceholderFormat, runner: Option<Arc<dyn Runner>>) -> Self {
        Self {
            placeholder,
            runner,
            ..Self::default()
        }
    }

    // ==================== Configuration ====================

    /// Set the placeholder dialect applied when this builder is rendered.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.placeholder = format;
        self
    }

    /// Current placeholder dialect.
    pub fn placeholder(&self) -> PlaceholderFormat {
        self.placeholder
    }

    /// Apply this builder's own placeholder format even when it is nested in
    /// another fragment. Its markers are then numbered on their own and left
    /// alone by the enclosing statement.
    pub fn independent_placeholders(mut self) -> Self {
        self.independent_placeholders = true;
        self
    }

    /// Attach the runner used by [`exec`](Self::exec), [`query`](Self::query),
    /// [`query_row`](Self::query_row) and [`scan`](Self::scan).
    pub fn run_with(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self
    }

    // ==================== Prefix / suffix ====================

    /// Add a fragment rendered before `SELECT` (e.g. a `WITH` clause).
    pub fn prefix<F: Fragment + 'static>(mut self, part: F) -> Self {
        self.prefixes.push(Arc::new(part));
        self
    }

    /// Add a fragment rendered after everything else.
    pub fn suffix<F: Fragment + 'static>(mut self, part: F) -> Self {
        self.suffixes.push(Arc::new(part));
        self
    }

    // ==================== SELECT columns ====================

    /// Add `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Add a keyword between `SELECT` and the column list (e.g. `SQL_NO_CACHE`).
    pub fn options(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Append plain result columns.
    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for col in cols {
            let col: String = col.into();
            self.columns.push(Arc::new(col));
        }
        self
    }

    /// Append a result column that may carry arguments (`Expr`, `Alias`, ...).
    pub fn column<F: Fragment + 'static>(mut self, col: F) -> Self {
        self.columns.push(Arc::new(col));
        self
    }

    /// Drop every result column.
    pub fn remove_columns(mut self) -> Self {
        self.columns.clear();
        self
    }

    // ==================== FROM / JOIN ====================

    pub fn from(mut self, table: impl Into<String>) -> Self {
        let table: String = table.into();
        self.from = Some(Arc::new(table));
        self
    }

    /// `FROM (<sub-select>) AS alias`.
    pub fn from_select(mut self, sub: SelectBuilder, alias: impl Into<String>) -> Self {
        self.from = Some(Arc::new(Alias::new(sub, alias)));
        self
    }

    /// Add a raw join clause, keyword included.
    pub fn join_clause<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(None, clause)
    }

    /// `JOIN <clause>`
    pub fn join<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(Some("JOIN"), clause)
    }

    /// `LEFT JOIN <clause>`
    pub fn left_join<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(Some("LEFT JOIN"), clause)
    }

    /// `RIGHT JOIN <clause>`
    pub fn right_join<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(Some("RIGHT JOIN"), clause)
    }

    /// `INNER JOIN <clause>`
    pub fn inner_join<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(Some("INNER JOIN"), clause)
    }

    /// `CROSS JOIN <clause>`
    pub fn cross_join<F: Fragment + 'static>(self, clause: F) -> Self {
        self.push_join(Some("CROSS JOIN"), clause)
    }

    fn push_join<F: Fragment + 'static>(mut self, keyword: Option<&'static str>, clause: F) -> Self {
        self.joins.push(Arc::new(JoinPart {
            keyword,
            clause: Arc::new(clause),
        }));
        self
    }

    // ==================== WHERE ====================

    /// Add a WHERE condition. Conditions are joined with `AND`; a condition
    /// that renders empty (`""`, `None`) is skipped.
    pub fn and_where<F: Fragment + 'static>(mut self, pred: F) -> Self {
        self.where_parts.push(Arc::new(pred));
        self
    }

    /// Add a condition map, leaving out entries bound to the empty string.
    /// Nothing is added when no entry remains.
    pub fn where_escape_empty_params<M: ConditionMap>(mut self, map: M) -> Self {
        let kept = map.without_empty_strings();
        if !kept.is_empty() {
            self.where_parts.push(Arc::new(kept));
        }
        self
    }

    /// Whether any WHERE condition would be rendered.
    pub fn has_where_parts(&self) -> bool {
        self.where_parts.iter().any(|part| match part.render_nested() {
            Ok((sql, _)) => !sql.is_empty(),
            Err(_) => true,
        })
    }

    // ==================== GROUP BY / HAVING / ORDER BY ====================

    pub fn group_by(mut self, col: impl Into<String>) -> Self {
        self.group_bys.push(col.into());
        self
    }

    /// Add a HAVING condition, joined to the others with `AND`.
    pub fn having<F: Fragment + 'static>(mut self, pred: F) -> Self {
        self.having_parts.push(Arc::new(pred));
        self
    }

    /// Add a plain ORDER BY item, e.g. `"id DESC"`.
    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        let clause: String = clause.into();
        self.order_bys.push(Arc::new(clause));
        self
    }

    /// Add an ORDER BY item that carries arguments.
    pub fn order_by_clause<F: Fragment + 'static>(mut self, clause: F) -> Self {
        self.order_bys.push(Arc::new(clause));
        self
    }

    // ==================== Pagination ====================

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn remove_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn remove_offset(mut self) -> Self {
        self.offset = None;
        self
    }

    /// Rows per page for `rnum`-style paging (Oracle `ROWNUM`).
    ///
    /// The statement is wrapped as
    /// `SELECT * FROM (<inner>) WHERE rnum >= lo AND rnum < hi`, so the inner
    /// column list must expose the row number as `rnum`.
    pub fn limit_row_num(mut self, n: u64) -> Self {
        self.row_limit = Some(n);
        self
    }

    /// 1-based page used with [`limit_row_num`](Self::limit_row_num). Values
    /// below 1 are treated as 1.
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Wrap the statement as `SELECT COUNT(*) FROM (<inner>)`.
    ///
    /// Takes precedence over row-number paging.
    pub fn count_all(mut self, enabled: bool) -> Self {
        self.count_all = enabled;
        self
    }

    // ==================== Build helpers ====================

    fn render_raw(&self) -> QbResult<(String, Vec<Value>)> {
        if self.columns.is_empty() {
            return Err(QbError::NoColumns);
        }

        let mut sql = String::new();
        let mut args = Vec::new();

        let prefix = join_parts(&self.prefixes, " ", &mut args)?;
        if !prefix.is_empty() {
            sql.push_str(&prefix);
            sql.push(' ');
        }

        sql.push_str("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        for option in &self.options {
            sql.push_str(option);
            sql.push(' ');
        }

        let columns = join_parts(&self.columns, ", ", &mut args)?;
        if columns.is_empty() {
            return Err(QbError::NoColumns);
        }
        sql.push_str(&columns);

        if let Some(from) = &self.from {
            let (from_sql, from_args) = from.render_nested()?;
            if !from_sql.is_empty() {
                sql.push_str(" FROM ");
                sql.push_str(&from_sql);
                args.extend(from_args);
            }
        }

        let joins = join_parts(&self.joins, " ", &mut args)?;
        if !joins.is_empty() {
            sql.push(' ');
            sql.push_str(&joins);
        }

        let where_sql = join_parts(&self.where_parts, " AND ", &mut args)?;
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.group_bys.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_bys.join(", "));
        }

        let having = join_parts(&self.having_parts, " AND ", &mut args)?;
        if !having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&having);
        }

        let order = join_parts(&self.order_bys, ", ", &mut args)?;
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        let suffix = join_parts(&self.suffixes, " ", &mut args)?;
        if !suffix.is_empty() {
            sql.push(' ');
            sql.push_str(&suffix);
        }

        Ok((sql, args))
    }

    /// Full statement with generic `?` markers, count/page wrapping applied.
    fn render_statement(&self) -> QbResult<(String, Vec<Value>)> {
        let (inner, args) = self.render_raw()?;

        if self.count_all {
            return Ok((format!("SELECT COUNT(*) FROM ({})", inner), args));
        }

        if let Some(per_page) = self.row_limit {
            let page = self.page.unwrap_or(1).max(1);
            let bounds = (page - 1)
                .checked_mul(per_page)
                .and_then(|skip| skip.checked_add(1))
                .and_then(|lo| lo.checked_add(per_page).map(|hi| (lo, hi)));
            let Some((lo, hi)) = bounds else {
                return Err(QbError::validation(format!(
                    "row-number page {} of size {} is out of range",
                    page, per_page
                )));
            };
            return Ok((
                format!("SELECT * FROM ({}) WHERE rnum >= {} AND rnum < {}", inner, lo, hi),
                args,
            ));
        }

        Ok((inner, args))
    }

    /// Render, panicking on error. Meant for tests and static initialization.
    pub fn must_sql(&self) -> (String, Vec<Value>) {
        match self.render() {
            Ok(out) => out,
            Err(e) => panic!("{}", e),
        }
    }

    /// SQL with arguments inlined as literals, for logs only.
    pub fn debug_sql(&self) -> String {
        crate::debug::debug_sql(self)
    }

    // ==================== Execution ====================

    fn runner(&self) -> QbResult<&Arc<dyn Runner>> {
        self.runner.as_ref().ok_or(QbError::RunnerNotSet)
    }

    /// Render and execute; returns the affected row count.
    pub fn exec(&self) -> QbResult<u64> {
        let runner = self.runner()?;
        let (sql, args) = self.render()?;
        trace_sql("exec", &sql, args.len());
        runner.exec(&sql, &args)
    }

    /// Render and run as a query.
    pub fn query(&self) -> QbResult<Vec<Row>> {
        let runner = self.runner()?;
        let (sql, args) = self.render()?;
        trace_sql("query", &sql, args.len());
        runner.query(&sql, &args)
    }

    /// Render and fetch at most one row.
    pub fn query_row(&self) -> QbResult<Option<Row>> {
        let runner = self.runner()?;
        let (sql, args) = self.render()?;
        trace_sql("query_row", &sql, args.len());
        runner.query_row(&sql, &args)
    }

    /// Fetch exactly one row; `QbError::NoRows` when the query returns none.
    pub fn scan(&self) -> QbResult<Row> {
        self.query_row()?.ok_or(QbError::NoRows)
    }
}

/// Render `parts` (nested), skip empty ones and join the rest with `sep`.
fn join_parts(parts: &[Arc<dyn Fragment>], sep: &str, args: &mut Vec<Value>) -> QbResult<String> {
    let mut rendered = Vec::with_capacity(parts.len());
    for part in parts {
        let (sql, part_args) = part.render_nested()?;
        if sql.is_empty() {
            continue;
        }
        rendered.push(sql);
        args.extend(part_args);
    }
    Ok(rendered.join(sep))
}

impl Fragment for SelectBuilder {
    fn render(&self) -> QbResult<(String, Vec<Value>)> {
        match self.render_statement() {
            Ok((sql, args)) => Ok((self.placeholder.replace_placeholders(&sql), args)),
            Err(e) => {
                trace_render_error(&e);
                Err(e)
            }
        }
    }

    fn render_nested(&self) -> QbResult<(String, Vec<Value>)> {
        if self.independent_placeholders {
            match self.render_statement() {
                Ok((sql, args)) => Ok((self.placeholder.replace_placeholders_nested(&sql), args)),
                Err(e) => {
                    trace_render_error(&e);
                    Err(e)
                }
            }
        } else {
            self.render_statement()
        }
    }
}
