//! Shared builder configuration.

use crate::qb::placeholder::PlaceholderFormat;
use crate::qb::select::SelectBuilder;
use crate::runner::Runner;
use std::sync::Arc;

/// Configuration handed to every builder it creates.
///
/// A plain value: configure it once (e.g. `PlaceholderFormat::Dollar` plus a
/// runner) and start statements from it. `Default` is `?` placeholders and no
/// runner.
///
/// ```ignore
/// let pg = StatementBuilder::new().placeholder_format(PlaceholderFormat::Dollar);
/// let (sql, _) = pg.select(["*"]).from("users").and_where(Expr::new("id = ?", args![1])).render()?;
/// assert_eq!(sql, "SELECT * FROM users WHERE id = $1");
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatementBuilder {
    placeholder: PlaceholderFormat,
    runner: Option<Arc<dyn Runner>>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.placeholder = format;
        self
    }

    pub fn run_with(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn placeholder(&self) -> PlaceholderFormat {
        self.placeholder
    }

    /// Start a SELECT with this configuration.
    pub fn select<I, S>(&self, cols: I) -> SelectBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectBuilder::with_config(self.placeholder, self.runner.clone()).columns(cols)
    }
}

/// `StatementBuilder::default().select(cols)`.
pub fn select<I, S>(cols: I) -> SelectBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StatementBuilder::default().select(cols)
}
