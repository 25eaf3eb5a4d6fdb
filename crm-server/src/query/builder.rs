use sqlx::Sqlite;
use sqlx::query::{Query, QueryScalar};

/// Query builder for constructing SQL queries with dynamic WHERE conditions
///
/// Conditions are joined with AND; bindings are positional and must be
/// pushed in the same order as the `?` placeholders they fill.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: Vec<String>,
    bindings: Vec<QueryValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition; bind its placeholders right after
    pub fn add_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.conditions.push(condition.into());
        self
    }

    /// Add a text binding
    pub fn bind_text(&mut self, value: impl Into<String>) -> &mut Self {
        self.bindings.push(QueryValue::Text(value.into()));
        self
    }

    /// Add an integer binding
    pub fn bind_i64(&mut self, value: i64) -> &mut Self {
        self.bindings.push(QueryValue::Integer(value));
        self
    }

    pub fn bind(&mut self, value: QueryValue) -> &mut Self {
        self.bindings.push(value);
        self
    }

    /// Case-insensitive substring match on a `*_fold` column
    ///
    /// SQLite only folds ASCII, so the column holds [`fold_case`] text and
    /// the needle is folded the same way here.
    pub fn add_contains(&mut self, fold_column: &str, needle: &str) -> &mut Self {
        self.add_condition(format!("{fold_column} LIKE ? ESCAPE '\\'"))
            .bind_text(contains_pattern(needle))
    }

    /// Prefix match on `column`
    pub fn add_starts_with(&mut self, column: &str, prefix: &str) -> &mut Self {
        self.add_condition(format!("{column} LIKE ? ESCAPE '\\'"))
            .bind_text(format!("{}%", escape_like(prefix)))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Build WHERE clause (empty if no conditions)
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Apply bindings to a SQLx query
    pub fn apply_bindings<'a, 'b>(
        &'b self,
        mut query: Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s),
                QueryValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }

    /// Apply bindings to a SQLx query_scalar
    pub fn apply_bindings_scalar<'a, 'b, O>(
        &'b self,
        mut query: QueryScalar<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> QueryScalar<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        O: Send + Unpin,
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s),
                QueryValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }
}

/// Escape LIKE wildcards so user input matches literally (escape char `\`)
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unicode lowercase, stored in `*_fold` columns and applied to needles
pub fn fold_case(raw: &str) -> String {
    raw.to_lowercase()
}

/// `%needle%` LIKE pattern over folded text
pub fn contains_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(&fold_case(needle)))
}

/// `?, ?, ?` for an IN list of `n` values
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
