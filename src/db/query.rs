//! List options passed from the HTTP layer down to the repository.

use std::collections::HashSet;

/// Filtering, restriction and ordering for a list query.
#[derive(Debug, Clone, Default)]
pub struct ListOptions<F> {
    /// Entity-specific equality filters.
    pub filter: F,
    /// Restrict results to these ids (the outcome of a search).
    pub only_ids: Option<HashSet<String>>,
    /// Comma separated field names, `-` prefix for descending.
    pub ordering: Option<String>,
    pub limit: Option<u32>,
}

impl<F: Default> ListOptions<F> {
    pub fn filtered(filter: F) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// Orderable fields of a collection and its default ordering.
pub struct SortSpec {
    /// `(query name, SQL column)` pairs.
    pub fields: &'static [(&'static str, &'static str)],
    pub default: &'static str,
}

impl SortSpec {
    /// Build an `ORDER BY` clause from a requested ordering.
    ///
    /// Only whitelisted columns ever reach the SQL text. Unknown fields are
    /// dropped, and the default applies when nothing usable remains.
    pub fn order_by(&self, requested: Option<&str>) -> String {
        let clauses = requested
            .map(|raw| self.resolve(raw))
            .filter(|clauses| !clauses.is_empty())
            .unwrap_or_else(|| self.resolve(self.default));

        format!("ORDER BY {}", clauses.join(", "))
    }

    fn resolve(&self, raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .filter_map(|term| {
                let (name, direction) = match term.strip_prefix('-') {
                    Some(name) => (name, "DESC"),
                    None => (term, "ASC"),
                };
                let column = self
                    .fields
                    .iter()
                    .find(|(field, _)| *field == name)
                    .map(|(_, column)| *column);
                if column.is_none() {
                    tracing::debug!("Ignoring unknown ordering field '{}'", name);
                }
                column.map(|column| format!("{} {}", column, direction))
            })
            .collect()
    }
}
