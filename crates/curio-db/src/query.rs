//! Composable item query building.
//!
//! An [`ItemQuery`] is an immutable builder: filter, ordering, and
//! projection lists held by value. A [`QueryClause`] consumes a builder
//! and returns the extended one, so any number of clauses compose against
//! the same query without shared mutable state, and the rendered SQL
//! depends only on the set of effects applied.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;
use uuid::Uuid;

/// A value bound into the rendered query at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Uuid(Uuid),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bool(bool),
}

/// Sort direction for an ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// An immutable query descriptor over the `item` table.
///
/// Columns and expressions are supplied by trusted clause code, never by
/// callers; only [`Bind`] values reach the database as parameters.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    filters: Vec<(String, Bind)>,
    orders: Vec<(String, SortDir)>,
    projections: Vec<(String, String)>,
}

impl ItemQuery {
    /// Start an empty query; clauses and projections are layered on top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter `column = $n`.
    pub fn filter_eq(mut self, column: &str, value: Bind) -> Self {
        self.filters.push((column.to_string(), value));
        self
    }

    /// Add an ordering key.
    pub fn order_by(mut self, column: &str, dir: SortDir) -> Self {
        self.orders.push((column.to_string(), dir));
        self
    }

    /// Add a projected output column under an alias.
    pub fn project(mut self, expr: &str, alias: &str) -> Self {
        self.projections.push((expr.to_string(), alias.to_string()));
        self
    }

    /// Apply a clause, returning the extended query.
    pub fn apply(self, clause: &dyn QueryClause) -> Self {
        clause.apply(self)
    }

    /// Filter predicates added so far, for inspection in tests.
    pub fn filters(&self) -> &[(String, Bind)] {
        &self.filters
    }

    /// Ordering keys added so far.
    pub fn orders(&self) -> &[(String, SortDir)] {
        &self.orders
    }

    /// Projected columns added so far.
    pub fn projections(&self) -> &[(String, String)] {
        &self.projections
    }

    /// Render the query to SQL plus its bind values.
    ///
    /// Deterministic: the same builder state always renders the same text.
    /// A query with no projections selects `item.*`.
    pub fn to_sql(&self) -> (String, Vec<Bind>) {
        let select = if self.projections.is_empty() {
            "item.*".to_string()
        } else {
            self.projections
                .iter()
                .map(|(expr, alias)| format!("{} AS {}", expr, alias))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM item", select);

        if !self.filters.is_empty() {
            let predicates: Vec<String> = self
                .filters
                .iter()
                .enumerate()
                .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if !self.orders.is_empty() {
            let keys: Vec<String> = self
                .orders
                .iter()
                .map(|(column, dir)| format!("{} {}", column, dir.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        let binds = self.filters.iter().map(|(_, b)| b.clone()).collect();
        (sql, binds)
    }
}

/// Bind a rendered query's values onto a sqlx query in filter order.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    binds: &'q [Bind],
) -> Query<'q, Postgres, PgArguments> {
    for bind in binds {
        query = match bind {
            Bind::Uuid(v) => query.bind(v),
            Bind::Int(v) => query.bind(v),
            Bind::Text(v) => query.bind(v),
            Bind::Timestamp(v) => query.bind(v),
            Bind::Bool(v) => query.bind(v),
        };
    }
    query
}

/// A reusable query fragment.
///
/// Clauses are constructed per request, applied once, and discarded; they
/// carry no state beyond their own parameters.
pub trait QueryClause {
    fn apply(&self, query: ItemQuery) -> ItemQuery;
}

/// Column alias under which the version number is projected.
pub const ALIAS_VERSION: &str = "version";

const PROPERTY_VERSION: &str = "item.version";

/// Selects every version of one item, ascending by version, with the
/// version number projected under [`ALIAS_VERSION`].
///
/// A uuid with no rows yields an empty result downstream, never an error.
#[derive(Debug, Clone)]
pub struct AllVersionsClause {
    pub uuid: Uuid,
}

impl AllVersionsClause {
    pub fn new(uuid: Uuid) -> Self {
        Self { uuid }
    }
}

impl QueryClause for AllVersionsClause {
    fn apply(&self, query: ItemQuery) -> ItemQuery {
        query
            .filter_eq("item.uuid", Bind::Uuid(self.uuid))
            .order_by(PROPERTY_VERSION, SortDir::Asc)
            .project(PROPERTY_VERSION, ALIAS_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_versions_clause_effects() {
        let uuid = Uuid::new_v4();
        let query = ItemQuery::new().apply(&AllVersionsClause::new(uuid));

        assert_eq!(
            query.filters(),
            &[("item.uuid".to_string(), Bind::Uuid(uuid))]
        );
        assert_eq!(query.orders(), &[("item.version".to_string(), SortDir::Asc)]);
        assert_eq!(
            query.projections(),
            &[("item.version".to_string(), "version".to_string())]
        );
    }

    #[test]
    fn test_rendered_sql() {
        let uuid = Uuid::new_v4();
        let (sql, binds) = ItemQuery::new()
            .project("item.status", "status")
            .apply(&AllVersionsClause::new(uuid))
            .to_sql();

        assert_eq!(
            sql,
            "SELECT item.status AS status, item.version AS version \
             FROM item WHERE item.uuid = $1 ORDER BY item.version ASC"
        );
        assert_eq!(binds, vec![Bind::Uuid(uuid)]);
    }

    #[test]
    fn test_no_projection_selects_star() {
        let (sql, binds) = ItemQuery::new().to_sql();
        assert_eq!(sql, "SELECT item.* FROM item");
        assert!(binds.is_empty());
    }

    #[test]
    fn test_clause_application_order_is_immaterial() {
        let uuid = Uuid::new_v4();
        let clause = AllVersionsClause::new(uuid);

        let before = ItemQuery::new()
            .apply(&clause)
            .filter_eq("item.status", Bind::Text("live".to_string()));
        let after = ItemQuery::new()
            .filter_eq("item.status", Bind::Text("live".to_string()))
            .apply(&clause);

        // Same predicate/order/projection sets, regardless of how SQL
        // happens to order the text.
        let mut f1: Vec<_> = before.filters().to_vec();
        let mut f2: Vec<_> = after.filters().to_vec();
        f1.sort_by(|a, b| a.0.cmp(&b.0));
        f2.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(f1, f2);
        assert_eq!(before.orders(), after.orders());
        assert_eq!(before.projections(), after.projections());
    }

    #[test]
    fn test_builder_is_value_semantics() {
        let base = ItemQuery::new().project("item.name", "name");
        let a = base.clone().filter_eq("item.version", Bind::Int(1));
        let b = base.filter_eq("item.version", Bind::Int(2));

        // Extending one composition never aliases into another.
        assert_eq!(a.filters()[0].1, Bind::Int(1));
        assert_eq!(b.filters()[0].1, Bind::Int(2));
    }

    #[test]
    fn test_multiple_filters_number_params_sequentially() {
        let (sql, binds) = ItemQuery::new()
            .filter_eq("item.uuid", Bind::Uuid(Uuid::nil()))
            .filter_eq("item.version", Bind::Int(2))
            .to_sql();
        assert!(sql.contains("item.uuid = $1 AND item.version = $2"));
        assert_eq!(binds.len(), 2);
    }
}
