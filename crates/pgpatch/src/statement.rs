//! Full `UPDATE` statements built around a [`SqlFragment`].

use crate::client::GenericClient;
use crate::config::QuotePolicy;
use crate::error::{PatchError, PatchResult};
use crate::fragment::SqlFragment;
use crate::ident::write_quoted;
use crate::value::Value;
use std::fmt::Write as _;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// `UPDATE "table" SET <fragment> WHERE ... RETURNING ...`
///
/// WHERE placeholders continue after the fragment's, and their values are
/// bound after the fragment's values.
///
/// # Example
/// ```ignore
/// let fragment = sql_for_partial_update(&data, &ColumnMap::from([("firstName", "first_name")]))?;
/// let row = UpdateStatement::new("users", fragment)
///     .where_eq("username", username)
///     .returning(&["username", r#"first_name AS "firstName""#])
///     .fetch_one(&client)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: String,
    fragment: SqlFragment,
    predicates: Vec<(String, Value)>,
    returning: Vec<String>,
}

impl UpdateStatement {
    /// Start an UPDATE of `table`. A dotted name (`public.users`) is quoted per part.
    pub fn new(table: impl Into<String>, fragment: SqlFragment) -> Self {
        Self {
            table: table.into(),
            fragment,
            predicates: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Add WHERE: "column" = value (multiple predicates are AND-ed).
    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((column.into(), value.into()));
        self
    }

    /// Set RETURNING expressions. These are trusted SQL, not identifiers.
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn fragment(&self) -> &SqlFragment {
        &self.fragment
    }

    /// Render the statement.
    ///
    /// Without any `where_eq` the statement ends in `WHERE 1=0` and updates nothing.
    pub fn to_sql(&self) -> PatchResult<String> {
        let mut sql = String::from("UPDATE ");
        for (i, part) in self.table.split('.').enumerate() {
            if i > 0 {
                sql.push('.');
            }
            write_quoted(&mut sql, part, QuotePolicy::Reject)?;
        }
        sql.push_str(" SET ");
        sql.push_str(&self.fragment.set_cols);

        let first = self.fragment.next_placeholder();
        if first.checked_add(self.predicates.len()).is_none() {
            return Err(PatchError::invalid_argument(format!(
                "WHERE placeholder indices overflow starting at ${first}"
            )));
        }

        sql.push_str(" WHERE ");
        if self.predicates.is_empty() {
            sql.push_str("1=0");
        }
        for (i, (column, _)) in self.predicates.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }
            write_quoted(&mut sql, column, QuotePolicy::Reject)?;
            // Writing to a String cannot fail.
            let _ = write!(sql, " = ${}", first + i);
        }

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }
        Ok(sql)
    }

    /// Fragment values followed by WHERE values.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        let mut params = self.fragment.params();
        params.extend(
            self.predicates
                .iter()
                .map(|(_, v)| v as &(dyn ToSql + Sync)),
        );
        params
    }

    fn prepare(&self) -> PatchResult<String> {
        let sql = self.to_sql()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgpatch.sql",
            param_count = self.fragment.len() + self.predicates.len(),
            sql = %sql,
            "executing partial update"
        );
        Ok(sql)
    }

    /// Execute and return the number of updated rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> PatchResult<u64> {
        let sql = self.prepare()?;
        conn.execute(&sql, &self.params()).await
    }

    /// Execute and return the first RETURNING row, if any row matched.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> PatchResult<Option<Row>> {
        let sql = self.prepare()?;
        conn.query_opt(&sql, &self.params()).await
    }

    /// Execute and return the first RETURNING row.
    ///
    /// Returns [`PatchError::NotFound`] when no row matched the WHERE clause.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> PatchResult<Row> {
        self.fetch_opt(conn)
            .await?
            .ok_or_else(|| PatchError::not_found(format!("No row in {} matched", self.table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnMap, UpdateData, sql_for_partial_update};

    fn user_fragment() -> SqlFragment {
        let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
        sql_for_partial_update(&data, &ColumnMap::from([("firstName", "first_name")])).unwrap()
    }

    #[test]
    fn where_placeholder_follows_fragment() {
        let stmt = UpdateStatement::new("users", user_fragment()).where_eq("username", "aliya");
        assert_eq!(
            stmt.to_sql().unwrap(),
            r#"UPDATE "users" SET "first_name"=$1, "age"=$2 WHERE "username" = $3"#
        );
        assert_eq!(stmt.params().len(), 3);
    }

    #[test]
    fn returning_is_appended_verbatim() {
        let stmt = UpdateStatement::new("users", user_fragment())
            .where_eq("username", "aliya")
            .returning(&["username", r#"first_name AS "firstName""#]);
        assert_eq!(
            stmt.to_sql().unwrap(),
            r#"UPDATE "users" SET "first_name"=$1, "age"=$2 WHERE "username" = $3 RETURNING username, first_name AS "firstName""#
        );
    }

    #[test]
    fn multiple_predicates_are_anded() {
        let stmt = UpdateStatement::new("public.jobs", user_fragment())
            .where_eq("id", 7)
            .where_eq("company_handle", "acme");
        assert_eq!(
            stmt.to_sql().unwrap(),
            r#"UPDATE "public"."jobs" SET "first_name"=$1, "age"=$2 WHERE "id" = $3 AND "company_handle" = $4"#
        );
    }

    #[test]
    fn missing_where_updates_nothing() {
        let stmt = UpdateStatement::new("users", user_fragment());
        assert!(stmt.to_sql().unwrap().ends_with(" WHERE 1=0"));
    }

    #[test]
    fn where_follows_offset_fragment() {
        let data = UpdateData::new().set("title", "CEO");
        let config = crate::FragmentConfig::new().with_first_placeholder(2);
        let fragment =
            crate::sql_for_partial_update_with(&data, &ColumnMap::new(), &config).unwrap();
        let stmt = UpdateStatement::new("jobs", fragment).where_eq("id", 1);
        assert!(stmt.to_sql().unwrap().ends_with(r#"WHERE "id" = $3"#));
    }

    #[test]
    fn overflowing_where_placeholder_is_rejected() {
        let data = UpdateData::new().set("title", "CEO");
        let config = crate::FragmentConfig::new().with_first_placeholder(usize::MAX - 1);
        let fragment =
            crate::sql_for_partial_update_with(&data, &ColumnMap::new(), &config).unwrap();
        let stmt = UpdateStatement::new("jobs", fragment).where_eq("id", 1);
        assert!(matches!(stmt.to_sql(), Err(PatchError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_quoted_table_name() {
        let stmt = UpdateStatement::new(r#"us"ers"#, user_fragment()).where_eq("id", 1);
        assert!(matches!(stmt.to_sql(), Err(PatchError::Validation(_))));
    }

    #[test]
    fn rejects_empty_table_segment() {
        let stmt = UpdateStatement::new("public.", user_fragment()).where_eq("id", 1);
        assert!(stmt.to_sql().is_err());
    }
}
