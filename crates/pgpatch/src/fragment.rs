//! Partial-update SQL fragments.
//!
//! Turns an [`UpdateData`] into the SET clause of a parameterized `UPDATE` plus
//! the values bound to its placeholders:
//!
//! ```ignore
//! use pgpatch::{ColumnMap, UpdateData, sql_for_partial_update};
//!
//! let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
//! let columns = ColumnMap::from([("firstName", "first_name")]);
//!
//! let fragment = sql_for_partial_update(&data, &columns)?;
//! assert_eq!(fragment.set_cols, r#""first_name"=$1, "age"=$2"#);
//!
//! let sql = format!(
//!     "UPDATE users SET {} WHERE username = ${} RETURNING username",
//!     fragment.set_cols,
//!     fragment.next_placeholder(),
//! );
//! ```
//!
//! Values never appear in `set_cols`; column names do, quoted.

use crate::column_map::ColumnMap;
use crate::config::FragmentConfig;
use crate::error::{PatchError, PatchResult};
use crate::ident::write_quoted;
use crate::update_data::UpdateData;
use crate::value::Value;
use std::fmt::Write as _;
use tokio_postgres::types::ToSql;

/// SET clause and the values bound to its placeholders.
///
/// `values[i]` belongs to the `i`-th term of `set_cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    /// Comma-separated `"column"=$n` terms.
    pub set_cols: String,
    /// Values in placeholder order.
    pub values: Vec<Value>,
    first_placeholder: usize,
}

impl SqlFragment {
    /// Number of assignments (and bound values).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first placeholder used by the clause.
    pub fn first_placeholder(&self) -> usize {
        self.first_placeholder
    }

    /// The placeholder index for the first parameter appended after this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.first_placeholder + self.values.len()
    }

    /// Values as driver parameters, in placeholder order.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    /// Split into `(set_cols, values)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.set_cols, self.values)
    }
}

/// Build the SET clause for `data`, renaming fields through `columns`.
///
/// Placeholders start at `$1`. Fails with [`PatchError::InvalidArgument`] when
/// `data` is empty.
pub fn sql_for_partial_update(data: &UpdateData, columns: &ColumnMap) -> PatchResult<SqlFragment> {
    sql_for_partial_update_with(data, columns, &FragmentConfig::default())
}

/// [`sql_for_partial_update`] with explicit rendering options.
pub fn sql_for_partial_update_with(
    data: &UpdateData,
    columns: &ColumnMap,
    config: &FragmentConfig,
) -> PatchResult<SqlFragment> {
    if data.is_empty() {
        return Err(PatchError::invalid_argument("No data"));
    }
    if config.first_placeholder == 0 {
        return Err(PatchError::invalid_argument(
            "first placeholder index must be at least 1",
        ));
    }
    if config.first_placeholder.checked_add(data.len()).is_none() {
        return Err(PatchError::invalid_argument(format!(
            "placeholder indices overflow starting at ${}",
            config.first_placeholder
        )));
    }

    let mut set_cols = String::with_capacity(data.len() * 16);
    let mut values = Vec::with_capacity(data.len());
    for (i, (field, value)) in data.iter().enumerate() {
        if i > 0 {
            set_cols.push_str(", ");
        }
        write_quoted(&mut set_cols, columns.resolve(field), config.quote_policy)?;
        // Writing to a String cannot fail.
        let _ = write!(set_cols, "=${}", config.first_placeholder + i);
        values.push(value.clone());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "pgpatch.sql",
        field_count = values.len(),
        first_placeholder = config.first_placeholder,
        set_cols = %set_cols,
        "built partial update fragment"
    );

    Ok(SqlFragment {
        set_cols,
        values,
        first_placeholder: config.first_placeholder,
    })
}
