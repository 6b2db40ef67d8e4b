//! # pgpatch
//!
//! Partial-update SQL fragments for PostgreSQL.
//!
//! Given the fields a request wants to change and a map from application field
//! names to column names, [`sql_for_partial_update`] produces the SET clause of
//! a parameterized `UPDATE` and the values bound to its `$n` placeholders.
//!
//! - **Values are bound, never inlined**: only quoted column names reach the SQL text
//! - **Order-preserving**: placeholders follow the order fields were supplied in
//! - **Empty updates are errors**: no fields yields [`PatchError::InvalidArgument`]
//!
//! ```ignore
//! use pgpatch::{ColumnMap, UpdateData, UpdateStatement, sql_for_partial_update};
//!
//! let data: UpdateData = serde_json::from_str(r#"{"firstName": "Aliya", "age": 32}"#)?;
//! let fragment = sql_for_partial_update(&data, &ColumnMap::from([("firstName", "first_name")]))?;
//! assert_eq!(fragment.set_cols, r#""first_name"=$1, "age"=$2"#);
//!
//! let row = UpdateStatement::new("users", fragment)
//!     .where_eq("username", "aliya")
//!     .returning(&["username", r#"first_name AS "firstName""#])
//!     .fetch_one(&client)
//!     .await?;
//! ```

pub mod client;
pub mod column_map;
pub mod config;
pub mod error;
pub mod fragment;
pub mod ident;
pub mod statement;
pub mod update_data;
pub mod value;

pub use client::GenericClient;
pub use column_map::ColumnMap;
pub use config::{FragmentConfig, QuotePolicy};
pub use error::{PatchError, PatchResult};
pub use fragment::{SqlFragment, sql_for_partial_update, sql_for_partial_update_with};
pub use ident::quote_ident;
pub use statement::UpdateStatement;
pub use update_data::UpdateData;
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
