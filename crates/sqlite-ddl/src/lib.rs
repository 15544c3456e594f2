//! Parser and in-place rewriter for SQLite `CREATE TABLE` / `CREATE INDEX`
//! statements.
//!
//! SQLite has no `ALTER TABLE ... ADD/DROP CONSTRAINT`, so a table is rebuilt
//! instead: read its DDL, edit the clause list, compile it back and replay it
//! against a fresh table.
//!
//! ```
//! use sqlite_ddl::Ddl;
//!
//! let mut ddl = Ddl::parse(&[
//!     "CREATE TABLE `notes` (`id` integer NOT NULL,`user_id` integer,\
//!      CONSTRAINT `fk_users_notes` FOREIGN KEY (`user_id`) REFERENCES `users`(`id`))",
//! ])
//! .unwrap();
//!
//! assert!(ddl.remove_constraint("fk_users_notes"));
//! assert_eq!(
//!     ddl.compile(),
//!     "CREATE TABLE `notes` (`id` integer NOT NULL, `user_id` integer)"
//! );
//! assert_eq!(ddl.get_columns(), vec!["`id`", "`user_id`"]);
//! ```

pub mod classifier;
pub mod column;
pub mod ddl;
pub mod error;
pub mod ident;
pub mod index;
mod parser;
pub mod splitter;
mod tokens;

#[cfg(test)]
mod tests;

pub use classifier::{Clause, Constraint, ConstraintKind, classify};
pub use column::{ColumnMeta, extract};
pub use ddl::Ddl;
pub use error::DdlError;
pub use index::IndexDef;
pub use splitter::{split, split_statements, strip_comments};
