//! Partial-update statement construction.
//!
//! Writes to the backing table go through a generic update path: attribute
//! names are hidden behind `#attr<N>` aliases and values behind `:var<N>`
//! placeholders, so a statement can never collide with a reserved word no
//! matter what the attributes are called. The builder knows nothing about
//! the record schema; it is handed name/value pairs one at a time and
//! returns a fully-typed [`UpdateStatement`] for the database layer to
//! resolve and execute.

use rusqlite::types::Value;
use rusqlite::ToSql;

use crate::error::{Error, Result};

/// Builder assembling a partial-update statement from name/value pairs.
///
/// Pairs are aliased in insertion order: the N-th pair (starting at 1) gets
/// the alias `#attr<N>` and the placeholder `:var<N>`. Aliases are scoped to
/// a single build, so repeated attribute names across separate statements
/// can never collide.
///
/// # Examples
///
/// ```
/// use callback_guard::UpdateBuilder;
///
/// let statement = UpdateBuilder::new()
///     .set("original_request_id", "contact-1".to_string())
///     .set("created_at", 1_700_000_000_i64)
///     .build()
///     .unwrap();
///
/// assert_eq!(statement.expression(), "set #attr1 = :var1, #attr2 = :var2");
/// ```
#[derive(Debug, Default)]
pub struct UpdateBuilder {
    attributes: Vec<(String, Value)>,
}

impl UpdateBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one attribute assignment.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builds the statement.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no attributes were added: a bare `set`
    /// clause is never a meaningful write, so an empty builder is treated as
    /// a caller bug rather than silently emitted.
    pub fn build(self) -> Result<UpdateStatement> {
        if self.attributes.is_empty() {
            return Err(Error::Validation {
                field: "attributes".into(),
                message: "update statement requires at least one attribute".into(),
            });
        }

        let mut expression = String::from("set");
        let mut names = Vec::with_capacity(self.attributes.len());
        let mut values = Vec::with_capacity(self.attributes.len());

        for (index, (name, value)) in self.attributes.into_iter().enumerate() {
            let alias = format!("#attr{}", index + 1);
            let placeholder = format!(":var{}", index + 1);

            if index == 0 {
                expression.push(' ');
            } else {
                expression.push_str(", ");
            }
            expression.push_str(&alias);
            expression.push_str(" = ");
            expression.push_str(&placeholder);

            names.push((alias, name));
            values.push((placeholder, value));
        }

        Ok(UpdateStatement {
            expression,
            names,
            values,
        })
    }
}

/// A composed partial-update statement.
///
/// Consists of the aliased assignment clause plus the two lookup tables that
/// resolve it: alias → attribute name and placeholder → value. The statement
/// is built for a single write and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    expression: String,
    names: Vec<(String, String)>,
    values: Vec<(String, Value)>,
}

impl UpdateStatement {
    /// Returns the aliased assignment clause, e.g.
    /// `set #attr1 = :var1, #attr2 = :var2`.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the alias → attribute-name table, in assignment order.
    #[must_use]
    pub fn names(&self) -> &[(String, String)] {
        &self.names
    }

    /// Returns the placeholder → value table, in assignment order.
    #[must_use]
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    /// Returns the statement's bindings as rusqlite named parameters.
    pub(crate) fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.values
            .iter()
            .map(|(placeholder, value)| (placeholder.as_str(), value as &dyn ToSql))
            .collect()
    }
}
