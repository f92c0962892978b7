// src/persistence/query.rs
//
// Backend-neutral description of which rows and columns a call touches.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::domain::ID_COLUMN;
use crate::error::{AppError, AppResult};

fn column_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Reject anything that is not a plain column identifier.
pub fn validate_column(column: &str) -> AppResult<()> {
    if column_pattern().is_match(column) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid column name '{}'", column)))
    }
}

/// A single `column = value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub value: Value,
}

/// Conjunction of equality conditions. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(column, value)
    }

    pub fn by_id(id: impl ToString) -> Self {
        Self::eq(ID_COLUMN, id.to_string())
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Writes must target specific rows.
    pub fn require_targeted(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::Validation(
                "Refusing to write without a filter".to_string(),
            ));
        }
        self.validate()
    }

    pub fn validate(&self) -> AppResult<()> {
        for condition in &self.conditions {
            validate_column(&condition.column)?;
            if matches!(condition.value, Value::Array(_) | Value::Object(_)) {
                return Err(AppError::Validation(format!(
                    "Filter on '{}' must compare a scalar value",
                    condition.column
                )));
            }
        }
        Ok(())
    }

    /// In-memory evaluation, used by the local backend after loading a row.
    pub fn matches(&self, record: &crate::domain::Record) -> bool {
        self.conditions.iter().all(|condition| {
            let actual = record.get(&condition.column).unwrap_or(&Value::Null);
            actual == &condition.value
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Arguments of a `select` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Columns to return; `None` returns whole records
    pub columns: Option<Vec<String>>,
    pub filter: Filter,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(columns) = &self.columns {
            for column in columns {
                validate_column(column)?;
            }
        }
        for order in &self.order {
            validate_column(&order.column)?;
        }
        self.filter.validate()
    }
}
