// src/persistence/sqlite/sql.rs
//
// SQL fragments for the document tables. Column names are validated by
// `Query::validate`/`Filter::validate` before they reach these helpers.

use rusqlite::types::Value as SqlValue;
use serde_json::Value;

use crate::domain::ID_COLUMN;
use crate::persistence::{Filter, Order};

/// Expression reading `column` from a document row.
pub(crate) fn column_expr(column: &str) -> String {
    if column == ID_COLUMN {
        "id".to_string()
    } else {
        format!("json_extract(data, '$.{}')", column)
    }
}

pub(crate) fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// `WHERE ...` clause (empty string for an empty filter), appending bound
/// values to `params`.
pub(crate) fn where_clause(filter: &Filter, params: &mut Vec<SqlValue>) -> String {
    if filter.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = filter
        .conditions
        .iter()
        .map(|condition| {
            let expr = column_expr(&condition.column);
            if condition.value.is_null() {
                format!("{} IS NULL", expr)
            } else {
                params.push(to_sql_value(&condition.value));
                format!("{} = ?{}", expr, params.len())
            }
        })
        .collect();

    format!(" WHERE {}", parts.join(" AND "))
}

/// `ORDER BY ...` clause; insertion order breaks ties.
pub(crate) fn order_clause(order: &[Order]) -> String {
    let mut parts: Vec<String> = order
        .iter()
        .map(|o| {
            format!(
                "{} {}",
                column_expr(&o.column),
                if o.ascending { "ASC" } else { "DESC" }
            )
        })
        .collect();
    parts.push("rowid ASC".to_string());
    format!(" ORDER BY {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_is_a_real_column() {
        assert_eq!(column_expr("id"), "id");
        assert_eq!(column_expr("display_id"), "json_extract(data, '$.display_id')");
    }

    #[test]
    fn test_where_clause_binds_values() {
        let mut params = Vec::new();
        let filter = Filter::eq("language", "de").and_eq("subject", Value::Null);
        let clause = where_clause(&filter, &mut params);

        assert_eq!(
            clause,
            " WHERE json_extract(data, '$.language') = ?1 AND json_extract(data, '$.subject') IS NULL"
        );
        assert_eq!(params, vec![SqlValue::Text("de".to_string())]);
    }

    #[test]
    fn test_empty_filter_has_no_clause() {
        let mut params = Vec::new();
        assert_eq!(where_clause(&Filter::all(), &mut params), "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_value_conversion() {
        assert_eq!(to_sql_value(&json!(true)), SqlValue::Integer(1));
        assert_eq!(to_sql_value(&json!(3)), SqlValue::Integer(3));
        assert_eq!(to_sql_value(&json!(2.5)), SqlValue::Real(2.5));
    }

    #[test]
    fn test_order_clause() {
        assert_eq!(
            order_clause(&[Order::desc("created_at")]),
            " ORDER BY json_extract(data, '$.created_at') DESC, rowid ASC"
        );
        assert_eq!(order_clause(&[]), " ORDER BY rowid ASC");
    }
}
