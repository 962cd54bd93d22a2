//! Column-name to field-name mapping on result rows.

use sea_query::Value;
use std::collections::HashMap;

/// Translate column-keyed result rows into field-keyed rows.
///
/// For every column present in a row, the column is emitted under its field
/// name when the mapping knows it and dropped silently otherwise. Dropping
/// is deliberate: a connector may return columns the entity no longer
/// declares (schema drift), and results stay usable. This is the lenient
/// half of the asymmetry; query *input* validation is strict.
///
/// Row count and order are preserved 1:1, input rows are never mutated, and
/// empty input yields an empty vector.
pub fn rows_to_fields(
    rows: &[HashMap<String, Value>],
    col_to_field: &HashMap<String, String>,
) -> Vec<HashMap<String, Value>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .filter_map(|(column, value)| {
                    col_to_field
                        .get(column)
                        .map(|field| (field.clone(), value.clone()))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> HashMap<String, String> {
        [("id", "ID"), ("name", "Name"), ("email", "Email")]
            .into_iter()
            .map(|(c, f)| (c.to_string(), f.to_string()))
            .collect()
    }

    fn row(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_rows_to_fields_maps_known_columns() {
        let rows = vec![row(&[
            ("id", Value::BigInt(Some(10))),
            ("name", Value::String(Some("foo".to_string()))),
        ])];
        let mapped = rows_to_fields(&rows, &mapping());
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].get("ID"), Some(&Value::BigInt(Some(10))));
        assert_eq!(
            mapped[0].get("Name"),
            Some(&Value::String(Some("foo".to_string())))
        );
    }

    #[test]
    fn test_rows_to_fields_drops_unknown_columns() {
        // "address" is not declared on the entity, so its value vanishes.
        let rows = vec![
            row(&[
                ("id", Value::BigInt(Some(10))),
                ("name", Value::String(Some("foo".to_string()))),
            ]),
            row(&[
                ("id", Value::BigInt(Some(20))),
                ("address", Value::String(Some("mars".to_string()))),
            ]),
        ];
        let mapped = rows_to_fields(&rows, &mapping());
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].len(), 2);
        assert_eq!(mapped[1].len(), 1);
        assert_eq!(mapped[1].get("ID"), Some(&Value::BigInt(Some(20))));
        assert!(mapped[1].get("address").is_none());
        assert!(mapped[1].get("Address").is_none());
    }

    #[test]
    fn test_rows_to_fields_preserves_length_and_order() {
        let rows: Vec<HashMap<String, Value>> = (0..5)
            .map(|i| row(&[("id", Value::BigInt(Some(i)))]))
            .collect();
        let mapped = rows_to_fields(&rows, &mapping());
        assert_eq!(mapped.len(), 5);
        for (i, r) in mapped.iter().enumerate() {
            assert_eq!(r.get("ID"), Some(&Value::BigInt(Some(i as i64))));
        }
    }

    #[test]
    fn test_rows_to_fields_empty_input_yields_empty_output() {
        let mapped = rows_to_fields(&[], &mapping());
        assert!(mapped.is_empty());
    }
}
