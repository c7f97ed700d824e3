//! Canonical filter evaluation for in-memory record matching.
//!
//! This module evaluates the query documents the filter builder emits — the
//! same canonical form the MongoDB backend hands to its query engine —
//! against plain BSON documents.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, DateTime, Document};

use recordstore_core::error::{RecordStoreError, RecordStoreResult};

/// Type-erased, comparable representation of BSON values.
///
/// Numeric types normalize to f64 so `Int32`, `Int64` and `Double` compare by
/// value, matching the canonical numeric encodings' semantics.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates canonical query documents against stored records.
///
/// Supported forms: literal field equality, per-field operator documents
/// (`$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$nin`, `$exists`),
/// and top-level `$and`/`$or` over sub-filters. Unknown operators are
/// rejected here; the MongoDB backend passes them through to the server
/// unexamined.
pub(crate) struct FilterEvaluator;

impl FilterEvaluator {
    pub fn matches(document: &Document, filter: &Document) -> RecordStoreResult<bool> {
        for (key, condition) in filter {
            let matched = match key.as_str() {
                "$and" => Self::all_match(document, condition)?,
                "$or" => Self::any_match(document, condition)?,
                field => Self::matches_field(document.get(field), condition)?,
            };

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn all_match(document: &Document, condition: &Bson) -> RecordStoreResult<bool> {
        for sub_filter in Self::sub_filters(condition, "$and")? {
            if !Self::matches(document, sub_filter)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn any_match(document: &Document, condition: &Bson) -> RecordStoreResult<bool> {
        for sub_filter in Self::sub_filters(condition, "$or")? {
            if Self::matches(document, sub_filter)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn sub_filters<'a>(
        condition: &'a Bson,
        operator: &str,
    ) -> RecordStoreResult<impl Iterator<Item = &'a Document>> {
        let clauses = condition.as_array().ok_or_else(|| {
            RecordStoreError::Query(format!("'{operator}' requires an array of filter documents"))
        })?;

        if clauses.iter().any(|clause| clause.as_document().is_none()) {
            return Err(RecordStoreError::Query(format!(
                "'{operator}' requires an array of filter documents",
            )));
        }

        Ok(clauses.iter().filter_map(Bson::as_document))
    }

    fn matches_field(field_value: Option<&Bson>, condition: &Bson) -> RecordStoreResult<bool> {
        match condition {
            Bson::Document(operators)
                if !operators.is_empty() && operators.keys().all(|k| k.starts_with('$')) =>
            {
                for (operator, operand) in operators {
                    if !Self::apply_operator(field_value, operator, operand)? {
                        return Ok(false);
                    }
                }

                Ok(true)
            }
            literal => Ok(match field_value {
                Some(value) => Comparable::from(value) == Comparable::from(literal),
                None => false,
            }),
        }
    }

    fn apply_operator(
        field_value: Option<&Bson>,
        operator: &str,
        operand: &Bson,
    ) -> RecordStoreResult<bool> {
        let equal = || match field_value {
            Some(value) => Comparable::from(value) == Comparable::from(operand),
            None => matches!(operand, Bson::Null),
        };
        let ordering = || {
            field_value
                .and_then(|value| Comparable::from(value).partial_cmp(&Comparable::from(operand)))
        };

        match operator {
            "$eq" => Ok(equal()),
            "$ne" => Ok(!equal()),
            "$gt" => Ok(ordering() == Some(Ordering::Greater)),
            "$gte" => Ok(matches!(ordering(), Some(Ordering::Greater | Ordering::Equal))),
            "$lt" => Ok(ordering() == Some(Ordering::Less)),
            "$lte" => Ok(matches!(ordering(), Some(Ordering::Less | Ordering::Equal))),
            "$in" => Self::membership(field_value, operand, "$in"),
            "$nin" => Ok(!Self::membership(field_value, operand, "$nin")?),
            "$exists" => {
                let should_exist = operand.as_bool().ok_or_else(|| {
                    RecordStoreError::Query("'$exists' requires a boolean operand".to_string())
                })?;

                Ok(field_value.is_some() == should_exist)
            }
            other => Err(RecordStoreError::Query(format!(
                "unsupported filter operator '{other}'",
            ))),
        }
    }

    fn membership(
        field_value: Option<&Bson>,
        operand: &Bson,
        operator: &str,
    ) -> RecordStoreResult<bool> {
        let candidates = operand.as_array().ok_or_else(|| {
            RecordStoreError::Query(format!("'{operator}' requires an array operand"))
        })?;

        let Some(value) = field_value else {
            return Ok(false);
        };

        Ok(candidates
            .iter()
            .any(|candidate| Comparable::from(candidate) == Comparable::from(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn record() -> Document {
        doc! { "uuid": "1", "name": "Object", "value": 42.0, "streak": 3_i32 }
    }

    #[test]
    fn literal_equality() {
        assert!(FilterEvaluator::matches(&record(), &doc! { "name": "Object" }).unwrap());
        assert!(!FilterEvaluator::matches(&record(), &doc! { "name": "Other" }).unwrap());
        assert!(!FilterEvaluator::matches(&record(), &doc! { "missing": "x" }).unwrap());
    }

    #[test]
    fn numeric_types_compare_by_value() {
        // Int32 in the filter, Double in the record.
        assert!(FilterEvaluator::matches(&record(), &doc! { "value": 42_i32 }).unwrap());
        assert!(FilterEvaluator::matches(&record(), &doc! { "streak": 3_i64 }).unwrap());
    }

    #[test]
    fn comparison_operators() {
        assert!(FilterEvaluator::matches(&record(), &doc! { "value": { "$gt": 25 } }).unwrap());
        assert!(!FilterEvaluator::matches(&record(), &doc! { "value": { "$lt": 25 } }).unwrap());
        assert!(FilterEvaluator::matches(&record(), &doc! { "streak": { "$gte": 3, "$lte": 3 } }).unwrap());
        assert!(FilterEvaluator::matches(&record(), &doc! { "streak": { "$ne": 0 } }).unwrap());
    }

    #[test]
    fn missing_field_never_orders() {
        assert!(!FilterEvaluator::matches(&record(), &doc! { "missing": { "$gt": 0 } }).unwrap());
        assert!(FilterEvaluator::matches(&record(), &doc! { "missing": { "$ne": 0 } }).unwrap());
    }

    #[test]
    fn membership_operators() {
        assert!(FilterEvaluator::matches(&record(), &doc! { "uuid": { "$in": ["1", "2"] } }).unwrap());
        assert!(!FilterEvaluator::matches(&record(), &doc! { "uuid": { "$nin": ["1", "2"] } }).unwrap());
    }

    #[test]
    fn existence_operator() {
        assert!(FilterEvaluator::matches(&record(), &doc! { "name": { "$exists": true } }).unwrap());
        assert!(FilterEvaluator::matches(&record(), &doc! { "missing": { "$exists": false } }).unwrap());
    }

    #[test]
    fn logical_combinators() {
        let filter = doc! { "$and": [ { "name": "Object" }, { "value": { "$gt": 10 } } ] };
        assert!(FilterEvaluator::matches(&record(), &filter).unwrap());

        let filter = doc! { "$or": [ { "name": "Other" }, { "streak": 3 } ] };
        assert!(FilterEvaluator::matches(&record(), &filter).unwrap());
    }

    #[test]
    fn unknown_operator_is_a_query_error() {
        assert!(matches!(
            FilterEvaluator::matches(&record(), &doc! { "streak": { "$ne$": 0 } }),
            Err(RecordStoreError::Query(_)),
        ));
    }

    #[test]
    fn empty_operator_document_compares_literally() {
        // `{field: {}}` is a literal match against an empty document, not an
        // operator expression.
        assert!(!FilterEvaluator::matches(&record(), &doc! { "name": {} }).unwrap());
    }
}
