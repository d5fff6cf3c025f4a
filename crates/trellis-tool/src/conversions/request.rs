//! Tool arguments -> [`Query`].

use serde_json::Value;

use trellis_core::errors::ProtocolError;
use trellis_core::models::Query;

pub const FIELD_QUERY: &str = "query";
pub const FIELD_LIMIT: &str = "limit";
pub const FIELD_EXPAND_GRAPH: &str = "expandGraph";

/// Validate tool arguments and build a [`Query`].
///
/// `limit` and `expandGraph` may be omitted or `null`, in which case the
/// orchestrator's configured defaults apply. Empty query text is accepted
/// here; rejecting it is the embedder's job.
pub fn query_from_json(value: &Value) -> Result<Query, ProtocolError> {
    let object = value.as_object().ok_or_else(|| ProtocolError::MalformedRequest {
        reason: "arguments must be a JSON object".to_string(),
    })?;

    let text = match object.get(FIELD_QUERY) {
        None | Some(Value::Null) => {
            return Err(ProtocolError::MissingField {
                field: FIELD_QUERY.to_string(),
            })
        }
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err(invalid(FIELD_QUERY, "must be a string")),
    };

    let mut query = Query::new(text);

    match object.get(FIELD_LIMIT) {
        None | Some(Value::Null) => {}
        Some(raw) => {
            let limit = raw
                .as_u64()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(FIELD_LIMIT, "must be a positive integer"))?;
            query = query.with_limit(usize::try_from(limit).unwrap_or(usize::MAX));
        }
    }

    match object.get(FIELD_EXPAND_GRAPH) {
        None | Some(Value::Null) => {}
        Some(Value::Bool(expand)) => query = query.with_expand_graph(*expand),
        Some(_) => return Err(invalid(FIELD_EXPAND_GRAPH, "must be a boolean")),
    }

    Ok(query)
}

fn invalid(field: &str, reason: &str) -> ProtocolError {
    ProtocolError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_request_parses() {
        let query = query_from_json(&json!({"query": "q", "limit": 3, "expandGraph": false})).unwrap();
        assert_eq!(query.text, "q");
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.expand_graph, Some(false));
    }

    #[test]
    fn optional_fields_default_to_none() {
        let query = query_from_json(&json!({"query": "q", "limit": null})).unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.expand_graph, None);
    }

    #[test]
    fn empty_text_is_forwarded() {
        let query = query_from_json(&json!({"query": ""})).unwrap();
        assert!(query.text.is_empty());
    }

    #[test]
    fn bad_limits_are_rejected() {
        for limit in [json!(0), json!(-2), json!(2.5), json!("3")] {
            let err = query_from_json(&json!({"query": "q", "limit": limit})).unwrap_err();
            assert!(matches!(err, ProtocolError::InvalidField { ref field, .. } if field == "limit"));
        }
    }

    #[test]
    fn non_boolean_expand_is_rejected() {
        let err = query_from_json(&json!({"query": "q", "expandGraph": "yes"})).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidField { ref field, .. } if field == "expandGraph"));
    }

    #[test]
    fn missing_or_mistyped_query_is_rejected() {
        assert!(matches!(
            query_from_json(&json!({"limit": 2})),
            Err(ProtocolError::MissingField { .. })
        ));
        assert!(matches!(
            query_from_json(&json!({"query": 7})),
            Err(ProtocolError::InvalidField { .. })
        ));
        assert!(matches!(
            query_from_json(&json!(["q"])),
            Err(ProtocolError::MalformedRequest { .. })
        ));
    }
}
