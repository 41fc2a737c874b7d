//! Turning a parsed `/ask` response body into display text.
use anyhow::{Result, anyhow, bail};
use serde_json::Value;

/// Text shown when the reply has no `response` field.
pub const MISSING_REPLY: &str = "undefined";

/// Renders the `response` field of a reply without validating it.
///
/// Strings are returned verbatim and a missing field becomes
/// `undefined`, even when the body is not an object. A body of `null`
/// has no fields to read at all and is an error. Other values are
/// stringified the way a JavaScript template literal would.
pub fn reply_text(body: &Value) -> Result<String> {
    if body.is_null() {
        bail!("Reply body is null, can't read field `response`");
    }

    Ok(match body.get("response") {
        None => MISSING_REPLY.to_string(),
        Some(value) => display_text(value),
    })
}

/// `String(value)` for a JSON value: arrays join their items with
/// commas (null items become empty) and objects are opaque.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Like `reply_text` but only accepts a JSON object with a string
/// `response` field.
pub fn strict_reply_text(body: &Value) -> Result<String> {
    match body.get("response") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(anyhow!("Field `response` is not a string: {}", other)),
        None => Err(anyhow!("Reply is missing field `response`: {}", body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_returns_the_response_verbatim() {
        let body = json!({"response": "<b>hello</b>\n  world"});
        assert_eq!(reply_text(&body).unwrap(), "<b>hello</b>\n  world");
    }

    #[test]
    fn it_renders_a_placeholder_for_missing_fields() {
        assert_eq!(reply_text(&json!({"detail": "nope"})).unwrap(), "undefined");
        assert_eq!(reply_text(&json!(["response"])).unwrap(), "undefined");
        assert_eq!(reply_text(&json!("response")).unwrap(), "undefined");
        assert_eq!(reply_text(&json!(42)).unwrap(), "undefined");
    }

    #[test]
    fn it_fails_on_a_null_body() {
        assert!(reply_text(&Value::Null).is_err());
    }

    #[test]
    fn it_stringifies_non_string_values() {
        assert_eq!(reply_text(&json!({"response": null})).unwrap(), "null");
        assert_eq!(reply_text(&json!({"response": 42})).unwrap(), "42");
        assert_eq!(reply_text(&json!({"response": 1.0})).unwrap(), "1");
        assert_eq!(reply_text(&json!({"response": 2.5})).unwrap(), "2.5");
        assert_eq!(reply_text(&json!({"response": false})).unwrap(), "false");
        assert_eq!(reply_text(&json!({"response": ["a", "b"]})).unwrap(), "a,b");
        assert_eq!(
            reply_text(&json!({"response": [1, null, ["x", "y"]]})).unwrap(),
            "1,,x,y"
        );
        assert_eq!(
            reply_text(&json!({"response": {"text": "hi"}})).unwrap(),
            "[object Object]"
        );
    }

    #[test]
    fn it_rejects_unexpected_shapes_when_strict() {
        assert_eq!(strict_reply_text(&json!({"response": "ok"})).unwrap(), "ok");
        assert!(strict_reply_text(&json!({"response": 1})).is_err());
        assert!(strict_reply_text(&json!({})).is_err());
        assert!(strict_reply_text(&json!(null)).is_err());
    }
}
