// src/mcp/format.rs

use serde_json::Value;

/// Renders a tool result as the text shown to the MCP host.
pub fn format_tool_result(result: &Value) -> String {
    match result {
        Value::Null => "Operation completed successfully.".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(format_tool_result(&Value::Null), "Operation completed successfully.");
        assert_eq!(format_tool_result(&json!("0xabc")), "0xabc");
        assert_eq!(format_tool_result(&json!("")), "");
        assert_eq!(format_tool_result(&json!(42)), "42");
        assert_eq!(format_tool_result(&json!(1.5)), "1.5");
        assert_eq!(format_tool_result(&json!(false)), "false");
    }

    #[test]
    fn test_objects_are_pretty_printed_in_insertion_order() {
        let value = json!({"blockNumber": 12, "address": "0x1"});
        assert_eq!(
            format_tool_result(&value),
            "{\n  \"blockNumber\": 12,\n  \"address\": \"0x1\"\n}"
        );
        assert_eq!(format_tool_result(&json!([])), "[]");
        assert_eq!(format_tool_result(&json!({})), "{}");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let value = json!({"accounts": [{"address": "0x1"}, {"address": "0x2"}]});
        assert_eq!(format_tool_result(&value), format_tool_result(&value.clone()));
        assert_eq!(format_tool_result(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_reparsed_output_formats_identically() {
        let values = [
            json!({"zeta": 1, "alpha": {"nested": [3, {"y": null, "b": true}]}, "mid": "x"}),
            json!([{"txHash": "0x1", "status": "success"}, [], {}, 1.5]),
            json!({"blockNumber": 12, "address": "0x1"}),
        ];
        for value in values {
            let text = format_tool_result(&value);
            let reparsed: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(format_tool_result(&reparsed), text);
        }

        let text = format_tool_result(&json!({"zeta": 1, "alpha": 2}));
        assert_eq!(text, "{\n  \"zeta\": 1,\n  \"alpha\": 2\n}");
    }
}
