//! Best-effort repair of near-valid JSON emitted by the completion service.
//!
//! Models regularly produce JSON that is almost parseable: raw newlines
//! inside string literals, or a trailing comma before a closing bracket.
//! [`repair_json`] is a single-pass, two-state (in-string / not-in-string)
//! scanner that fixes exactly those defects and nothing else. It makes no
//! attempt at grammar-level recovery; callers re-run the real parser on
//! the output.

/// Repair common mechanical defects in a JSON candidate string.
///
/// Inside string literals (tracked with escape-sequence awareness), raw
/// newline, carriage-return, and tab characters are replaced with their
/// escaped forms. Outside string literals, a trailing comma immediately
/// before `}` or `]` (whitespace allowed between) is dropped.
///
/// Applying the function to already-valid JSON returns it unchanged, so
/// repeated repair is idempotent.
pub fn repair_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            if escaped {
                out.push(c);
                escaped = false;
                continue;
            }
            match c {
                '\\' => {
                    out.push(c);
                    escaped = true;
                }
                '"' => {
                    out.push(c);
                    in_string = false;
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    out.push(c);
                    in_string = true;
                }
                '}' | ']' => {
                    drop_trailing_comma(&mut out);
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
    }

    out
}

/// Remove a comma sitting (possibly behind whitespace) at the end of `out`.
/// The whitespace itself is preserved.
fn drop_trailing_comma(out: &mut String) {
    let mut tail = String::new();
    while let Some(c) = out.pop() {
        if c.is_ascii_whitespace() {
            tail.insert(0, c);
        } else {
            if c != ',' {
                out.push(c);
            }
            break;
        }
    }
    out.push_str(&tail);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_unchanged() {
        let input = r#"{"name": "Soup", "tags": ["easy", "warm"]}"#;
        assert_eq!(repair_json(input), input);
    }

    #[test]
    fn test_escapes_raw_newline_in_string() {
        let input = "{\"step\": \"Mix\nwell\"}";
        let repaired = repair_json(input);
        assert_eq!(repaired, r#"{"step": "Mix\nwell"}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_escapes_carriage_return_and_tab() {
        let input = "{\"a\": \"x\r\ty\"}";
        assert_eq!(repair_json(input), r#"{"a": "x\r\ty"}"#);
    }

    #[test]
    fn test_newline_outside_string_preserved() {
        let input = "{\n  \"a\": 1\n}";
        assert_eq!(repair_json(input), input);
    }

    #[test]
    fn test_strips_trailing_comma_in_object() {
        let input = r#"{"a": 1, "b": 2,}"#;
        let repaired = repair_json(input);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_strips_trailing_comma_in_array() {
        let input = "[1, 2, 3,\n]";
        let repaired = repair_json(input);
        assert_eq!(repaired, "[1, 2, 3\n]");
    }

    #[test]
    fn test_comma_inside_string_untouched() {
        let input = r#"{"a": "one,}"}"#;
        assert_eq!(repair_json(input), input);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let input = "{\"a\": \"he said \\\"hi\\\"\nbye\"}";
        let repaired = repair_json(input);
        assert_eq!(repaired, r#"{"a": "he said \"hi\"\nbye"}"#);
    }

    #[test]
    fn test_escaped_backslash_then_quote_ends_string() {
        // "C:\\" is a complete string; the comma after it is structural
        let input = r#"{"path": "C:\\", "b": 1,}"#;
        let repaired = repair_json(input);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_repair_is_idempotent() {
        let input = "{\"step\": \"Mix\nwell\",}";
        let once = repair_json(input);
        let twice = repair_json(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_repairs_every_string_in_large_structure() {
        // Meal-plan sized payloads run through the same scanner; every
        // string value in the document gets the escape treatment.
        let mut input = String::from("{\"meals\": [");
        for i in 0..200 {
            if i > 0 {
                input.push(',');
            }
            input.push_str(&format!("{{\"name\": \"Dish {i}\", \"note\": \"line\nbreak\"}}"));
        }
        input.push_str("]}");

        let repaired = repair_json(&input);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["meals"].as_array().unwrap().len(), 200);
        assert_eq!(value["meals"][137]["note"], "line\nbreak");
    }
}
