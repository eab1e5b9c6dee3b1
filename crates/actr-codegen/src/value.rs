//! Encoding of single values into pyactr chunk-string tokens.
//!
//! | Source item | Output    |
//! |-------------|-----------|
//! | `nil`       | `nil`     |
//! | `foo`       | `"foo"`   |
//! | `3.50`      | `3.50`    |
//! | `?x`        | `=x`      |
//! | `!foo`      | `~"foo"`  |
//! | `?`         | *nothing* |

use actr_types::model::{Item, ItemValue, Value, VAR_SIGIL};

/// Encode one pattern item. Returns `None` for the wildcard, whose slot
/// entry must be left out entirely.
pub fn encode_item(item: &Item) -> Option<String> {
    if item.is_wildcard() {
        return None;
    }

    let mut out = String::new();
    if item.negated {
        out.push('~');
    }

    match &item.value {
        ItemValue::Nil => out.push_str("nil"),
        ItemValue::Id(id) => out.push_str(&quote(id)),
        ItemValue::Num(text) => out.push_str(text),
        ItemValue::Var(name) => out.push_str(&variable(name)),
    }
    Some(out)
}

/// Encode the right-hand side of a `set` slot assignment.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Var(name) => variable(name),
        Value::Number(text) => text.clone(),
        Value::Str(s) => quote(s),
    }
}

/// Shortest decimal form of a float: `2.5000` → `2.5`, `1.0` → `1`.
pub fn format_float(f: f64) -> String {
    format!("{f}")
}

fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

fn variable(name: &str) -> String {
    let bare = name.strip_prefix(VAR_SIGIL).unwrap_or(name);
    format!("={bare}")
}
