/// Filters operating on strings
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::value::{to_value, Value};
use tera::{try_get_value, Result};
use unic_segment::GraphemeIndices;

lazy_static! {
    static ref SPACELESS_RE: Regex = Regex::new(r">\s+<").unwrap();
    static ref PARAGRAPH_RE: Regex = Regex::new(r"\r?\n\s*\r?\n").unwrap();
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
}

/// Truncates a string to the indicated length.
///
/// # Arguments
///
/// * `value`   - The string that needs to be truncated.
/// * `args`    - A set of key/value arguments that can take the following
///   keys.
/// * `length`  - The length at which the string needs to be truncated. If
///   the length is larger than the length of the string, the string is
///   returned untouched. The default value is 255.
/// * `end`     - The ellipsis string to be used if the given string is
///   truncated. The default value is "…".
///
/// # Remarks
///
/// The return value of this function might be longer than `length`: the `end`
/// string is *added* after the truncation occurs.
pub fn truncate(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
    let s = try_get_value!("truncate", "value", String, value);
    let length = match args.get("length") {
        Some(l) => try_get_value!("truncate", "length", usize, l),
        None => 255,
    };
    let end = match args.get("end") {
        Some(l) => try_get_value!("truncate", "end", String, l),
        None => "…".to_string(),
    };

    let graphemes = GraphemeIndices::new(&s).collect::<Vec<(usize, &str)>>();

    // Nothing to truncate?
    if length >= graphemes.len() {
        return Ok(to_value(&s).unwrap());
    }

    let result = s[..graphemes[length].0].to_string() + &end;
    Ok(to_value(result).unwrap())
}

/// Wraps blank-line separated blocks of text in `<p>` tags, converting the
/// remaining single line breaks to `<br />`.
pub fn nl2p(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    let s = try_get_value!("nl2p", "value", String, value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(to_value("").unwrap());
    }

    let result = PARAGRAPH_RE
        .split(trimmed)
        .map(|paragraph| {
            format!("<p>{}</p>", LINE_BREAK_RE.replace_all(paragraph.trim(), "<br />"))
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(to_value(result).unwrap())
}

/// Removes whitespace between HTML tags. Whitespace anywhere else, including
/// inside text nodes, is left untouched.
pub fn spaceless(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    let s = try_get_value!("spaceless", "value", String, value);
    Ok(to_value(SPACELESS_RE.replace_all(&s, "><")).unwrap())
}
