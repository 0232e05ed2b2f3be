/// Filters operating on numbers
use std::collections::HashMap;

use humansize::format_size;
use serde_json::value::{to_value, Value};
use tera::{try_get_value, Result};

/// Returns a human-readable file size (i.e. '110 MB') from an integer.
/// Pass `binary=true` for 1024-based units with IEC labels (MiB, GiB).
pub fn human_file_size(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
    let num = try_get_value!("human_file_size", "value", usize, value);
    let binary = match args.get("binary") {
        Some(binary) => try_get_value!("human_file_size", "binary", bool, binary),
        None => false,
    };
    let format = if binary { humansize::BINARY } else { humansize::WINDOWS };
    Ok(to_value(format_size(num, format))
        .expect("json serializing should always be possible for a string"))
}
