/// Filters operating on multiple types
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::value::{to_value, Value};
use tera::{try_get_value, Error, Filter, Result};

#[cfg(feature = "date-locale")]
use chrono::format::Locale;
#[cfg(not(feature = "date-locale"))]
use log::warn;

#[cfg(feature = "date-locale")]
macro_rules! render_date {
    ($dt:expr, $format:expr, $locale:expr) => {
        match $locale {
            Some(locale) => $dt.format_localized($format, locale).to_string(),
            None => $dt.format($format).to_string(),
        }
    };
}

#[cfg(not(feature = "date-locale"))]
macro_rules! render_date {
    ($dt:expr, $format:expr, $locale:expr) => {{
        let _ = $locale;
        $dt.format($format).to_string()
    }};
}

/// Decodes a JSON string into a value.
pub fn json_decode(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    let s = try_get_value!("json_decode", "value", String, value);
    serde_json::from_str(&s)
        .map_err(|err| Error::msg(format!("Filter `json_decode` received invalid JSON: {}", err)))
}

/// Returns a formatted date according to the given `format` argument.
/// `format` defaults to the ISO 8601 `YYYY-MM-DD` format.
///
/// Input can be an i64 timestamp (seconds since epoch), an RFC 3339 string, a
/// naive datetime string or a `YYYY-MM-DD` date string.
///
/// With the `date-locale` feature, a `locale` argument (or the host locale
/// the filter was built with) selects localized month/day names; an unknown
/// locale falls back to the unlocalized format.
pub struct DateFormat {
    locale: Option<String>,
}

impl DateFormat {
    /// A `date_format` filter with the given fallback locale.
    pub fn new(locale: Option<String>) -> Self {
        DateFormat { locale }
    }
}

impl Filter for DateFormat {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
        let format = match args.get("format") {
            Some(val) => try_get_value!("date_format", "format", String, val),
            None => "%Y-%m-%d".to_string(),
        };
        let requested = match args.get("locale") {
            Some(val) => Some(try_get_value!("date_format", "locale", String, val)),
            None => self.locale.clone(),
        };
        let locale = resolve_locale(requested.as_deref());

        let formatted = match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => {
                    let datetime = DateTime::from_timestamp(i, 0).ok_or_else(|| {
                        Error::msg(format!(
                            "Filter `date_format` received an out of range timestamp: {}",
                            i
                        ))
                    })?;
                    render_date!(datetime, &format, locale)
                }
                None => {
                    return Err(Error::msg(format!(
                        "Filter `date_format` was invoked on a float: {}",
                        n
                    )));
                }
            },
            Value::String(s) => {
                if s.contains('T') {
                    match s.parse::<DateTime<FixedOffset>>() {
                        Ok(val) => render_date!(val, &format, locale),
                        Err(_) => match s.parse::<NaiveDateTime>() {
                            Ok(val) => render_date!(val, &format, locale),
                            Err(_) => {
                                return Err(Error::msg(format!(
                                    "Error parsing `{:?}` as rfc3339 date or naive datetime",
                                    s
                                )));
                            }
                        },
                    }
                } else {
                    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                        Ok(val) => {
                            let datetime =
                                DateTime::<Utc>::from_naive_utc_and_offset(val.and_time(NaiveTime::MIN), Utc);
                            render_date!(datetime, &format, locale)
                        }
                        Err(_) => {
                            return Err(Error::msg(format!(
                                "Error parsing `{:?}` as YYYY-MM-DD date",
                                s
                            )));
                        }
                    }
                }
            }
            _ => {
                return Err(Error::msg(format!(
                    "Filter `date_format` received an incorrect type for arg `value`: \
                     got `{:?}` but expected i64|u64|String",
                    value
                )));
            }
        };

        Ok(to_value(formatted).unwrap())
    }
}

#[cfg(feature = "date-locale")]
fn resolve_locale(requested: Option<&str>) -> Option<Locale> {
    let name = requested?;
    match Locale::try_from(name.replace('-', "_").as_str()) {
        Ok(locale) => Some(locale),
        Err(_) => {
            log::warn!("unknown date locale `{}`, using the unlocalized format", name);
            None
        }
    }
}

#[cfg(not(feature = "date-locale"))]
fn resolve_locale(requested: Option<&str>) -> Option<()> {
    if let Some(name) = requested {
        warn!("date locale `{}` ignored, the `date-locale` feature is disabled", name);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::value::to_value;
    use std::collections::HashMap;

    fn date_format(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
        DateFormat::new(None).filter(value, args)
    }

    #[test]
    fn date_format_default() {
        let args = HashMap::new();
        let result = date_format(&to_value(1482720453).unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("2016-12-26").unwrap());
    }

    #[test]
    fn date_format_custom_format() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%Y-%m-%d %H:%M").unwrap());
        let result = date_format(&to_value(1482720453).unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("2016-12-26 02:47").unwrap());
    }

    #[test]
    fn date_format_rfc3339_preserves_timezone() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%Y-%m-%d %z").unwrap());
        let result = date_format(&to_value("1996-12-19T16:39:57-08:00").unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("1996-12-19 -0800").unwrap());
    }

    #[test]
    fn date_format_yyyy_mm_dd() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%a, %d %b %Y %H:%M:%S %z").unwrap());
        let result = date_format(&to_value("2017-03-05").unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("Sun, 05 Mar 2017 00:00:00 +0000").unwrap());
    }

    #[test]
    fn date_format_from_naive_datetime() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%a, %d %b %Y %H:%M:%S").unwrap());
        let result = date_format(&to_value("2017-03-05T00:00:00.602").unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("Sun, 05 Mar 2017 00:00:00").unwrap());
    }

    #[test]
    fn date_format_float_errors() {
        let result = date_format(&to_value(1482720453.123).unwrap(), &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn date_format_bad_string_errors() {
        let result = date_format(&to_value("yesterday").unwrap(), &HashMap::new());
        assert!(result.is_err());
    }

    #[cfg(feature = "date-locale")]
    #[test]
    fn date_format_localized() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%A %d %B %Y").unwrap());
        args.insert("locale".to_string(), to_value("fr_FR").unwrap());
        let result = date_format(&to_value("2017-03-05").unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("dimanche 05 mars 2017").unwrap());
    }

    #[cfg(feature = "date-locale")]
    #[test]
    fn date_format_unknown_locale_falls_back() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), to_value("%Y-%m-%d").unwrap());
        args.insert("locale".to_string(), to_value("xx_XX").unwrap());
        let result = date_format(&to_value("2017-03-05").unwrap(), &args);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), to_value("2017-03-05").unwrap());
    }

    #[test]
    fn json_decode_object() {
        let result =
            json_decode(&to_value(r#"{"key": [1, 2, true]}"#).unwrap(), &HashMap::new());
        assert!(result.is_ok());
        assert_eq!(
            result.unwrap(),
            serde_json::from_str::<Value>(r#"{"key": [1, 2, true]}"#).unwrap()
        );
    }

    #[test]
    fn json_decode_invalid() {
        let result = json_decode(&to_value("{not json").unwrap(), &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn json_decode_wrong_type() {
        let result = json_decode(&to_value(12).unwrap(), &HashMap::new());
        assert!(result.is_err());
    }
}
