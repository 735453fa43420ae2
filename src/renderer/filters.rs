use crate::constants::RESERVED_TAGS;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use minijinja::value::ValueKind;
use minijinja::{Error, ErrorKind, Value};
use pulldown_cmark_escape::escape_html;

/// Formats a date the way post bylines show it, e.g. `Oct 16, 2026`.
pub fn post_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Parses the date shapes that show up in front matter and page data.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DD`. Offsets are kept as written rather than converted.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Template filter wrapping [`post_date`]. Integers are unix seconds.
pub fn post_date_filter(value: &Value) -> Result<String, Error> {
    let parsed = match value.kind() {
        ValueKind::String => value.as_str().and_then(parse_date),
        ValueKind::Number => i64::try_from(value.clone())
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc()),
        _ => None,
    };

    parsed.map(|dt| post_date(dt.date())).ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, format!("cannot format '{value}' as a date"))
    })
}

/// Drops the bookkeeping tags (`post`, `featured`, `pages`), keeping order.
pub fn post_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref())
        .filter(|tag| !RESERVED_TAGS.contains(tag))
        .map(str::to_string)
        .collect()
}

pub fn post_tags_filter(tags: Option<Vec<String>>) -> Vec<String> {
    tags.map(|tags| post_tags(&tags)).unwrap_or_default()
}

/// Returns the first `num` items as a new sequence. `items` is left as is.
pub fn top<T: Clone>(items: &[T], num: usize) -> Vec<T> {
    items.iter().take(num).cloned().collect()
}

pub fn top_filter(items: Vec<Value>, num: usize) -> Vec<Value> {
    top(&items, num)
}

/// Current four-digit year, read from the clock on every call.
pub fn year() -> String {
    Local::now().year().to_string()
}

/// Wraps a code snippet in the markup the highlighting stylesheet targets.
pub fn highlight(code: &str, lang: Option<&str>) -> String {
    let lang: Option<String> = lang
        .map(|l| {
            l.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '-' | '_' | '+'))
                .collect::<String>()
        })
        .filter(|l| !l.is_empty());

    let mut html = match &lang {
        Some(lang) => format!("<pre class=\"language-{lang}\"><code class=\"language-{lang}\">"),
        None => String::from("<pre><code>"),
    };
    let _ = escape_html(&mut html, code);
    html.push_str("</code></pre>\n");
    html
}

pub fn highlight_filter(code: &str, lang: Option<&str>) -> Value {
    Value::from_safe_string(highlight(code, lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_date_medium_format() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(post_date(date), "Mar 7, 2021");
    }

    #[test]
    fn test_parse_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        for input in [
            "2020-12-31",
            "2020-12-31T08:30:00",
            "2020-12-31 08:30:00",
            "2020-12-31T23:30:00-05:00",
        ] {
            assert_eq!(parse_date(input).unwrap().date(), expected, "{input}");
        }
        assert!(parse_date("31/12/2020").is_none());
    }

    #[test]
    fn test_post_date_filter_values() {
        assert_eq!(post_date_filter(&Value::from("2019-01-05")).unwrap(), "Jan 5, 2019");
        assert_eq!(post_date_filter(&Value::from(0)).unwrap(), "Jan 1, 1970");
        assert!(post_date_filter(&Value::from("yesterday")).is_err());
        assert!(post_date_filter(&Value::from(true)).is_err());
    }

    #[test]
    fn test_post_tags_excludes_reserved() {
        let tags = ["post", "go", "featured", "rust"];
        assert_eq!(post_tags(&tags), vec!["go", "rust"]);
    }

    #[test]
    fn test_post_tags_keeps_order_and_duplicates() {
        let tags = ["zig", "pages", "ada", "zig"];
        assert_eq!(post_tags(&tags), vec!["zig", "ada", "zig"]);
        assert!(post_tags_filter(None).is_empty());
    }

    #[test]
    fn test_top_does_not_mutate_input() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(top(&items, 2), vec![1, 2]);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_top_past_the_end() {
        assert_eq!(top(&[1, 2], 10), vec![1, 2]);
        assert!(top(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_year_matches_clock() {
        let y = year();
        assert_eq!(y.len(), 4);
        assert_eq!(y, Local::now().year().to_string());
    }

    #[test]
    fn test_highlight_escapes_and_tags_language() {
        assert_eq!(
            highlight("a < b && c", Some("rust")),
            "<pre class=\"language-rust\"><code class=\"language-rust\">a &lt; b &amp;&amp; c</code></pre>\n"
        );
        assert_eq!(highlight("x", None), "<pre><code>x</code></pre>\n");
        assert_eq!(
            highlight("x", Some("\"><script>")),
            "<pre class=\"language-script\"><code class=\"language-script\">x</code></pre>\n"
        );
    }
}
