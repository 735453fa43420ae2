use crate::constants::FRONT_MATTER_FENCE;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Splits a leading `---` YAML block from the rest of the source.
///
/// Sources without front matter yield an empty map and the whole source as
/// body. An unterminated block is treated as body text.
pub fn split_front_matter<'a>(
    source: &'a str,
    path: &Path,
) -> Result<(Map<String, Value>, &'a str)> {
    let Some(rest) = strip_fence_line(source) else {
        return Ok((Map::new(), source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml_mapping(yaml, path)?, body));
        }
        offset += line.len();
    }

    Ok((Map::new(), source))
}

fn strip_fence_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FRONT_MATTER_FENCE)?;
    let (first_line, after) = match rest.find('\n') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => return None,
    };
    first_line.trim().is_empty().then_some(after)
}

fn parse_yaml_mapping(yaml: &str, path: &Path) -> Result<Map<String, Value>> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| Error::FrontMatter {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::FrontMatter {
            path: path.display().to_string(),
            reason: format!("expected a mapping, found {other}"),
        }),
    }
}
