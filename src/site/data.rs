//! Global data files exposed to every template.

use crate::error::Result;
use crate::ext::PathExt;
use log::debug;
use serde_json::{Map, Value};
use std::path::Path;
use walkdir::WalkDir;

/// Loads every `.json`, `.yaml` and `.yml` file under `data_dir`.
///
/// `_data/site.json` becomes the `site` key; files in subdirectories nest,
/// so `_data/nav/main.yaml` becomes `nav.main`. A missing directory yields
/// an empty map.
pub fn load_global_data(data_dir: &Path) -> Result<Map<String, Value>> {
    let mut data = Map::new();
    if !data_dir.is_dir() {
        debug!("No global data directory at {}", data_dir.display());
        return Ok(data);
    }

    for entry in WalkDir::new(data_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let value: Value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            _ => continue,
        };

        let rel = path.relative_to(data_dir).with_extension("");
        let keys: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        debug!("Loaded global data '{}' from {}", keys.join("."), path.display());
        insert_nested(&mut data, &keys, value);
    }
    Ok(data)
}

fn insert_nested(map: &mut Map<String, Value>, keys: &[String], value: Value) {
    match keys {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [first, rest @ ..] => {
            let child = map
                .entry(first.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_nested(child, rest, value);
            }
        }
    }
}

/// Looks up a dotted path such as `collections.post` in a context object.
pub fn lookup_path<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(context, |value, segment| value.get(segment))
}
