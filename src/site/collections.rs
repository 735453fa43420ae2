use crate::site::page::Page;
use indexmap::IndexMap;
use serde_json::Value;

/// Pages grouped by tag, plus `all`.
///
/// Members are kept as indices into the page list so later passes can attach
/// rendered content without rebuilding the grouping.
#[derive(Debug, Default)]
pub struct Collections {
    groups: IndexMap<String, Vec<usize>>,
}

impl Collections {
    /// Groups `pages` (those flagged in `members`) by tag, ordered by date
    /// and then input path.
    pub fn build(pages: &[Page], members: &[bool]) -> Self {
        let mut order: Vec<usize> =
            (0..pages.len()).filter(|&i| members.get(i).copied().unwrap_or(false)).collect();
        order.sort_by(|&a, &b| {
            pages[a]
                .date
                .cmp(&pages[b].date)
                .then_with(|| pages[a].rel_path.cmp(&pages[b].rel_path))
        });

        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        groups.insert("all".to_string(), order.clone());
        for &index in &order {
            for tag in pages[index].tags() {
                groups.entry(tag).or_default().push(index);
            }
        }
        Self { groups }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn members(&self, tag: &str) -> &[usize] {
        self.groups.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// The `collections` variable, with `items[i]` standing in for page `i`.
    pub fn to_value(&self, items: &[Value]) -> Value {
        let map = self
            .groups
            .iter()
            .map(|(tag, members)| {
                let entries = members.iter().filter_map(|&i| items.get(i).cloned()).collect();
                (tag.clone(), Value::Array(entries))
            })
            .collect();
        Value::Object(map)
    }
}
