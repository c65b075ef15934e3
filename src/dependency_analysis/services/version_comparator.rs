use crate::dependency_analysis::domain::DependencyNode;
use std::cmp::Ordering;
use std::collections::BTreeMap;

fn leading_number(segment: &str) -> u64 {
    let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Compares dotted versions segment by segment as numbers.
///
/// Missing segments count as zero, so `1.0` equals `1.0.0`; a segment such
/// as `2-jre` compares by its leading digits.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left: Vec<u64> = left.split('.').map(leading_number).collect();
    let right: Vec<u64> = right.split('.').map(leading_number).collect();
    let length = left.len().max(right.len());

    (0..length)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// SCM URL → highest version among `nodes` that share it.
///
/// Nodes without a resolved SCM URL are ignored. On equal versions the
/// later node wins.
pub fn collect_latest_versions<'a, I>(nodes: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a DependencyNode>,
{
    let mut latest: BTreeMap<String, String> = BTreeMap::new();
    for node in nodes {
        if !node.has_resolved_scm_url() {
            continue;
        }
        let Some(url) = node.scm_url() else {
            continue;
        };
        match latest.get_mut(url) {
            Some(current) => {
                if compare_versions(current, node.version()) != Ordering::Greater {
                    *current = node.version().to_string();
                }
            }
            None => {
                latest.insert(url.to_string(), node.version().to_string());
            }
        }
    }
    latest
}
