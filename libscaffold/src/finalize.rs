//! Picking one representative path out of each accepted group.
use crate::grouping::PathGroup;
use crate::path::ScaffoldPath;

/// Bucket width, in bases, within which path lengths are considered interchangeable.
const STEP: i64 = 1000;

/// Bucket a group's members by length (gaps of more than [`STEP`] start a new bucket), keep the
/// largest bucket, and within it return the member with the greatest mean overlap identity.
pub fn finalize_group(mut members: Vec<ScaffoldPath>) -> Option<ScaffoldPath> {
    if members.is_empty() {
        return None;
    }
    members.sort_by_key(|m| m.length);

    let mut buckets: Vec<Vec<ScaffoldPath>> = Vec::new();
    for member in members {
        let starts_new_bucket = match buckets.last() {
            Some(bucket) => member.length - bucket[0].length > STEP,
            None => true,
        };
        if starts_new_bucket {
            buckets.push(vec![member]);
        } else {
            buckets.last_mut().unwrap().push(member);
        }
    }

    let mut best_idx = 0;
    for i in 1..buckets.len() {
        if buckets[i].len() > buckets[best_idx].len() {
            best_idx = i;
        }
    }
    let mut best_bucket = buckets.swap_remove(best_idx);
    best_bucket.sort_by(|a, b| b.si_avg.partial_cmp(&a.si_avg).unwrap());
    best_bucket.into_iter().next()
}

/// Run [`finalize_group`] over every accepted group, dropping any that end up empty.
pub fn finalize_groups(groups: Vec<PathGroup>) -> Vec<ScaffoldPath> {
    groups.into_iter().filter_map(|g| finalize_group(g.members)).collect()
}
