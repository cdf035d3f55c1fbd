//! Grouping candidate paths by shared endpoints and filtering down to at most one path per
//! anchor pair.
use std::collections::HashSet;

use crate::path::ScaffoldPath;
use crate::search::Direction;

fn direction_rank(d: Direction) -> u8 {
    match d {
        Direction::Left => 0,
        Direction::Right => 1,
    }
}

/// A contiguous run of paths sharing the same `(sname, ename, direction)`.
#[derive(Debug)]
pub struct PathGroup {
    pub sname: String,
    pub ename: String,
    pub direction: Direction,
    pub members: Vec<ScaffoldPath>,
}

/// Sort paths by `(sname, ename, direction)` and collapse runs that share all three into groups.
pub fn group_paths(mut records: Vec<ScaffoldPath>) -> Vec<PathGroup> {
    records.sort_by(|a, b| {
        (a.sname.as_str(), a.ename.as_str(), direction_rank(a.direction)).cmp(&(
            b.sname.as_str(),
            b.ename.as_str(),
            direction_rank(b.direction),
        ))
    });

    let mut groups: Vec<PathGroup> = Vec::new();
    for record in records {
        let extends_last = groups
            .last()
            .is_some_and(|g| g.sname == record.sname && g.ename == record.ename && g.direction == record.direction);
        if extends_last {
            groups.last_mut().unwrap().members.push(record);
        } else {
            groups.push(PathGroup {
                sname: record.sname.clone(),
                ename: record.ename.clone(),
                direction: record.direction,
                members: vec![record],
            });
        }
    }
    groups
}

/// Keep only `RIGHT`-direction groups (their `LEFT` twins are redundant), then greedily accept
/// the largest groups first, skipping any whose `sname` or `ename` is already claimed.
pub fn filter_path_groups(mut groups: Vec<PathGroup>) -> Vec<PathGroup> {
    groups.retain(|g| g.direction == Direction::Right);
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));

    let mut used = HashSet::new();
    let mut accepted = Vec::new();
    for group in groups {
        if used.contains(&group.sname) || used.contains(&group.ename) {
            continue;
        }
        used.insert(group.sname.clone());
        used.insert(group.ename.clone());
        accepted.push(group);
    }
    accepted
}
