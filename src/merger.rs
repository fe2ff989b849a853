use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    category::{Category, SuffixPolicy},
    error::TableError,
    record_set::{Cell, RecordSet},
    table_locator::TEAM_COLUMN,
};

/// Inner-joins the category tables on the team column, in the order given.
///
/// Incoming columns whose name is already taken get the category's suffix
/// from `policy`; accumulated columns keep their names. A team missing from
/// any category does not appear in the result.
pub fn merge_categories(
    tables: Vec<(Category, RecordSet)>,
    policy: &SuffixPolicy,
) -> Result<RecordSet, TableError> {
    let mut tables = tables.into_iter();
    let Some((_, mut merged)) = tables.next() else {
        return Ok(RecordSet::default());
    };
    for (category, incoming) in tables {
        let suffix = policy.suffix(category);
        merged = join(&merged, &incoming, &suffix, JoinKind::Inner)?;
    }
    Ok(merged)
}

/// Left-joins `right` onto `left` by team. Unmatched left rows are kept with
/// missing cells in the right-hand columns.
pub fn left_join(left: &RecordSet, right: &RecordSet) -> Result<RecordSet, TableError> {
    join(left, right, "_y", JoinKind::Left)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinKind {
    Inner,
    Left,
}

fn join(
    left: &RecordSet,
    right: &RecordSet,
    suffix: &str,
    kind: JoinKind,
) -> Result<RecordSet, TableError> {
    let left_key = left.column_index(TEAM_COLUMN)?;
    let right_key = right.column_index(TEAM_COLUMN)?;

    let taken: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    let mut columns = left.columns().to_vec();
    let mut carried = Vec::with_capacity(right.width().saturating_sub(1));
    for (i, name) in right.columns().iter().enumerate() {
        if i == right_key {
            continue;
        }
        carried.push(i);
        if taken.contains(name.as_str()) {
            columns.push(format!("{name}{suffix}"));
        } else {
            columns.push(name.clone());
        }
    }

    let mut by_team: HashMap<String, Vec<&Vec<Cell>>> = HashMap::new();
    for row in right.rows() {
        by_team.entry(row[right_key].to_string()).or_default().push(row);
    }

    let mut out = RecordSet::new(columns);
    for row in left.rows() {
        let team = row[left_key].to_string();
        match by_team.get(&team) {
            Some(matches) => {
                for other in matches {
                    let mut joined = row.clone();
                    joined.extend(carried.iter().map(|&i| other[i].clone()));
                    out.push_row(joined)?;
                }
            }
            None if kind == JoinKind::Left => {
                let mut joined = row.clone();
                joined.extend(carried.iter().map(|_| Cell::Missing));
                out.push_row(joined)?;
            }
            None => debug!("dropping '{team}': no matching row in the joined table"),
        }
    }
    Ok(out)
}
