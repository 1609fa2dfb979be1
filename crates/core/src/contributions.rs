//! Contribution leaderboard and knowledge-base totals.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::practice::Practice;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// 1-based position after sorting.
    pub rank: usize,
    pub student: String,
    pub entries_added: u64,
    /// Entries where this student is the most recent editor.
    pub entries_edited: u64,
    pub total_contributions: u64,
}

/// Headline numbers shown above the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeBaseStats {
    pub practices: usize,
    /// Distinct students who added at least one entry.
    pub contributors: usize,
    pub total_edits: i64,
}

/// Tally additions and edits per student.
///
/// Sorted by total descending, ties broken by name so the order is stable.
pub fn summarize(practices: &[Practice]) -> Vec<Contribution> {
    let mut tally: BTreeMap<&str, (u64, u64)> = BTreeMap::new();

    for practice in practices {
        let added_by = practice.added_by.trim();
        if !added_by.is_empty() {
            tally.entry(added_by).or_default().0 += 1;
        }
        if let Some(editor) = practice.editor() {
            tally.entry(editor).or_default().1 += 1;
        }
    }

    let mut rows: Vec<Contribution> = tally
        .into_iter()
        .map(|(student, (added, edited))| Contribution {
            rank: 0,
            student: student.to_string(),
            entries_added: added,
            entries_edited: edited,
            total_contributions: added + edited,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_contributions
            .cmp(&a.total_contributions)
            .then_with(|| a.student.cmp(&b.student))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

pub fn stats(practices: &[Practice]) -> KnowledgeBaseStats {
    let contributors: BTreeSet<&str> = practices
        .iter()
        .map(|p| p.added_by.trim())
        .filter(|name| !name.is_empty())
        .collect();

    KnowledgeBaseStats {
        practices: practices.len(),
        contributors: contributors.len(),
        total_edits: practices.iter().map(|p| p.edit_count).sum(),
    }
}
