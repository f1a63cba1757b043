//! Grouping and sorting of transformed commits

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CommitGroup, CommitRecord, GroupedNote, NoteGroup};

/// Commit field used to bucket commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Type,
    Scope,
}

/// Commit field used when ordering commits inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitSortKey {
    Scope,
    Subject,
    Hash,
}

/// Ordering of groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupSort {
    Title,
}

/// Ordering of notes within a note group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesSort {
    /// Compare each note's own fields: title, then text
    NaturalFields,
}

/// Declarative grouping/sorting keys for one changelog run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub group_by: GroupBy,
    pub commit_groups_sort: GroupSort,
    pub commits_sort: Vec<CommitSortKey>,
    pub note_groups_sort: GroupSort,
    pub notes_sort: NotesSort,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Type,
            commit_groups_sort: GroupSort::Title,
            commits_sort: vec![CommitSortKey::Scope, CommitSortKey::Subject],
            note_groups_sort: GroupSort::Title,
            notes_sort: NotesSort::NaturalFields,
        }
    }
}

impl GroupingConfig {
    /// Bucket commits by the group-by field and sort groups and commits
    pub fn group_commits(&self, commits: Vec<CommitRecord>) -> Vec<CommitGroup> {
        let mut buckets: HashMap<String, Vec<CommitRecord>> = HashMap::new();
        for commit in commits {
            let key = match self.group_by {
                GroupBy::Type => commit.commit_type.clone(),
                GroupBy::Scope => commit.scope.clone(),
            };
            buckets.entry(key.unwrap_or_default()).or_default().push(commit);
        }

        let mut groups: Vec<CommitGroup> = buckets
            .into_iter()
            .map(|(title, mut commits)| {
                commits.sort_by(|a, b| self.compare_commits(a, b));
                CommitGroup { title, commits }
            })
            .collect();

        match self.commit_groups_sort {
            GroupSort::Title => groups.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        debug!(group_count = groups.len(), "commit groups built");
        groups
    }

    /// Collect notes of all commits into groups by note title
    pub fn group_notes(&self, commits: &[CommitRecord]) -> Vec<NoteGroup> {
        let mut groups: Vec<NoteGroup> = Vec::new();

        for commit in commits {
            for note in &commit.notes {
                let grouped = GroupedNote {
                    title: note.title.clone(),
                    text: note.text.clone(),
                    commit_scope: commit.scope.clone(),
                    commit_hash: commit.hash.clone(),
                };
                match groups.iter_mut().find(|g| g.title == note.title) {
                    Some(group) => group.notes.push(grouped),
                    None => groups.push(NoteGroup {
                        title: note.title.clone(),
                        notes: vec![grouped],
                    }),
                }
            }
        }

        match self.note_groups_sort {
            GroupSort::Title => groups.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        for group in &mut groups {
            match self.notes_sort {
                NotesSort::NaturalFields => group
                    .notes
                    .sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.text.cmp(&b.text))),
            }
        }

        groups
    }

    /// Compare by each configured key in turn; absent fields compare as ""
    fn compare_commits(&self, a: &CommitRecord, b: &CommitRecord) -> Ordering {
        self.commits_sort
            .iter()
            .map(|key| match key {
                CommitSortKey::Scope => a.scope_str().cmp(b.scope_str()),
                CommitSortKey::Subject => a.subject_str().cmp(b.subject_str()),
                CommitSortKey::Hash => a
                    .hash
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.hash.as_deref().unwrap_or("")),
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
