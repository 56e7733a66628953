use serde::Deserialize;

/// Per-file statistics as reported by the pull request file listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileChange {
    pub filename: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

impl DiffSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_files<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a FileChange>,
    {
        files
            .into_iter()
            .fold(Self::empty(), |summary, file| summary.add(file))
    }

    fn add(self, file: &FileChange) -> Self {
        Self {
            additions: self.additions.saturating_add(file.additions),
            deletions: self.deletions.saturating_add(file.deletions),
            changes: self.changes.saturating_add(file.changes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, additions: u64, deletions: u64, changes: u64) -> FileChange {
        FileChange {
            filename: name.to_string(),
            additions,
            deletions,
            changes,
        }
    }

    #[test]
    fn sums_every_file() {
        let files = vec![file("src/lib.rs", 3, 1, 4), file("README.md", 0, 2, 2)];
        let summary = DiffSummary::from_files(&files);
        assert_eq!(
            summary,
            DiffSummary {
                additions: 3,
                deletions: 3,
                changes: 6,
            }
        );
    }

    #[test]
    fn empty_listing_is_all_zeros() {
        let files: Vec<FileChange> = Vec::new();
        let summary = DiffSummary::from_files(&files);
        assert_eq!(summary, DiffSummary::empty());
        assert_eq!(summary.changes, 0);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let files = vec![file("a", u64::MAX, 0, u64::MAX), file("b", 5, 1, 6)];
        let summary = DiffSummary::from_files(&files);
        assert_eq!(summary.additions, u64::MAX);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.changes, u64::MAX);
    }

    #[test]
    fn decodes_github_file_entry() {
        let raw = r#"{
            "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
            "filename": "file1.txt",
            "status": "added",
            "additions": 103,
            "deletions": 21,
            "changes": 124,
            "patch": "@@ -132,7 +132,7 @@ module Test @@ -1000,7 +1000,7 @@ module Test"
        }"#;
        let parsed: FileChange = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, file("file1.txt", 103, 21, 124));
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        fn file_changes() -> impl Strategy<Value = Vec<FileChange>> {
            prop::collection::vec(
                (0..10_000_u64, 0..10_000_u64, 0..20_000_u64).prop_map(
                    |(additions, deletions, changes)| FileChange {
                        filename: "src/lib.rs".to_string(),
                        additions,
                        deletions,
                        changes,
                    },
                ),
                0..64,
            )
        }

        proptest! {
            /// Every field equals the plain sum over the listing.
            #[test]
            fn prop_summary_matches_field_sums(files in file_changes()) {
                let summary = DiffSummary::from_files(&files);
                prop_assert_eq!(summary.additions, files.iter().map(|f| f.additions).sum::<u64>());
                prop_assert_eq!(summary.deletions, files.iter().map(|f| f.deletions).sum::<u64>());
                prop_assert_eq!(summary.changes, files.iter().map(|f| f.changes).sum::<u64>());
            }
        }
    }
}
