use std::fmt;

/// File status as reported by the upstream commit API. Unrecognised values
/// are kept verbatim so labels built from them stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    Other(String),
}

impl FileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Changed => "changed",
            FileStatus::Unchanged => "unchanged",
            FileStatus::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "added" => FileStatus::Added,
            "modified" => FileStatus::Modified,
            "removed" => FileStatus::Removed,
            "renamed" => FileStatus::Renamed,
            "copied" => FileStatus::Copied,
            "changed" => FileStatus::Changed,
            "unchanged" => FileStatus::Unchanged,
            other => FileStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub filename: String,
    pub status: FileStatus,
}

impl FileChange {
    pub fn new(filename: impl Into<String>, status: FileStatus) -> Self {
        Self {
            filename: filename.into(),
            status,
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.filename, self.status)
    }
}

/// A commit. `files` stays empty until the detail fetch fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub files: Vec<FileChange>,
}

impl Commit {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSource {
    Comparison,
    // Not the commits between the tags; callers must say so.
    RecentFromBase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub commits: Vec<Commit>,
    pub source: RangeSource,
}

/// Keeps the first `limit` commits; `0` keeps everything.
pub fn apply_limit(mut commits: Vec<Commit>, limit: usize) -> Vec<Commit> {
    if limit > 0 {
        commits.truncate(limit);
    }
    commits
}
