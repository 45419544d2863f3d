use std::collections::BTreeSet;

use crate::domain::commit::FileChange;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub commit_count: usize,
    pub changed_files: BTreeSet<String>,
    pub commit_messages: Vec<String>,
    /// Per-commit file changes counted before deduplication.
    pub file_changes_seen: usize,
}

impl ChangeSummary {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commit_messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        Self {
            commit_count: commit_messages.len(),
            commit_messages,
            ..Self::default()
        }
    }

    pub fn record_files(&mut self, files: &[FileChange]) {
        self.file_changes_seen += files.len();
        self.changed_files.extend(files.iter().map(FileChange::label));
    }

    pub fn render(&self) -> String {
        let files = self
            .changed_files
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        let messages = self.commit_messages.join("\n");

        format!(
            "📌 **Number of commits analyzed:** {}\n\
             📂 **Files changed:** {}\n\
             \n\
             🔹 **List of changed files:**\n\
             {files}\n\
             \n\
             📝 **Commit Messages:**\n\
             {messages}\n",
            self.commit_count,
            self.changed_files.len(),
        )
    }
}
