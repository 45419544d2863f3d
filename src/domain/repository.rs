use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

/// Repositories visible to the caller, keyed by `full_name`.
///
/// Sources are merged in the order they are fed to [`RepositoryIndex::merge`].
/// On a `full_name` collision the later source wins, so organization
/// listings merged after the personal listing replace personal entries.
#[derive(Debug, Clone, Default)]
pub struct RepositoryIndex {
    entries: BTreeMap<String, Repository>,
    replaced: usize,
}

impl RepositoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge<I>(&mut self, repositories: I)
    where
        I: IntoIterator<Item = Repository>,
    {
        for repository in repositories {
            if self
                .entries
                .insert(repository.full_name.clone(), repository)
                .is_some()
            {
                self.replaced += 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn replaced(&self) -> usize {
        self.replaced
    }
}
