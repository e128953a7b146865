use serde::{Deserialize, Serialize};

/// Owner of a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    /// Account name
    pub login: String,
    /// Profile URL
    pub html_url: String,
    /// Avatar URL
    pub avatar_url: Option<String>,
}

/// Repository descriptor as returned by the repos endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID
    pub id: u64,
    /// Repository name
    pub name: String,
    /// Name in owner/repo form
    pub full_name: String,
    /// Repository owner
    pub owner: RepoOwner,
    /// Repository description
    pub description: Option<String>,
    /// Repository URL
    pub html_url: String,
    /// Whether the repository is private
    pub private: bool,
    /// Whether the repository is a fork
    pub fork: bool,
    /// Star count
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count
    #[serde(default)]
    pub forks_count: u64,
}

/// Request body for repository creation
#[derive(Debug, Clone, Serialize)]
pub struct NewRepository {
    /// Repository name
    pub name: String,
    /// Repository description
    pub description: String,
    /// Homepage URL
    pub homepage: String,
    /// Whether the repository is private
    pub private: bool,
}

/// A contributor of a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Account name
    pub login: String,
    /// Profile URL
    pub html_url: String,
    /// Commit count
    pub contributions: u64,
}

/// An account that starred a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stargazer {
    /// Account name
    pub login: String,
    /// Profile URL
    pub html_url: String,
}

/// Wire form of the topics endpoint. The upstream API replaces the whole set
/// on every PUT, so this always carries the complete list of names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSet {
    /// Topic names, unordered, no duplicates
    pub names: Vec<String>,
}

impl TopicSet {
    /// True when the set contains the given topic (exact string match)
    pub fn contains(&self, topic: &str) -> bool {
        self.names.iter().any(|name| name == topic)
    }
}
