pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{Contributor, NewRepository, RepoOwner, Repository, Stargazer, TopicSet};
