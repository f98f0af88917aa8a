//! Typed data models for external API responses and the output record.
//!
//! Raw JSON from upstream services is parsed into these narrow DTOs at the
//! network boundary; nothing above that layer touches untyped maps.

pub mod github;
pub mod hf;
pub mod record;

pub use github::{
    CommitAuthor, CommitDetail, CommitEntry, CommitParent, Contributor, GithubStats, RepoInfo,
};
pub use hf::{HfDatasetInfo, HfModelInfo, HfSibling};
pub use record::{EvaluationRecord, SizeScore};
