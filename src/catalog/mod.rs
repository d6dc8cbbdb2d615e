//! Chart catalog wiring.
//!
//! Repository index files are parsed into `RepoIndex` values, collected in a
//! `RepositorySet`, and merged into a `ChartIndex` that answers queries.
//! Types in `model` mirror the index file layout; `identity` holds the
//! repository and key newtypes shared by the rest of the crate.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{QualifiedKey, RepoName};
pub use index::ChartIndex;
pub use model::{ChartEntry, RepoIndex};
pub use repository::{RepositoriesFile, RepositoryRef, RepositorySet};

pub use model::load_repo_index_from_path;
