//! Search side of portpack: provider backends, per-source query templates,
//! the sequential multi-source runner, and the selection session.

pub mod error;
pub mod providers;
pub mod queries;
pub mod run;
pub mod session;
pub mod types;

pub use error::SearchError;
pub use providers::{
    build_provider, run_query, BingProvider, MockProvider, SearchProvider, SerpApiProvider,
};
pub use queries::{auto_query, build_queries};
pub use run::run_searches;
pub use session::SearchSession;
pub use types::{SearchMode, SourceQuery, SourceResults};
