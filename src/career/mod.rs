//! Career assistant pipeline served as an A2A message handler
//!
//! Five stages share one session per conversation: resume intake (role
//! inference), job matching, resume tailoring, interview preparation and
//! project ideas. The language model and job search services sit behind
//! [`CareerAgents`]; this module only sequences them and keeps the session
//! state in a caller-owned [`SessionStore`].

pub mod handler;
pub mod models;
pub mod store;

pub use handler::{split_project_ideas, CareerHandler};
pub use models::{CareerSession, JobListing, Stage, DEFAULT_LOCATION, JOB_SEARCH_LIMIT};
pub use store::SessionStore;

use async_trait::async_trait;

/// External collaborators behind each pipeline stage.
///
/// Implementations call whatever model or search provider they like; errors
/// are passed through to the caller unchanged.
#[async_trait]
pub trait CareerAgents: Send + Sync {
    /// Infer the single job role the resume targets
    async fn infer_role(&self, resume_text: &str) -> anyhow::Result<String>;

    /// Search recent postings for a role
    async fn search_jobs(
        &self,
        role: &str,
        location: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<JobListing>>;

    /// Rewrite the resume for one posting
    async fn tailor_resume(&self, resume_text: &str, job: &JobListing) -> anyhow::Result<String>;

    /// Interview preparation guide for one posting
    async fn interview_guide(&self, resume_text: &str, job: &JobListing) -> anyhow::Result<String>;

    /// Portfolio project suggestions, as free text with blank-line separated ideas
    async fn project_ideas(&self, role: &str, job: &JobListing) -> anyhow::Result<String>;
}
