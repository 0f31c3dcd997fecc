//! Data models for the career pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on listings kept per session
pub const JOB_SEARCH_LIMIT: usize = 5;

/// Location used when a job search request names none
pub const DEFAULT_LOCATION: &str = "United States";

/// One job posting returned by the search collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Schedule type, e.g. "Full-time"
    pub job_type: String,
    pub posted_at: String,
    pub apply_link: String,
    pub source_link: String,
    /// Posting body, when the search source provides one
    pub description: String,
}

impl JobListing {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    /// Single-line summary used in reply text
    pub fn summary(&self) -> String {
        let mut line = self.title.clone();
        if !self.company.is_empty() {
            line.push_str(" at ");
            line.push_str(&self.company);
        }
        if !self.location.is_empty() {
            line.push_str(&format!(" ({})", self.location));
        }
        line
    }
}

/// State kept between the stages of one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerSession {
    pub resume_text: String,
    pub inferred_role: String,
    /// Filled by the job match stage
    pub jobs: Vec<JobListing>,
}

impl CareerSession {
    pub fn new(resume_text: impl Into<String>, inferred_role: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            inferred_role: inferred_role.into(),
            jobs: Vec::new(),
        }
    }

    /// Listing selected by a zero-based index
    pub fn job(&self, index: usize) -> Option<&JobListing> {
        self.jobs.get(index)
    }
}

/// Pipeline stage named by the `stage` metadata key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Resume,
    JobMatch,
    Tailor,
    Interview,
    Projects,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Resume => "resume",
            Stage::JobMatch => "job_match",
            Stage::Tailor => "tailor",
            Stage::Interview => "interview",
            Stage::Projects => "projects",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "resume" => Some(Stage::Resume),
            "job_match" => Some(Stage::JobMatch),
            "tailor" => Some(Stage::Tailor),
            "interview" => Some(Stage::Interview),
            "projects" => Some(Stage::Projects),
            _ => None,
        }
    }

    /// Stages that act on one selected listing
    pub fn needs_job(&self) -> bool {
        matches!(self, Stage::Tailor | Stage::Interview | Stage::Projects)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
