//! Stage routing for the career pipeline

use super::models::{CareerSession, Stage, DEFAULT_LOCATION, JOB_SEARCH_LIMIT};
use super::store::SessionStore;
use super::CareerAgents;
use crate::error::CareerError;
use crate::protocol::messages::generate_message_id;
use crate::protocol::{Message, MessageHandler, Role};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Message handler driving the five career stages.
///
/// The stage comes from the `stage` metadata key and the session from the
/// message's `conversation_id`. Stages acting on a posting read `job_index`
/// (zero-based) from metadata; job matching reads an optional `location`.
pub struct CareerHandler {
    agents: Arc<dyn CareerAgents>,
    sessions: SessionStore,
}

impl CareerHandler {
    pub fn new(agents: Arc<dyn CareerAgents>, sessions: SessionStore) -> Self {
        Self { agents, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    async fn intake_resume(&self, message: &Message) -> anyhow::Result<Message> {
        let resume_text = message.text().trim();
        if resume_text.is_empty() {
            return Err(CareerError::EmptyResume.into());
        }

        let role = self.agents.infer_role(resume_text).await?;
        let role = role.trim().lines().next().unwrap_or_default().trim().to_string();

        let conversation_id = message
            .conversation_id()
            .map(str::to_string)
            .unwrap_or_else(generate_message_id);
        self.sessions
            .insert(conversation_id.clone(), CareerSession::new(resume_text, role.clone()))
            .await;
        info!("Stored resume for conversation {} (role: {})", conversation_id, role);

        Ok(message
            .reply(Role::Agent, role.clone())
            .with_conversation_id(conversation_id)
            .with_metadata("stage", json!(Stage::Resume.as_str()))
            .with_metadata("inferred_role", json!(role)))
    }

    async fn match_jobs(&self, message: &Message) -> anyhow::Result<Message> {
        let (conversation_id, session) = self.session_for(message).await?;
        let location = metadata_text(message, "location").unwrap_or(DEFAULT_LOCATION);

        let mut jobs = self
            .agents
            .search_jobs(&session.inferred_role, location, JOB_SEARCH_LIMIT)
            .await?;
        jobs.truncate(JOB_SEARCH_LIMIT);
        debug!("Found {} jobs for '{}' in {}", jobs.len(), session.inferred_role, location);

        if !self.sessions.set_jobs(&conversation_id, jobs.clone()).await {
            return Err(CareerError::UnknownConversation.into());
        }

        let text = if jobs.is_empty() {
            format!("No jobs found for {}", session.inferred_role)
        } else {
            jobs.iter()
                .enumerate()
                .map(|(i, job)| format!("{}. {}", i + 1, job.summary()))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(message
            .reply(Role::Agent, text)
            .with_metadata("stage", json!(Stage::JobMatch.as_str()))
            .with_metadata("inferred_role", json!(session.inferred_role))
            .with_metadata("location", json!(location))
            .with_metadata("jobs", serde_json::to_value(&jobs)?))
    }

    async fn work_on_job(&self, stage: Stage, message: &Message) -> anyhow::Result<Message> {
        let (_, session) = self.session_for(message).await?;
        let index = job_index(message).ok_or(CareerError::InvalidJobIndex)?;
        let job = session.job(index).ok_or(CareerError::InvalidJobIndex)?;

        let reply = match stage {
            Stage::Tailor => {
                let text = self.agents.tailor_resume(&session.resume_text, job).await?;
                message.reply(Role::Agent, text)
            }
            Stage::Interview => {
                let text = self.agents.interview_guide(&session.resume_text, job).await?;
                message.reply(Role::Agent, text)
            }
            _ => {
                let text = self.agents.project_ideas(&session.inferred_role, job).await?;
                let ideas = split_project_ideas(&text);
                message
                    .reply(Role::Agent, text)
                    .with_metadata("project_ideas", json!(ideas))
            }
        };

        Ok(reply
            .with_metadata("stage", json!(stage.as_str()))
            .with_metadata("job_index", json!(index)))
    }

    async fn session_for(&self, message: &Message) -> Result<(String, CareerSession), CareerError> {
        let conversation_id = message
            .conversation_id()
            .ok_or(CareerError::UnknownConversation)?;
        let session = self
            .sessions
            .get(conversation_id)
            .await
            .ok_or(CareerError::UnknownConversation)?;
        Ok((conversation_id.to_string(), session))
    }
}

#[async_trait]
impl MessageHandler for CareerHandler {
    async fn handle_message(&self, message: Message) -> anyhow::Result<Message> {
        let stage = stage_of(&message)?;
        debug!("Career stage {} for message {}", stage, message.message_id());

        match stage {
            Stage::Resume => self.intake_resume(&message).await,
            Stage::JobMatch => self.match_jobs(&message).await,
            stage => self.work_on_job(stage, &message).await,
        }
    }
}

/// Split free text into ideas on blank lines, dropping empty blocks
pub fn split_project_ideas(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

fn stage_of(message: &Message) -> Result<Stage, CareerError> {
    let name = metadata_text(message, "stage").ok_or(CareerError::MissingStage)?;
    Stage::parse(name).ok_or_else(|| CareerError::UnknownStage(name.to_string()))
}

fn metadata_text<'a>(message: &'a Message, key: &str) -> Option<&'a str> {
    message
        .metadata()
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Numeric or numeric-string `job_index`
fn job_index(message: &Message) -> Option<usize> {
    match message.metadata().get("job_index")? {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
