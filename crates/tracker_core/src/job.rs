use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Entity, Patch, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Applied,
        Stage::Interview,
        Stage::Offer,
        Stage::Rejected,
        Stage::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Applied => "APPLIED",
            Stage::Interview => "INTERVIEW",
            Stage::Offer => "OFFER",
            Stage::Rejected => "REJECTED",
            Stage::Withdrawn => "WITHDRAWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Applied => "Applied",
            Stage::Interview => "Interview",
            Stage::Offer => "Offer",
            Stage::Rejected => "Rejected",
            Stage::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stage `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown priority `{s}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Not yet stored by the server.
    pub fn is_pending(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Association row between a job and a tag, as the API nests it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTag {
    pub id: String,
    pub tag: Tag,
}

impl JobTag {
    pub fn is_pending(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: RecordId,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub stage: Stage,
    pub priority: Priority,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub tags: Vec<JobTag>,
}

impl Job {
    pub fn is_pending(&self) -> bool {
        self.id.is_temp()
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|job_tag| job_tag.tag.name.as_str())
    }
}

impl Entity for Job {
    type Draft = JobDraft;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: &JobDraft) -> Self {
        let now = Utc::now();
        Job {
            id,
            title: draft.title.clone(),
            company: draft.company.clone(),
            location: draft.location.clone(),
            description: draft.description.clone(),
            salary: draft.salary.clone(),
            url: draft.url.clone(),
            stage: draft.stage,
            priority: draft.priority,
            applied_at: now,
            updated_at: now,
            notes: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// Form data for a job; also the request body for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub stage: Stage,
    pub priority: Priority,
}

impl JobDraft {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    /// Body for a full PUT of `job`. Absent optionals are sent as empty
    /// strings, since an omitted field leaves the stored value in place.
    pub fn replacing(job: &Job) -> Self {
        let cleared = |value: &Option<String>| Some(value.clone().unwrap_or_default());
        Self {
            location: cleared(&job.location),
            description: cleared(&job.description),
            salary: cleared(&job.salary),
            url: cleared(&job.url),
            ..Self::from(job)
        }
    }
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            salary: job.salary.clone(),
            url: job.url.clone(),
            stage: job.stage,
            priority: job.priority,
        }
    }
}

/// Partial edit; `None` leaves the field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub stage: Option<Stage>,
    pub priority: Option<Priority>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Patch<Job> for JobPatch {
    fn apply_to(&self, target: &mut Job) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(company) = &self.company {
            target.company = company.clone();
        }
        if let Some(location) = &self.location {
            target.location = Some(location.clone());
        }
        if let Some(description) = &self.description {
            target.description = Some(description.clone());
        }
        if let Some(salary) = &self.salary {
            target.salary = Some(salary.clone());
        }
        if let Some(url) = &self.url {
            target.url = Some(url.clone()).filter(|url| !url.is_empty());
        }
        if let Some(stage) = self.stage {
            target.stage = stage;
        }
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
    }
}
