use crate::{Job, Priority, Stage};

/// Search box plus stage/priority dropdowns. Empty fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFilter {
    pub search: String,
    pub stage: Option<Stage>,
    pub priority: Option<Priority>,
}

impl JobFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.stage.is_some() || self.priority.is_some()
    }

    /// Case-insensitive search over title, company and description.
    pub fn matches(&self, job: &Job) -> bool {
        if self.stage.is_some_and(|stage| stage != job.stage) {
            return false;
        }
        if self.priority.is_some_and(|priority| priority != job.priority) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(job.title.as_str()),
            Some(job.company.as_str()),
            job.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Query parameters understood by the jobs listing endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(stage) = self.stage {
            pairs.push(("stage", stage.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}
