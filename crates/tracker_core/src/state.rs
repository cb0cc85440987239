use crate::view_model::{DashboardView, JobRowView, Notice};
use crate::{priority_stats, stage_stats, Job, JobFilter, ReconcileState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    jobs: Vec<Job>,
    is_updating: bool,
    loaded: bool,
    filter: JobFilter,
    notice: Option<Notice>,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_updating(&self) -> bool {
        self.is_updating
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn filter(&self) -> &JobFilter {
        &self.filter
    }

    pub fn view(&self) -> DashboardView {
        let rows = self
            .jobs
            .iter()
            .filter(|job| self.filter.matches(job))
            .map(JobRowView::from_job)
            .collect();
        DashboardView {
            rows,
            job_count: self.jobs.len(),
            stage_stats: stage_stats(&self.jobs),
            priority_stats: priority_stats(&self.jobs),
            is_updating: self.is_updating,
            loaded: self.loaded,
            filter_active: self.filter.is_active(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn seed(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.loaded = true;
        self.mark_dirty();
    }

    /// Replaces the collection and flag wholesale; never merges.
    pub(crate) fn apply_published(&mut self, published: ReconcileState<Job>) {
        self.jobs = published.collection;
        self.is_updating = published.is_updating;
        self.mark_dirty();
    }

    /// Holds the dashboard busy from the moment a mutation is handed off,
    /// before the engine's first publish arrives.
    pub(crate) fn begin_mutation(&mut self) {
        self.is_updating = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_mutation(&mut self) {
        if self.is_updating {
            self.is_updating = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn filter_mut(&mut self) -> &mut JobFilter {
        self.mark_dirty();
        &mut self.filter
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
