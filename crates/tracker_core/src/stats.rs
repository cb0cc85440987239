use crate::{Job, Priority, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageStats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
    pub withdrawn: usize,
}

impl StageStats {
    pub fn count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Applied => self.applied,
            Stage::Interview => self.interview,
            Stage::Offer => self.offer,
            Stage::Rejected => self.rejected,
            Stage::Withdrawn => self.withdrawn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityStats {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

impl PriorityStats {
    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Urgent => self.urgent,
        }
    }
}

pub fn stage_stats(jobs: &[Job]) -> StageStats {
    jobs.iter().fold(
        StageStats {
            total: jobs.len(),
            ..StageStats::default()
        },
        |mut stats, job| {
            match job.stage {
                Stage::Applied => stats.applied += 1,
                Stage::Interview => stats.interview += 1,
                Stage::Offer => stats.offer += 1,
                Stage::Rejected => stats.rejected += 1,
                Stage::Withdrawn => stats.withdrawn += 1,
            }
            stats
        },
    )
}

pub fn priority_stats(jobs: &[Job]) -> PriorityStats {
    jobs.iter()
        .fold(PriorityStats::default(), |mut stats, job| {
            match job.priority {
                Priority::Low => stats.low += 1,
                Priority::Medium => stats.medium += 1,
                Priority::High => stats.high += 1,
                Priority::Urgent => stats.urgent += 1,
            }
            stats
        })
}
