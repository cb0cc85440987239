use chrono::Utc;

use crate::validate::{require, validate_note_content, validate_tag, ValidationError};
use crate::{Job, JobPatch, JobTag, Note, Patch, Tag};

/// One edit to an existing job, applied optimistically and then sent to
/// whichever endpoint owns that part of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobChange {
    /// Form fields, saved with a full PUT of the job.
    Fields(JobPatch),
    AddNote {
        content: String,
    },
    /// Creates a tag and attaches it to the job.
    AddTag {
        name: String,
        color: String,
    },
    RemoveTag {
        tag_id: String,
    },
}

impl JobChange {
    /// True when applying the change would leave the job untouched.
    pub fn is_empty(&self) -> bool {
        match self {
            JobChange::Fields(patch) => patch.is_empty(),
            _ => false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            JobChange::Fields(patch) => patch.validate(),
            JobChange::AddNote { content } => validate_note_content(content),
            JobChange::AddTag { name, color } => validate_tag(name, color),
            JobChange::RemoveTag { tag_id } => require("tag id", tag_id),
        }
    }
}

impl From<JobPatch> for JobChange {
    fn from(patch: JobPatch) -> Self {
        JobChange::Fields(patch)
    }
}

impl Patch<Job> for JobChange {
    fn apply_to(&self, target: &mut Job) {
        match self {
            JobChange::Fields(patch) => patch.apply_to(target),
            // Unsaved notes and tags carry an empty id until the server assigns one.
            JobChange::AddNote { content } => target.notes.push(Note {
                id: String::new(),
                content: content.trim().to_string(),
                created_at: Utc::now(),
            }),
            JobChange::AddTag { name, color } => target.tags.push(JobTag {
                id: String::new(),
                tag: Tag {
                    id: String::new(),
                    name: name.trim().to_string(),
                    color: color.clone(),
                },
            }),
            JobChange::RemoveTag { tag_id } => {
                target.tags.retain(|job_tag| &job_tag.tag.id != tag_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, JobDraft, RecordId};

    fn job() -> Job {
        Job::from_draft(RecordId::server("j1"), &JobDraft::new("Engineer", "Acme"))
    }

    fn tagged(tag_id: &str, name: &str) -> JobTag {
        JobTag {
            id: format!("jt-{tag_id}"),
            tag: Tag {
                id: tag_id.to_string(),
                name: name.to_string(),
                color: "#112233".to_string(),
            },
        }
    }

    #[test]
    fn add_note_appends_an_unsaved_note() {
        let mut job = job();
        JobChange::AddNote {
            content: "  call back friday ".to_string(),
        }
        .apply_to(&mut job);

        assert_eq!(job.notes.len(), 1);
        assert!(job.notes[0].is_pending());
        assert_eq!(job.notes[0].content, "call back friday");
    }

    #[test]
    fn add_and_remove_tags() {
        let mut job = job();
        job.tags = vec![tagged("t1", "rust"), tagged("t2", "remote")];

        JobChange::RemoveTag {
            tag_id: "t1".to_string(),
        }
        .apply_to(&mut job);
        assert_eq!(job.tag_names().collect::<Vec<_>>(), vec!["remote"]);

        JobChange::AddTag {
            name: "urgent".to_string(),
            color: "#ff0000".to_string(),
        }
        .apply_to(&mut job);
        assert_eq!(job.tag_names().collect::<Vec<_>>(), vec!["remote", "urgent"]);
        assert!(job.tags[1].is_pending());
    }

    #[test]
    fn validation_follows_the_kind_of_change() {
        assert_eq!(
            JobChange::AddNote {
                content: " ".to_string()
            }
            .validate(),
            Err(ValidationError::Required {
                field: "note content"
            })
        );
        assert_eq!(
            JobChange::AddTag {
                name: "rust".to_string(),
                color: "red".to_string(),
            }
            .validate(),
            Err(ValidationError::InvalidColor {
                value: "red".to_string()
            })
        );
        assert!(JobChange::RemoveTag {
            tag_id: "t1".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn only_an_empty_field_patch_is_empty() {
        assert!(JobChange::from(JobPatch::default()).is_empty());
        assert!(!JobChange::AddNote {
            content: "x".to_string()
        }
        .is_empty());
    }
}
