//! Remote capabilities for jobs, backed by [`JobsClient`].

use tracker_core::{Job, JobChange, JobDraft, RecordId};

use crate::{JobsClient, RemoteCreate, RemoteDelete, RemoteError, RemoteUpdate};

fn server_id(id: &RecordId) -> Result<&str, RemoteError> {
    id.as_server()
        .ok_or_else(|| RemoteError::new(format!("job {id} has not been saved yet")))
}

pub struct CreateJob<'a> {
    client: &'a JobsClient,
}

impl<'a> CreateJob<'a> {
    pub fn new(client: &'a JobsClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RemoteCreate<Job> for CreateJob<'_> {
    async fn create(&self, draft: JobDraft) -> Result<Job, RemoteError> {
        self.client.create_job(&draft).await
    }
}

/// Saves one change to a job and splices the server's copy of the affected
/// part back into the collection.
pub struct UpdateJob<'a> {
    client: &'a JobsClient,
    id: RecordId,
    change: &'a JobChange,
}

impl<'a> UpdateJob<'a> {
    pub fn new(client: &'a JobsClient, id: RecordId, change: &'a JobChange) -> Self {
        Self { client, id, change }
    }

    async fn save(&self, remote_id: &str, job: &mut Job) -> Result<(), RemoteError> {
        match self.change {
            JobChange::Fields(_) => {
                *job = self
                    .client
                    .update_job(remote_id, &JobDraft::replacing(job))
                    .await?;
            }
            JobChange::AddNote { content } => {
                let saved = self.client.add_note(remote_id, content.trim()).await?;
                job.notes.retain(|note| !note.is_pending());
                job.notes.push(saved);
            }
            JobChange::AddTag { name, color } => {
                let tag = self.client.create_tag(name.trim(), color).await?;
                let saved = self.client.attach_tag(remote_id, &tag.id).await?;
                job.tags.retain(|job_tag| !job_tag.is_pending());
                job.tags.push(saved);
            }
            JobChange::RemoveTag { tag_id } => {
                self.client.detach_tag(remote_id, tag_id).await?;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RemoteUpdate<Job> for UpdateJob<'_> {
    async fn update(&self, mut optimistic: Vec<Job>) -> Result<Vec<Job>, RemoteError> {
        let remote_id = server_id(&self.id)?;
        let job = optimistic
            .iter_mut()
            .find(|job| job.id == self.id)
            .ok_or_else(|| RemoteError::new(format!("job {} is not in the collection", self.id)))?;
        self.save(remote_id, job).await?;
        Ok(optimistic)
    }
}

pub struct DeleteJob<'a> {
    client: &'a JobsClient,
}

impl<'a> DeleteJob<'a> {
    pub fn new(client: &'a JobsClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RemoteDelete<RecordId> for DeleteJob<'_> {
    async fn delete(&self, id: RecordId) -> Result<(), RemoteError> {
        self.client.delete_job(server_id(&id)?).await
    }
}
