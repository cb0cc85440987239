use crate::view_model::Notice;
use crate::{DashboardState, Effect, JobChange, Msg, RecordId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobsLoaded(jobs) => {
            state.seed(jobs);
            Vec::new()
        }
        Msg::LoadFailed(reason) => {
            state.set_notice(Some(Notice::error(format!("Failed to fetch jobs: {reason}"))));
            Vec::new()
        }
        Msg::RefreshRequested => vec![Effect::Refresh {
            filter: state.filter().clone(),
        }],
        // Mutations are serialized: while one is in flight, new requests are dropped.
        Msg::CreateRequested(_)
        | Msg::EditRequested { .. }
        | Msg::NoteRequested { .. }
        | Msg::TagRequested { .. }
        | Msg::TagRemovalRequested { .. }
        | Msg::DeleteRequested { .. }
            if state.is_updating() =>
        {
            Vec::new()
        }
        Msg::CreateRequested(draft) => match draft.validate() {
            Ok(()) => {
                let snapshot = state.jobs().to_vec();
                state.begin_mutation();
                vec![Effect::Create { snapshot, draft }]
            }
            Err(err) => {
                state.set_notice(Some(Notice::error(err.to_string())));
                Vec::new()
            }
        },
        Msg::EditRequested { id, patch } => request_change(&mut state, id, patch.into()),
        Msg::NoteRequested { id, content } => {
            request_change(&mut state, id, JobChange::AddNote { content })
        }
        Msg::TagRequested { id, name, color } => {
            request_change(&mut state, id, JobChange::AddTag { name, color })
        }
        Msg::TagRemovalRequested { id, tag_id } => {
            request_change(&mut state, id, JobChange::RemoveTag { tag_id })
        }
        Msg::DeleteRequested { id } => {
            let snapshot = state.jobs().to_vec();
            state.begin_mutation();
            vec![Effect::Delete { snapshot, id }]
        }
        Msg::CollectionPublished(published) => {
            state.apply_published(published);
            Vec::new()
        }
        Msg::MutationSettled(settlement) => {
            state.finish_mutation();
            state.set_notice(Some(Notice::from_settlement(&settlement)));
            Vec::new()
        }
        Msg::SearchChanged(search) => {
            state.filter_mut().search = search;
            Vec::new()
        }
        Msg::StageFilterChanged(stage) => {
            state.filter_mut().stage = stage;
            Vec::new()
        }
        Msg::PriorityFilterChanged(priority) => {
            state.filter_mut().priority = priority;
            Vec::new()
        }
        Msg::FiltersCleared => {
            *state.filter_mut() = Default::default();
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.set_notice(None);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_change(state: &mut DashboardState, id: RecordId, change: JobChange) -> Vec<Effect> {
    if change.is_empty() {
        return Vec::new();
    }
    if let Err(err) = change.validate() {
        state.set_notice(Some(Notice::error(err.to_string())));
        return Vec::new();
    }
    let snapshot = state.jobs().to_vec();
    state.begin_mutation();
    vec![Effect::Update {
        snapshot,
        id,
        change,
    }]
}
