use std::time::Duration;

use tracker_core::{Effect, Msg};
use tracker_engine::{ClientSettings, EngineError, EngineEvent, EngineHandle};
use tracker_logging::{tracker_info, tracker_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    /// Hands effects to the engine; returns how many terminal messages will follow.
    pub fn enqueue(&self, effects: Vec<Effect>) -> usize {
        let count = effects.len();
        for effect in effects {
            match effect {
                Effect::Refresh { filter } => {
                    tracker_info!("Refresh filter_active={}", filter.is_active());
                    self.engine.refresh(filter);
                }
                Effect::Create { snapshot, draft } => {
                    tracker_info!("Create title={} company={}", draft.title, draft.company);
                    self.engine.create(snapshot, draft);
                }
                Effect::Update {
                    snapshot,
                    id,
                    change,
                } => {
                    tracker_info!("Update id={} change={:?}", id, change);
                    self.engine.update(snapshot, id, change);
                }
                Effect::Delete { snapshot, id } => {
                    tracker_info!("Delete id={}", id);
                    self.engine.delete(snapshot, id);
                }
            }
        }
        count
    }

    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

/// Messages that end one enqueued effect.
pub fn is_terminal(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::JobsLoaded(_) | Msg::LoadFailed(_) | Msg::MutationSettled(_)
    )
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Loaded(Ok(jobs)) => Msg::JobsLoaded(jobs),
        EngineEvent::Loaded(Err(err)) => {
            tracker_warn!("Loading jobs failed: {}", err);
            Msg::LoadFailed(err.message().to_string())
        }
        EngineEvent::Published(state) => Msg::CollectionPublished(state),
        EngineEvent::Settled(settlement) => Msg::MutationSettled(settlement),
    }
}
