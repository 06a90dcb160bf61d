use derive_new::new;

use crate::model::{event::EventDraft, id::EventId};

#[derive(new)]
pub struct CreateEvent {
    pub draft: EventDraft,
}

#[derive(new)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub draft: EventDraft,
}
