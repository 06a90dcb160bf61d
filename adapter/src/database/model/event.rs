use kernel::model::{
    event::{Event, EventStatus},
    id::EventId,
};
use shared::error::AppError;
use sqlx::types::chrono::NaiveDateTime;

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: String,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
            location,
            base_price,
            max_price,
            limit_of_enrollment,
            offline,
            free,
            event_status,
        } = value;
        let event_status = event_status.parse::<EventStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown event status: {event_status}"))
        })?;
        Ok(Event {
            id: event_id,
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
            location,
            base_price,
            max_price,
            limit_of_enrollment,
            offline,
            free,
            event_status,
        })
    }
}

// ページネーション用に件数だけを取り出す型
#[derive(sqlx::FromRow)]
pub struct EventCountRow {
    pub total: i64,
}
