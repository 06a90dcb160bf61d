use chrono::NaiveDateTime;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::model::{id::EventId, list::PageRequest};

pub mod event;
pub mod validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    BeganEnrollment,
}

/// 入力チェックを通過したイベントの入力値。
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
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
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    // location がなければオンラインのイベント
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: EventStatus,
}

impl Event {
    /// 新規イベントを作る。ステータスは DRAFT から始まる。
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        let mut event = Self {
            id,
            name: String::new(),
            description: String::new(),
            begin_enrollment_date_time: draft.begin_enrollment_date_time,
            close_enrollment_date_time: draft.close_enrollment_date_time,
            begin_event_date_time: draft.begin_event_date_time,
            end_event_date_time: draft.end_event_date_time,
            location: None,
            base_price: 0,
            max_price: 0,
            limit_of_enrollment: 0,
            offline: false,
            free: false,
            event_status: EventStatus::default(),
        };
        event.apply(draft);
        event
    }

    // ID とステータスはそのままに入力値で上書きする
    pub fn apply(&mut self, draft: EventDraft) {
        let EventDraft {
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
        } = draft;
        self.name = name;
        self.description = description;
        self.begin_enrollment_date_time = begin_enrollment_date_time;
        self.close_enrollment_date_time = close_enrollment_date_time;
        self.begin_event_date_time = begin_event_date_time;
        self.end_event_date_time = end_event_date_time;
        self.location = location;
        self.base_price = base_price;
        self.max_price = max_price;
        self.limit_of_enrollment = limit_of_enrollment;
        self.update();
    }

    // 価格と場所から free / offline を算出する
    pub fn update(&mut self) {
        self.free = self.base_price == 0 && self.max_price == 0;
        self.offline = self
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty());
    }
}

/// 一覧取得で並べ替えに使える項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum EventSortKey {
    Name,
    BeginEnrollmentDateTime,
    CloseEnrollmentDateTime,
    BeginEventDateTime,
    EndEventDateTime,
    BasePrice,
    MaxPrice,
    LimitOfEnrollment,
}

impl EventSortKey {
    pub fn column(&self) -> &'static str {
        match self {
            EventSortKey::Name => "name",
            EventSortKey::BeginEnrollmentDateTime => "begin_enrollment_date_time",
            EventSortKey::CloseEnrollmentDateTime => "close_enrollment_date_time",
            EventSortKey::BeginEventDateTime => "begin_event_date_time",
            EventSortKey::EndEventDateTime => "end_event_date_time",
            EventSortKey::BasePrice => "base_price",
            EventSortKey::MaxPrice => "max_price",
            EventSortKey::LimitOfEnrollment => "limit_of_enrollment",
        }
    }
}

pub type EventListOptions = PageRequest<EventSortKey>;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, day)
            .and_then(|d| d.and_hms_opt(hour, min, 0))
            .unwrap()
    }

    pub(crate) fn draft() -> EventDraft {
        EventDraft {
            name: "Spring".into(),
            description: "REST API Development with Spring".into(),
            begin_enrollment_date_time: at(17, 12, 0),
            close_enrollment_date_time: at(18, 12, 0),
            begin_event_date_time: at(20, 12, 30),
            end_event_date_time: at(21, 12, 0),
            location: Some("강남역 D2 스타텁 팩토리".into()),
            base_price: 100,
            max_price: 200,
            limit_of_enrollment: 100,
        }
    }

    fn with_prices(base_price: i32, max_price: i32) -> Event {
        Event::from_draft(
            EventId::new(),
            EventDraft {
                base_price,
                max_price,
                ..draft()
            },
        )
    }

    #[test]
    fn new_event_starts_as_draft() {
        let event = Event::from_draft(EventId::new(), draft());
        assert_eq!(event.event_status, EventStatus::Draft);
        assert_eq!(event.name, "Spring");
    }

    #[test]
    fn free_only_when_both_prices_are_zero() {
        assert!(with_prices(0, 0).free);
        assert!(!with_prices(100, 0).free);
        assert!(!with_prices(0, 100).free);
    }

    #[test]
    fn offline_follows_location() {
        let event = Event::from_draft(EventId::new(), draft());
        assert!(event.offline);

        let online = Event::from_draft(
            EventId::new(),
            EventDraft {
                location: None,
                ..draft()
            },
        );
        assert!(!online.offline);

        let blank = Event::from_draft(
            EventId::new(),
            EventDraft {
                location: Some("   ".into()),
                ..draft()
            },
        );
        assert!(!blank.offline);
    }

    #[test]
    fn apply_keeps_identity_and_status() {
        let mut event = Event::from_draft(EventId::new(), draft());
        let id = event.id;
        event.event_status = EventStatus::Published;

        event.apply(EventDraft {
            name: "Updated".into(),
            base_price: 0,
            max_price: 0,
            location: None,
            ..draft()
        });

        assert_eq!(event.id, id);
        assert_eq!(event.event_status, EventStatus::Published);
        assert_eq!(event.name, "Updated");
        assert!(event.free);
        assert!(!event.offline);
    }

    #[test]
    fn status_and_sort_key_names() {
        assert_eq!(EventStatus::BeganEnrollment.to_string(), "BEGAN_ENROLLMENT");
        assert_eq!(
            serde_json::to_value(EventStatus::BeganEnrollment).unwrap(),
            "BEGAN_ENROLLMENT"
        );
        assert_eq!("DRAFT".parse::<EventStatus>().unwrap(), EventStatus::Draft);
        assert_eq!(
            "beginEventDateTime".parse::<EventSortKey>().unwrap(),
            EventSortKey::BeginEventDateTime
        );
        assert!("password".parse::<EventSortKey>().is_err());
    }
}
