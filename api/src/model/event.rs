use chrono::NaiveDateTime;
use garde::Validate;
use kernel::model::{
    event::{Event, EventDraft, EventListOptions, EventSortKey, EventStatus},
    id::EventId,
    list::{
        Page, PageRequest, SortDirection, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::{error::AppError, validation::Errors};

use crate::hal::{EntityModel, Links};

pub const EVENTS_PATH: &str = "/api/events";

pub fn event_href(event_id: EventId) -> String {
    format!("{EVENTS_PATH}/{event_id}")
}

pub fn profile_href(section: &str) -> String {
    format!("/docs/index.html#resources-events-{section}")
}

// 作成・更新で共通の入力値。id や free などクライアントが決められない値は受け付けない
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(length(min = 1))]
    pub description: Option<String>,
    #[garde(skip)]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub begin_event_date_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub end_event_date_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub location: Option<String>,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub base_price: i32,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub max_price: i32,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub limit_of_enrollment: i32,
}

impl EventRequest {
    /// 単一項目のチェックを行い、すべての必須項目がそろった入力値に変換する。
    pub fn into_draft(self) -> Result<EventDraft, Errors> {
        let mut errors = Errors::new("eventDto");
        if let Err(report) = self.validate(&()) {
            errors.extend_from_report(&report);
        }

        let EventRequest {
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
        } = self;

        let name = require(&mut errors, "name", "NotEmpty", name);
        let description = require(&mut errors, "description", "NotEmpty", description);
        let begin_enrollment_date_time = require(
            &mut errors,
            "beginEnrollmentDateTime",
            "NotNull",
            begin_enrollment_date_time,
        );
        let close_enrollment_date_time = require(
            &mut errors,
            "closeEnrollmentDateTime",
            "NotNull",
            close_enrollment_date_time,
        );
        let begin_event_date_time =
            require(&mut errors, "beginEventDateTime", "NotNull", begin_event_date_time);
        let end_event_date_time =
            require(&mut errors, "endEventDateTime", "NotNull", end_event_date_time);

        match (
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
        ) {
            (
                Some(name),
                Some(description),
                Some(begin_enrollment_date_time),
                Some(close_enrollment_date_time),
                Some(begin_event_date_time),
                Some(end_event_date_time),
            ) if !errors.has_errors() => Ok(EventDraft {
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
            }),
            _ => Err(errors),
        }
    }
}

fn require<T>(errors: &mut Errors, field: &str, code: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        let message = match code {
            "NotNull" => "must not be null",
            _ => "must not be empty",
        };
        errors.reject_value(field, code, message, None);
    }
    value
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
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
    pub event_status: EventStatus,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            id,
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
        Self {
            id,
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
        }
    }
}

pub type EventResource = EntityModel<EventResponse>;

// どのイベントのリソースも自分自身へのリンクを持つ
impl From<Event> for EventResource {
    fn from(value: Event) -> Self {
        let self_href = event_href(value.id);
        EntityModel::new(EventResponse::from(value)).with_link("self", self_href)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventListQuery {
    #[garde(range(min = 0))]
    pub page: Option<i64>,
    #[garde(range(min = 1, max = 2000))]
    pub size: Option<i64>,
    #[garde(skip)]
    pub sort: Option<String>,
}

impl TryFrom<EventListQuery> for EventListOptions {
    type Error = AppError;

    fn try_from(value: EventListQuery) -> Result<Self, Self::Error> {
        let EventListQuery { page, size, sort } = value;
        if let Some(page) = page.filter(|&p| p > MAX_PAGE_NUMBER) {
            let mut errors = Errors::new("pageable");
            errors.reject_value("page", "invalidPage", "Page is too large", Some(json!(page)));
            return Err(AppError::InvalidRequest(errors));
        }
        let sort = match sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(parse_sort(raw)?),
        };
        Ok(PageRequest {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
            sort,
        })
    }
}

// "name,DESC" のような指定を解釈する。方向を省略したときは昇順
fn parse_sort(raw: &str) -> Result<(EventSortKey, SortDirection), AppError> {
    let (property, direction) = match raw.split_once(',') {
        Some((property, direction)) => (property.trim(), Some(direction.trim())),
        None => (raw, None),
    };
    let reject = || {
        let mut errors = Errors::new("pageable");
        errors.reject_value("sort", "invalidSort", "Sort is wrong", Some(json!(raw)));
        AppError::InvalidRequest(errors)
    };
    let key = property.parse::<EventSortKey>().map_err(|_| reject())?;
    let direction = match direction {
        None => SortDirection::Asc,
        Some(d) => d.parse::<SortDirection>().map_err(|_| reject())?,
    };
    Ok((key, direction))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedEvents {
    pub event_list: Vec<EventResource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub number: i64,
}

#[derive(Debug, Serialize)]
pub struct PagedEventsResponse {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

impl PagedEventsResponse {
    pub fn new(page: Page<Event>, sort: Option<(EventSortKey, SortDirection)>) -> Self {
        let href = |number: i64| {
            let mut href = format!("{EVENTS_PATH}?page={number}&size={}", page.size);
            if let Some((key, direction)) = sort {
                href.push_str(&format!("&sort={key},{direction}"));
            }
            href
        };

        let mut links = Links::new();
        let navigable = page.is_navigable();
        if navigable {
            links.add("first", href(0));
        }
        if page.has_previous() {
            links.add("prev", href(page.page - 1));
        }
        links.add("self", href(page.page));
        if page.has_next() {
            links.add("next", href(page.page + 1));
        }
        if navigable {
            links.add("last", href(page.last_page()));
        }
        links.add("profile", profile_href("list"));

        let metadata = PageMetadata {
            size: page.size,
            total_elements: page.total,
            total_pages: page.total_pages(),
            number: page.page,
        };

        let event_list: Vec<EventResource> =
            page.items.into_iter().map(EventResource::from).collect();
        let embedded = (!event_list.is_empty()).then_some(EmbeddedEvents { event_list });

        Self {
            embedded,
            links,
            page: metadata,
        }
    }
}
