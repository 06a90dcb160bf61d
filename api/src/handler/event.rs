use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        validator::EventValidator,
        EventDraft, EventListOptions,
    },
    id::EventId,
};
use registry::AppRegistry;
use shared::{
    error::{AppError, AppResult},
    validation::Errors,
};

use crate::{
    extractor::{AuthorizedUser, JsonBody, PathParam, QueryParams},
    hal::Hal,
    model::event::{
        event_href, profile_href, EventListQuery, EventRequest, EventResource,
        PagedEventsResponse, EVENTS_PATH,
    },
};

// 単一項目のチェックの後に、項目間の整合性をチェックする
fn validate_event(req: EventRequest) -> AppResult<EventDraft> {
    let draft = req.into_draft().map_err(AppError::InvalidRequest)?;

    let mut errors = Errors::new("eventDto");
    EventValidator.validate(&draft, &mut errors);
    errors.into_result().map_err(AppError::InvalidRequest)?;

    Ok(draft)
}

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<EventRequest>,
) -> AppResult<impl IntoResponse> {
    let draft = validate_event(req)?;

    let event = registry
        .event_repository()
        .create(CreateEvent::new(draft))
        .await?;
    tracing::info!(event_id = %event.id, member_id = %user.id(), "event created");

    let href = event_href(event.id);
    let resource = EventResource::from(event)
        .with_link("query-events", EVENTS_PATH)
        .with_link("update-events", href.clone())
        .with_link("profile", profile_href("create"));

    Ok((StatusCode::CREATED, [(header::LOCATION, href)], Hal(resource)))
}

pub async fn show_event_list(
    user: Option<AuthorizedUser>,
    QueryParams(query): QueryParams<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    query.validate(&())?;
    let options = EventListOptions::try_from(query)?;

    let page = registry.event_repository().find_all(options).await?;

    let mut res = PagedEventsResponse::new(page, options.sort);
    if user.is_some() {
        res.links.add("create-event", EVENTS_PATH);
    }
    Ok(Hal(res))
}

pub async fn show_event(
    user: Option<AuthorizedUser>,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))?;

    let mut resource = EventResource::from(event).with_link("profile", profile_href("get"));
    if user.is_some() {
        resource = resource.with_link("update-events", event_href(event_id));
    }
    Ok(Hal(resource))
}

pub async fn update_event(
    user: AuthorizedUser,
    PathParam(event_id): PathParam<EventId>,
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<EventRequest>,
) -> AppResult<impl IntoResponse> {
    // 存在しないイベントへの更新は入力値に関係なく 404
    if registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .is_none()
    {
        return Err(AppError::EntityNotFound(format!(
            "event {event_id} not found"
        )));
    }

    let draft = validate_event(req)?;

    let event = registry
        .event_repository()
        .update(UpdateEvent::new(event_id, draft))
        .await?;
    tracing::info!(event_id = %event.id, member_id = %user.id(), "event updated");

    Ok(Hal(
        EventResource::from(event).with_link("profile", profile_href("update")),
    ))
}
