#![allow(dead_code)]

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex},
};

use api::route::routes;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken},
        event::{
            event::{CreateEvent, UpdateEvent},
            Event, EventDraft, EventListOptions, EventSortKey,
        },
        id::{EventId, MemberId},
        list::{Page, SortDirection},
        member::{event::CreateMember, Member},
        role::Role,
    },
    repository::{
        auth::AuthRepository, event::EventRepository, health::HealthCheckRepository,
        member::MemberRepository,
    },
};
use registry::AppRegistry;
use serde_json::Value;
use shared::{
    config::AuthConfig,
    error::{AppError, AppResult},
};
use tower::ServiceExt;

pub const CLIENT_ID: &str = "myApp";
pub const CLIENT_SECRET: &str = "pass";
pub const EMAIL: &str = "admin@email.com";
pub const PASSWORD: &str = "admin";
pub const TOKEN: &str = "test-access-token";
pub const TOKEN_TTL: u64 = 600;

struct HealthCheckStub;

#[async_trait]
impl HealthCheckRepository for HealthCheckStub {
    async fn check_db(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct InMemoryEventRepository {
    events: Mutex<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn events_len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

fn compare(a: &Event, b: &Event, key: EventSortKey) -> Ordering {
    match key {
        EventSortKey::Name => a.name.cmp(&b.name),
        EventSortKey::BeginEnrollmentDateTime => {
            a.begin_enrollment_date_time.cmp(&b.begin_enrollment_date_time)
        }
        EventSortKey::CloseEnrollmentDateTime => {
            a.close_enrollment_date_time.cmp(&b.close_enrollment_date_time)
        }
        EventSortKey::BeginEventDateTime => a.begin_event_date_time.cmp(&b.begin_event_date_time),
        EventSortKey::EndEventDateTime => a.end_event_date_time.cmp(&b.end_event_date_time),
        EventSortKey::BasePrice => a.base_price.cmp(&b.base_price),
        EventSortKey::MaxPrice => a.max_price.cmp(&b.max_price),
        EventSortKey::LimitOfEnrollment => a.limit_of_enrollment.cmp(&b.limit_of_enrollment),
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        let event = Event::from_draft(EventId::new(), event.draft);
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn find_all(&self, options: EventListOptions) -> AppResult<Page<Event>> {
        // 登録順に並んでいるので安定ソートで作成日時順を保てる
        let mut events = self.events.lock().unwrap().clone();
        if let Some((key, direction)) = options.sort {
            events.sort_by(|a, b| match direction {
                SortDirection::Asc => compare(a, b, key),
                SortDirection::Desc => compare(b, a, key),
            });
        }
        let total = events.len() as i64;
        let items = events
            .into_iter()
            .skip(options.offset() as usize)
            .take(options.size as usize)
            .collect();
        Ok(Page {
            items,
            total,
            page: options.page,
            size: options.size,
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == event_id)
            .cloned())
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        let mut events = self.events.lock().unwrap();
        let current = events
            .iter_mut()
            .find(|e| e.id == event.event_id)
            .ok_or_else(|| AppError::EntityNotFound(event.event_id.to_string()))?;
        current.apply(event.draft);
        Ok(current.clone())
    }
}

// テストではパスワードを平文のまま保持する
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Member>>,
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, event: CreateMember) -> AppResult<Member> {
        let member = Member {
            id: MemberId::new(),
            email: event.email,
            password_hash: event.password,
            roles: event.roles,
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(member)
    }

    async fn ensure(&self, event: CreateMember) -> AppResult<()> {
        let exists = self
            .members
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.email == event.email);
        if !exists {
            self.create(event).await?;
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Member> {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.email == email)
            .cloned()
            .ok_or_else(|| AppError::EntityNotFound(email.to_string()))
    }

    async fn find_by_id(&self, member_id: MemberId) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == member_id)
            .cloned())
    }
}

pub struct InMemoryAuthRepository {
    members: Arc<InMemoryMemberRepository>,
    tokens: Mutex<HashMap<String, MemberId>>,
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn fetch_member_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<MemberId>> {
        Ok(self.tokens.lock().unwrap().get(&access_token.0).copied())
    }

    async fn verify_member(&self, email: &str, password: &str) -> AppResult<MemberId> {
        match self.members.find_by_email(email).await {
            Ok(member) if member.password_hash == password => Ok(member.id),
            _ => Err(AppError::UnauthenticatedError),
        }
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        self.tokens
            .lock()
            .unwrap()
            .insert(event.access_token.clone(), event.member_id);
        Ok(AccessToken(event.access_token))
    }
}

pub struct TestApp {
    pub router: Router,
    pub events: Arc<InMemoryEventRepository>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// 管理者アカウントと、その会員に紐づくアクセストークン `TOKEN` を用意する。
    pub async fn new() -> Self {
        let events = Arc::new(InMemoryEventRepository::default());
        let members = Arc::new(InMemoryMemberRepository::default());
        let admin = members
            .create(CreateMember::new(
                EMAIL.into(),
                PASSWORD.into(),
                BTreeSet::from([Role::Admin, Role::User]),
            ))
            .await
            .unwrap();
        let auth = Arc::new(InMemoryAuthRepository {
            members: members.clone(),
            tokens: Mutex::new(HashMap::from([(TOKEN.to_string(), admin.id)])),
        });

        let registry = AppRegistry::from_parts(
            Arc::new(HealthCheckStub),
            events.clone(),
            members,
            auth,
            AuthConfig {
                ttl: TOKEN_TTL,
                client_id: CLIENT_ID.into(),
                client_secret: CLIENT_SECRET.into(),
            },
        );

        Self {
            router: routes().with_state(registry),
            events,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn create_event(&self, index: i32) -> Event {
        self.events
            .create(CreateEvent::new(EventDraft {
                name: format!("event {index:02}"),
                ..draft()
            }))
            .await
            .unwrap()
    }
}

pub fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 11, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .unwrap()
}

pub fn draft() -> EventDraft {
    EventDraft {
        name: "Spring".into(),
        description: "REST API Development with Spring".into(),
        begin_enrollment_date_time: at(23, 14, 21),
        close_enrollment_date_time: at(24, 14, 21),
        begin_event_date_time: at(25, 14, 21),
        end_event_date_time: at(26, 14, 21),
        location: Some("D2 Startup Factory".into()),
        base_price: 100,
        max_price: 200,
        limit_of_enrollment: 100,
    }
}
