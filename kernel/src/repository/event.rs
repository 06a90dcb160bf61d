use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event, EventListOptions,
    },
    id::EventId,
    list::Page,
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    // 新しいイベントを DRAFT 状態で登録する
    async fn create(&self, event: CreateEvent) -> AppResult<Event>;
    // ページ単位でイベントを取得する
    async fn find_all(&self, options: EventListOptions) -> AppResult<Page<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // 存在しない場合は EntityNotFound を返す
    async fn update(&self, event: UpdateEvent) -> AppResult<Event>;
}
