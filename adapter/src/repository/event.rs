use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event, EventListOptions,
    },
    id::EventId,
    list::Page,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::event::{EventCountRow, EventRow},
    ConnectionPool,
};

const SELECT_EVENT: &str = r#"
    SELECT
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
        event_status
    FROM events
"#;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        let event = Event::from_draft(EventId::new(), event.draft);

        let res = sqlx::query(
            r#"
                INSERT INTO events (
                    event_id, name, description,
                    begin_enrollment_date_time, close_enrollment_date_time,
                    begin_event_date_time, end_event_date_time,
                    location, base_price, max_price, limit_of_enrollment,
                    offline, free, event_status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.begin_enrollment_date_time)
        .bind(event.close_enrollment_date_time)
        .bind(event.begin_event_date_time)
        .bind(event.end_event_date_time)
        .bind(&event.location)
        .bind(event.base_price)
        .bind(event.max_price)
        .bind(event.limit_of_enrollment)
        .bind(event.offline)
        .bind(event.free)
        .bind(event.event_status.to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        Ok(event)
    }

    async fn find_all(&self, options: EventListOptions) -> AppResult<Page<Event>> {
        let EventCountRow { total } =
            sqlx::query_as::<_, EventCountRow>("SELECT COUNT(*) AS total FROM events")
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        // 並べ替えの列名は EventSortKey の値に限定されている
        let order_by = match options.sort {
            Some((key, direction)) => {
                format!("{} {}, created_at ASC, event_id ASC", key.column(), direction)
            }
            None => "created_at ASC, event_id ASC".to_string(),
        };
        let sql = format!("{SELECT_EVENT} ORDER BY {order_by} LIMIT $1 OFFSET $2");

        let items = sqlx::query_as::<_, EventRow>(&sql)
            .bind(options.size)
            .bind(options.offset())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Event::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            page: options.page,
            size: options.size,
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let sql = format!("{SELECT_EVENT} WHERE event_id = $1");
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(event_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Event::try_from)
            .transpose()
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        let mut tx = self.db.begin().await?;

        let sql = format!("{SELECT_EVENT} WHERE event_id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        };

        let mut current = Event::try_from(row)?;
        current.apply(event.draft);

        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    name = $2,
                    description = $3,
                    begin_enrollment_date_time = $4,
                    close_enrollment_date_time = $5,
                    begin_event_date_time = $6,
                    end_event_date_time = $7,
                    location = $8,
                    base_price = $9,
                    max_price = $10,
                    limit_of_enrollment = $11,
                    offline = $12,
                    free = $13
                WHERE event_id = $1
            "#,
        )
        .bind(current.id)
        .bind(&current.name)
        .bind(&current.description)
        .bind(current.begin_enrollment_date_time)
        .bind(current.close_enrollment_date_time)
        .bind(current.begin_event_date_time)
        .bind(current.end_event_date_time)
        .bind(&current.location)
        .bind(current.base_price)
        .bind(current.max_price)
        .bind(current.limit_of_enrollment)
        .bind(current.offline)
        .bind(current.free)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(current)
    }
}
