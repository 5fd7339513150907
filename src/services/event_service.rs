//! Event service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::DEFAULT_EVENT_TIMEZONE,
    db::repositories::{CompetitionFormatRepository, EventRepository},
    error::{AppError, AppResult},
    handlers::events::request::EventRequest,
    models::{Event, EventFields},
    utils::{optional_text, required_text},
};

/// Event service for business logic
pub struct EventService;

impl EventService {
    /// Create a new event
    pub async fn create(pool: &PgPool, payload: EventRequest) -> AppResult<Event> {
        let fields = Self::fields(pool, payload).await?;

        let event = EventRepository::create(pool, &fields).await?;
        info!(event_id = %event.id, name = %event.name, "Event created");

        Ok(event)
    }

    /// Get event by ID
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Event> {
        EventRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// List all events
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Event>> {
        EventRepository::list(pool).await
    }

    /// Replace an event
    pub async fn update(pool: &PgPool, id: &Uuid, payload: EventRequest) -> AppResult<Event> {
        let fields = Self::fields(pool, payload).await?;

        let event = EventRepository::update(pool, id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        info!(event_id = %event.id, "Event updated");

        Ok(event)
    }

    /// Delete event, cascading to its raceclasses and contestants
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !EventRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// Make sure the event exists before touching its raceclasses or contestants
    pub async fn ensure_exists(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        Self::get(pool, id).await.map(|_| ())
    }

    async fn fields(pool: &PgPool, payload: EventRequest) -> AppResult<EventFields> {
        let competition_format = optional_text(payload.competition_format);
        if let Some(name) = &competition_format {
            if CompetitionFormatRepository::find_by_name(pool, name)
                .await?
                .is_none()
            {
                return Err(AppError::InvalidInput(format!(
                    "Competition format '{}' does not exist",
                    name
                )));
            }
        }

        Ok(EventFields {
            name: required_text("name", &payload.name)?,
            date_of_event: payload.date_of_event,
            time_of_event: payload.time_of_event,
            timezone: optional_text(payload.timezone)
                .or_else(|| Some(DEFAULT_EVENT_TIMEZONE.to_string())),
            competition_format,
            organiser: optional_text(payload.organiser),
            webpage: optional_text(payload.webpage),
            information: optional_text(payload.information),
        })
    }
}
