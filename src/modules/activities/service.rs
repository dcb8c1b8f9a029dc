use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use pipecrm_core::run_query;
use super::model::{
    ACTIVITY_TYPES, Activity, ActivityListParams, ActivityListResponse, ActivityStats,
    ActivityTypeBreakdown, CompleteActivityDto, CreateActivityDto, PaginatedActivitiesResponse,
    PriorityBreakdown, UpdateActivityDto,
};
use pipecrm_store::Store;
use tracing::{info, instrument};

use crate::utils::errors::AppError;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Activity not found"))
}

pub struct ActivityService;

impl ActivityService {
    #[instrument(skip(store, params))]
    pub fn list(store: &Store, params: &ActivityListParams) -> PaginatedActivitiesResponse {
        let rows = store.activities.snapshot();
        let result = run_query(&rows, &params.to_spec());
        PaginatedActivitiesResponse {
            activities: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }

    /// Activities assigned to `user_id` whose due date falls on the current
    /// calendar day (UTC).
    pub fn my_today(store: &Store, user_id: i64, now: DateTime<Utc>) -> ActivityListResponse {
        let today = now.date_naive();
        let activities: Vec<Activity> = store
            .activities
            .snapshot()
            .into_iter()
            .filter(|a| a.assigned_to == user_id && a.due_date.date_naive() == today)
            .collect();
        let total = activities.len() as i64;
        ActivityListResponse { activities, total }
    }

    /// Incomplete activities assigned to `user_id` whose due date has passed.
    pub fn my_overdue(store: &Store, user_id: i64, now: DateTime<Utc>) -> ActivityListResponse {
        let activities: Vec<Activity> = store
            .activities
            .snapshot()
            .into_iter()
            .filter(|a| a.assigned_to == user_id && a.is_overdue(now))
            .collect();
        let total = activities.len() as i64;
        ActivityListResponse { activities, total }
    }

    pub fn stats(store: &Store, now: DateTime<Utc>) -> ActivityStats {
        let rows = store.activities.snapshot();
        let by_type = ACTIVITY_TYPES
            .iter()
            .map(|(value, label)| ActivityTypeBreakdown {
                r#type: value,
                label,
                count: rows.iter().filter(|a| a.r#type == *value).count() as i64,
            })
            .collect();

        ActivityStats {
            total: rows.len() as i64,
            pending: rows.iter().filter(|a| a.status == "pending").count() as i64,
            completed: rows.iter().filter(|a| a.status == "completed").count() as i64,
            overdue: rows.iter().filter(|a| a.is_overdue(now)).count() as i64,
            by_type,
            by_priority: PriorityBreakdown {
                high: rows.iter().filter(|a| a.priority == "high").count() as i64,
                medium: rows.iter().filter(|a| a.priority == "medium").count() as i64,
                low: rows.iter().filter(|a| a.priority == "low").count() as i64,
            },
        }
    }

    pub fn get(store: &Store, id: i64) -> Result<Activity, AppError> {
        store.activities.get(id).ok_or_else(not_found)
    }

    #[instrument(skip(store, dto), fields(activity.title = %dto.title))]
    pub fn create(
        store: &Store,
        creator_id: i64,
        dto: CreateActivityDto,
    ) -> Result<Activity, AppError> {
        let now = Utc::now();
        let activity = store.activities.insert(|id| Activity {
            id,
            customer_id: dto.customer_id,
            deal_id: dto.deal_id,
            r#type: dto.r#type.clone(),
            title: dto.title.clone(),
            description: dto.description.clone().unwrap_or_default(),
            status: dto.status.clone().unwrap_or_else(|| "pending".to_string()),
            priority: dto
                .priority
                .clone()
                .unwrap_or_else(|| "medium".to_string()),
            assigned_to: dto.assigned_to.unwrap_or(creator_id),
            created_by: creator_id,
            due_date: dto.due_date.unwrap_or_else(|| now + Duration::days(1)),
            completed_at: None,
            notes: dto.notes.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        });

        info!(activity.id = %activity.id, "Activity created");
        Ok(activity)
    }

    #[instrument(skip(store, dto))]
    pub fn update(store: &Store, id: i64, dto: UpdateActivityDto) -> Result<Activity, AppError> {
        store.activities.get(id).ok_or_else(not_found)?;

        let now = Utc::now();
        let activity = store
            .activities
            .update(id, |activity| {
                if let Some(r#type) = dto.r#type.clone() {
                    activity.r#type = r#type;
                }
                if let Some(title) = dto.title.clone() {
                    activity.title = title;
                }
                if let Some(description) = dto.description.clone() {
                    activity.description = description;
                }
                if let Some(status) = dto.status.clone() {
                    activity.set_status(status, now);
                }
                if let Some(priority) = dto.priority.clone() {
                    activity.priority = priority;
                }
                if let Some(assigned_to) = dto.assigned_to {
                    activity.assigned_to = assigned_to;
                }
                if let Some(due_date) = dto.due_date {
                    activity.due_date = due_date;
                }
                if let Some(notes) = dto.notes.clone() {
                    activity.notes = notes;
                }
                activity.updated_at = now;
            })
            .ok_or_else(not_found)?;

        info!(activity.id = %id, "Activity updated");
        Ok(activity)
    }

    #[instrument(skip(store, dto))]
    pub fn complete(
        store: &Store,
        id: i64,
        dto: CompleteActivityDto,
    ) -> Result<Activity, AppError> {
        store.activities.get(id).ok_or_else(not_found)?;

        let now = Utc::now();
        let activity = store
            .activities
            .update(id, |activity| {
                activity.set_status("completed".to_string(), now);
                if let Some(notes) = dto.notes.clone() {
                    activity.notes = notes;
                }
                activity.updated_at = now;
            })
            .ok_or_else(not_found)?;

        info!(activity.id = %id, "Activity completed");
        Ok(activity)
    }

    #[instrument(skip(store))]
    pub fn delete(store: &Store, id: i64) -> Result<Activity, AppError> {
        let activity = store.activities.remove(id).ok_or_else(not_found)?;
        info!(activity.id = %id, "Activity deleted");
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn create_dto(title: &str) -> CreateActivityDto {
        CreateActivityDto {
            customer_id: 1,
            deal_id: None,
            r#type: "call".to_string(),
            title: title.to_string(),
            description: None,
            status: None,
            priority: None,
            assigned_to: None,
            due_date: None,
            notes: None,
        }
    }

    #[test]
    fn create_applies_defaults() {
        let store = Store::new();
        let activity = ActivityService::create(&store, 3, create_dto("Call lead")).unwrap();
        assert_eq!(activity.status, "pending");
        assert_eq!(activity.priority, "medium");
        assert_eq!(activity.assigned_to, 3);
        assert_eq!(activity.created_by, 3);
        assert!(activity.completed_at.is_none());
        assert!(activity.due_date > Utc::now());
    }

    #[test]
    fn complete_stamps_completed_at_and_keeps_notes() {
        let store = Store::new();
        let activity = ActivityService::create(&store, 1, create_dto("Wrap up")).unwrap();
        let done = ActivityService::complete(
            &store,
            activity.id,
            CompleteActivityDto {
                notes: Some("All sorted".to_string()),
            },
        )
        .unwrap();
        assert_eq!(done.status, "completed");
        assert!(done.completed_at.is_some());
        assert_eq!(done.notes, "All sorted");
    }

    #[test]
    fn reverting_status_clears_completed_at() {
        let store = Store::new();
        let activity = ActivityService::create(&store, 1, create_dto("Undo me")).unwrap();
        ActivityService::complete(&store, activity.id, CompleteActivityDto::default()).unwrap();

        let reverted = ActivityService::update(
            &store,
            activity.id,
            UpdateActivityDto {
                status: Some("pending".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(reverted.completed_at.is_none());
    }

    #[test]
    fn my_today_filters_by_assignee_and_day() {
        let store = Store::new();
        let now = Utc::now();
        let mut due_today = create_dto("Today");
        due_today.due_date = Some(now);
        let mut due_later = create_dto("Next week");
        due_later.due_date = Some(now + Duration::days(7));
        ActivityService::create(&store, 1, due_today).unwrap();
        ActivityService::create(&store, 1, due_later).unwrap();

        let mut someone_elses = create_dto("Not mine");
        someone_elses.due_date = Some(now);
        someone_elses.assigned_to = Some(2);
        ActivityService::create(&store, 1, someone_elses).unwrap();

        let today = ActivityService::my_today(&store, 1, now);
        assert_eq!(today.total, 1);
        assert_eq!(today.activities[0].title, "Today");
    }

    #[test]
    fn my_overdue_skips_completed_activities() {
        let store = Store::new();
        let now = Utc::now();
        let mut late = create_dto("Late");
        late.due_date = Some(now - Duration::days(2));
        let late = ActivityService::create(&store, 1, late).unwrap();

        let mut late_done = create_dto("Late but done");
        late_done.due_date = Some(now - Duration::days(2));
        let late_done = ActivityService::create(&store, 1, late_done).unwrap();
        ActivityService::complete(&store, late_done.id, CompleteActivityDto::default()).unwrap();

        let overdue = ActivityService::my_overdue(&store, 1, now);
        assert_eq!(overdue.total, 1);
        assert_eq!(overdue.activities[0].id, late.id);
    }

    #[test]
    fn stats_break_down_by_type_and_priority() {
        let store = Store::seeded();
        let stats = ActivityService::stats(&store, Utc::now());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        let calls = stats.by_type.iter().find(|t| t.r#type == "call").unwrap();
        assert_eq!(calls.count, 1);
        assert_eq!(stats.by_priority.high, 2);
        assert_eq!(stats.by_priority.low, 0);
    }

    #[test]
    fn delete_missing_activity_is_404() {
        let store = Store::new();
        let err = ActivityService::delete(&store, 9).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
