//! Activity models, DTOs, and query field table.
//!
//! Activities are tasks and touchpoints (calls, meetings, demos) attached to
//! a customer and optionally a deal. `completedAt` is derived from status:
//! set when an activity is completed, cleared when it moves back out of
//! `completed`.

use chrono::{DateTime, Utc};
use pipecrm_core::pagination::{lenient_i64, limit_or_default, page_or_default};
use pipecrm_core::{FieldValue, QuerySpec, Queryable, SortOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// The activity type catalog, informational for clients.
pub const ACTIVITY_TYPES: &[(&str, &str)] = &[
    ("call", "Call"),
    ("meeting", "Meeting"),
    ("email", "Email"),
    ("task", "Task"),
    ("note", "Note"),
    ("demo", "Demo"),
    ("proposal", "Proposal"),
    ("follow-up", "Follow-up"),
];

/// Catalog entry returned by `GET /api/activities/types`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityTypeInfo {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn activity_type_catalog() -> Vec<ActivityTypeInfo> {
    ACTIVITY_TYPES
        .iter()
        .map(|(value, label)| ActivityTypeInfo { value, label })
        .collect()
}

/// A scheduled or completed activity.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub customer_id: i64,
    pub deal_id: Option<i64>,
    pub r#type: String,
    pub title: String,
    pub description: String,
    /// `pending`, `scheduled`, or `completed`.
    pub status: String,
    /// `high`, `medium`, or `low`.
    pub priority: String,
    pub assigned_to: i64,
    pub created_by: i64,
    pub due_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// Overdue means past due and not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != "completed" && self.due_date < now
    }

    /// Set the status, deriving `completedAt`: stamped on entering
    /// `completed`, cleared on leaving it.
    pub fn set_status(&mut self, status: String, now: DateTime<Utc>) {
        if status == "completed" {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
    }
}

impl Queryable for Activity {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "customerId" => Some(FieldValue::Int(self.customer_id)),
            "dealId" => self.deal_id.map(FieldValue::Int),
            "type" => Some(FieldValue::Str(self.r#type.clone())),
            "title" => Some(FieldValue::Str(self.title.clone())),
            "description" => Some(FieldValue::Str(self.description.clone())),
            "status" => Some(FieldValue::Str(self.status.clone())),
            "priority" => Some(FieldValue::Str(self.priority.clone())),
            "assignedTo" => Some(FieldValue::Int(self.assigned_to)),
            "createdBy" => Some(FieldValue::Int(self.created_by)),
            "dueDate" => Some(FieldValue::Date(self.due_date)),
            "completedAt" => self.completed_at.map(FieldValue::Date),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            "updatedAt" => Some(FieldValue::Date(self.updated_at)),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /api/activities`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListParams {
    pub customer_id: Option<String>,
    pub deal_id: Option<String>,
    pub r#type: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl ActivityListParams {
    pub fn to_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new(page_or_default(self.page), limit_or_default(self.limit));
        if let Some(raw) = &self.customer_id {
            spec.push_filter("customerId", FieldValue::int_param(raw));
        }
        if let Some(raw) = &self.deal_id {
            spec.push_filter("dealId", FieldValue::int_param(raw));
        }
        if let Some(t) = &self.r#type {
            spec.push_filter("type", FieldValue::Str(t.clone()));
        }
        if let Some(status) = &self.status {
            spec.push_filter("status", FieldValue::Str(status.clone()));
        }
        if let Some(raw) = &self.assigned_to {
            spec.push_filter("assignedTo", FieldValue::int_param(raw));
        }
        if let Some(priority) = &self.priority {
            spec.push_filter("priority", FieldValue::Str(priority.clone()));
        }
        spec.search = self.search.clone();
        // Activities default to the agenda view: soonest due first.
        spec.sort_by = Some(
            self.sort_by
                .clone()
                .unwrap_or_else(|| "dueDate".to_string()),
        );
        spec.sort_order = SortOrder::from_param(self.sort_order.as_deref());
        spec
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityDto {
    pub customer_id: i64,
    pub deal_id: Option<i64>,
    #[validate(length(min = 1, max = 50))]
    pub r#type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `pending`.
    pub status: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    /// Defaults to the authenticated user.
    pub assigned_to: Option<i64>,
    /// Defaults to tomorrow.
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityDto {
    #[validate(length(min = 1, max = 50))]
    pub r#type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Body of `PUT /api/activities/:id/complete`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompleteActivityDto {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedActivitiesResponse {
    pub activities: Vec<Activity>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Unpaginated activity listing (today / overdue views).
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
    pub total: i64,
}

/// Per-type rollup for the stats endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityTypeBreakdown {
    pub r#type: &'static str,
    pub label: &'static str,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PriorityBreakdown {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

/// Aggregates for `GET /api/activities/stats/overview`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
    pub overdue: i64,
    pub by_type: Vec<ActivityTypeBreakdown>,
    pub by_priority: PriorityBreakdown,
}
