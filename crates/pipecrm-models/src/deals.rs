//! Deal models, the pipeline stage catalog, and the stage state machine.
//!
//! A deal moves through an ordered pipeline (`lead` → `qualified` →
//! `proposal` → `negotiation`) toward one of two terminal outcomes
//! (`closed-won`, `closed-lost`). `status` and `probability` are derived
//! whenever a terminal stage is entered: won forces `status=won,
//! probability=100`, lost forces `status=lost, probability=0`. Non-terminal
//! transitions leave `status` untouched. All stage changes go through
//! [`Deal::apply_stage`]; the generic update path has no `status` field, so
//! the two can never desynchronize.

use chrono::{DateTime, Utc};
use pipecrm_core::pagination::{lenient_i64, limit_or_default, page_or_default};
use pipecrm_core::{FieldValue, QuerySpec, Queryable, SortOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A pipeline stage. Ordered; the two closed stages are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    /// All stages in pipeline order. This is the stage catalog: read-only,
    /// loaded once.
    pub const ALL: [DealStage; 6] = [
        DealStage::Lead,
        DealStage::Qualified,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::ClosedWon,
        DealStage::ClosedLost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DealStage::Lead => "lead",
            DealStage::Qualified => "qualified",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::ClosedWon => "closed-won",
            DealStage::ClosedLost => "closed-lost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::Qualified => "Qualified",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Won",
            DealStage::ClosedLost => "Lost",
        }
    }

    /// 1-based position in the pipeline.
    pub fn order(&self) -> i64 {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map(|i| i as i64 + 1)
            .unwrap_or(0)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }

    /// Parse a stage by its wire name. `None` means the caller named a stage
    /// outside the catalog — an invalid transition request.
    pub fn from_name(name: &str) -> Option<DealStage> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Deal outcome summary. Derived from terminal stage transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Active,
    Won,
    Lost,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Active => "active",
            DealStatus::Won => "won",
            DealStatus::Lost => "lost",
        }
    }
}

/// Catalog entry returned by `GET /api/deals/stages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StageInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub order: i64,
}

/// The full stage catalog in pipeline order.
pub fn stage_catalog() -> Vec<StageInfo> {
    DealStage::ALL
        .iter()
        .map(|s| StageInfo {
            name: s.name(),
            label: s.label(),
            order: s.order(),
        })
        .collect()
}

/// A sales opportunity.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    pub customer_id: i64,
    pub title: String,
    pub description: String,
    pub value: f64,
    pub currency: String,
    pub stage: DealStage,
    /// Forecast confidence 0–100. Forced to 100/0 by terminal transitions.
    pub probability: i64,
    pub expected_close_date: DateTime<Utc>,
    pub source: String,
    /// User id of the owning sales rep.
    pub assigned_to: i64,
    pub status: DealStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Apply a stage transition.
    ///
    /// Order matters: the explicit probability (clamped to 0–100) is set
    /// first, then the terminal derivation overrides it, so a caller-supplied
    /// probability on a closing transition never survives.
    pub fn apply_stage(&mut self, stage: DealStage, probability: Option<i64>) {
        self.stage = stage;
        if let Some(p) = probability {
            self.probability = p.clamp(0, 100);
        }
        match stage {
            DealStage::ClosedWon => {
                self.status = DealStatus::Won;
                self.probability = 100;
            }
            DealStage::ClosedLost => {
                self.status = DealStatus::Lost;
                self.probability = 0;
            }
            // Re-opening a closed deal keeps its won/lost status until the
            // next terminal transition; status summarizes the last outcome.
            _ => {}
        }
        self.updated_at = Utc::now();
    }
}

impl Queryable for Deal {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "customerId" => Some(FieldValue::Int(self.customer_id)),
            "title" => Some(FieldValue::Str(self.title.clone())),
            "description" => Some(FieldValue::Str(self.description.clone())),
            "value" => Some(FieldValue::Float(self.value)),
            "stage" => Some(FieldValue::Str(self.stage.name().to_string())),
            "probability" => Some(FieldValue::Int(self.probability)),
            "expectedCloseDate" => Some(FieldValue::Date(self.expected_close_date)),
            "assignedTo" => Some(FieldValue::Int(self.assigned_to)),
            "status" => Some(FieldValue::Str(self.status.as_str().to_string())),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            "updatedAt" => Some(FieldValue::Date(self.updated_at)),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /api/deals`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DealListParams {
    pub customer_id: Option<String>,
    pub stage: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl DealListParams {
    pub fn to_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new(page_or_default(self.page), limit_or_default(self.limit));
        if let Some(raw) = &self.customer_id {
            spec.push_filter("customerId", FieldValue::int_param(raw));
        }
        if let Some(stage) = &self.stage {
            spec.push_filter("stage", FieldValue::Str(stage.clone()));
        }
        if let Some(status) = &self.status {
            spec.push_filter("status", FieldValue::Str(status.clone()));
        }
        if let Some(raw) = &self.assigned_to {
            spec.push_filter("assignedTo", FieldValue::int_param(raw));
        }
        spec.search = self.search.clone();
        spec.sort_by = self.sort_by.clone();
        spec.sort_order = SortOrder::from_param(self.sort_order.as_deref());
        spec
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealDto {
    pub customer_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub value: f64,
    /// Defaults to `EUR`.
    pub currency: Option<String>,
    /// Stage name; defaults to `lead`.
    pub stage: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i64>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub source: Option<String>,
    /// Defaults to the authenticated user.
    pub assigned_to: Option<i64>,
    pub notes: Option<String>,
}

/// Generic deal update. Deliberately has no `status` field: `status` is
/// derived from terminal stage transitions only.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    /// When present, the update is routed through the stage machine.
    pub stage: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i64>,
    pub expected_close_date: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub assigned_to: Option<i64>,
    pub notes: Option<String>,
}

/// Body of `PUT /api/deals/:id/stage`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStageDto {
    pub stage: Option<String>,
    pub probability: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDealsResponse {
    pub deals: Vec<Deal>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Per-stage rollup used in the stats endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct StageBreakdown {
    pub stage: &'static str,
    pub label: &'static str,
    pub count: i64,
    pub value: f64,
}

/// Aggregates for `GET /api/deals/stats/overview`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealStats {
    pub total: i64,
    pub active: i64,
    pub won: i64,
    pub lost: i64,
    pub total_value: f64,
    pub won_value: f64,
    pub average_value: f64,
    pub by_stage: Vec<StageBreakdown>,
}

/// One pipeline column for `GET /api/deals/stats/pipeline`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PipelineEntry {
    pub stage: &'static str,
    pub label: &'static str,
    pub order: i64,
    pub deals: Vec<Deal>,
    pub count: i64,
    pub value: f64,
}
