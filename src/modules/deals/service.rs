use anyhow::anyhow;
use chrono::{Duration, Utc};
use pipecrm_core::run_query;
use super::model::{
    ChangeStageDto, CreateDealDto, Deal, DealListParams, DealStage, DealStats, DealStatus,
    PaginatedDealsResponse, PipelineEntry, StageBreakdown, UpdateDealDto,
};
use pipecrm_store::Store;
use tracing::{info, instrument};

use crate::utils::errors::AppError;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Deal not found"))
}

fn parse_stage(name: &str) -> Result<DealStage, AppError> {
    DealStage::from_name(name)
        .ok_or_else(|| AppError::bad_request(anyhow!("Unknown stage: {name}")))
}

pub struct DealService;

impl DealService {
    #[instrument(skip(store, params))]
    pub fn list(store: &Store, params: &DealListParams) -> PaginatedDealsResponse {
        let rows = store.deals.snapshot();
        let result = run_query(&rows, &params.to_spec());
        PaginatedDealsResponse {
            deals: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }

    pub fn get(store: &Store, id: i64) -> Result<Deal, AppError> {
        store.deals.get(id).ok_or_else(not_found)
    }

    /// Unassigned deals default to the creating user. Creating directly in
    /// a terminal stage derives status and probability the same way a stage
    /// change would.
    #[instrument(skip(store, dto), fields(deal.title = %dto.title))]
    pub fn create(store: &Store, creator_id: i64, dto: CreateDealDto) -> Result<Deal, AppError> {
        let stage = match &dto.stage {
            Some(name) => parse_stage(name)?,
            None => DealStage::Lead,
        };

        let now = Utc::now();
        let mut deal = Deal {
            id: 0,
            customer_id: dto.customer_id,
            title: dto.title.clone(),
            description: dto.description.clone().unwrap_or_default(),
            value: dto.value,
            currency: dto.currency.clone().unwrap_or_else(|| "EUR".to_string()),
            stage: DealStage::Lead,
            probability: 0,
            expected_close_date: dto
                .expected_close_date
                .unwrap_or_else(|| now + Duration::days(30)),
            source: dto.source.clone().unwrap_or_default(),
            assigned_to: dto.assigned_to.unwrap_or(creator_id),
            status: DealStatus::Active,
            notes: dto.notes.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        deal.apply_stage(stage, dto.probability);

        let deal = store.deals.insert(|id| {
            let mut deal = deal.clone();
            deal.id = id;
            deal
        });

        info!(deal.id = %deal.id, deal.stage = %deal.stage.name(), "Deal created");
        Ok(deal)
    }

    /// Generic update. A `stage` in the body routes through the stage
    /// machine so status and probability stay derived; without one, an
    /// explicit probability is applied as-is.
    #[instrument(skip(store, dto))]
    pub fn update(store: &Store, id: i64, dto: UpdateDealDto) -> Result<Deal, AppError> {
        store.deals.get(id).ok_or_else(not_found)?;

        let stage = dto.stage.as_deref().map(parse_stage).transpose()?;

        let deal = store
            .deals
            .update(id, |deal| {
                if let Some(title) = dto.title.clone() {
                    deal.title = title;
                }
                if let Some(description) = dto.description.clone() {
                    deal.description = description;
                }
                if let Some(value) = dto.value {
                    deal.value = value;
                }
                if let Some(currency) = dto.currency.clone() {
                    deal.currency = currency;
                }
                if let Some(expected_close_date) = dto.expected_close_date {
                    deal.expected_close_date = expected_close_date;
                }
                if let Some(source) = dto.source.clone() {
                    deal.source = source;
                }
                if let Some(assigned_to) = dto.assigned_to {
                    deal.assigned_to = assigned_to;
                }
                if let Some(notes) = dto.notes.clone() {
                    deal.notes = notes;
                }
                match stage {
                    Some(stage) => deal.apply_stage(stage, dto.probability),
                    None => {
                        if let Some(probability) = dto.probability {
                            deal.probability = probability.clamp(0, 100);
                        }
                        deal.updated_at = Utc::now();
                    }
                }
            })
            .ok_or_else(not_found)?;

        info!(deal.id = %id, "Deal updated");
        Ok(deal)
    }

    #[instrument(skip(store, dto))]
    pub fn change_stage(store: &Store, id: i64, dto: ChangeStageDto) -> Result<Deal, AppError> {
        store.deals.get(id).ok_or_else(not_found)?;

        let name = dto
            .stage
            .as_deref()
            .ok_or_else(|| AppError::bad_request(anyhow!("Stage is required")))?;
        let stage = parse_stage(name)?;

        let deal = store
            .deals
            .update(id, |deal| deal.apply_stage(stage, dto.probability))
            .ok_or_else(not_found)?;

        info!(
            deal.id = %id,
            deal.stage = %deal.stage.name(),
            deal.status = %deal.status.as_str(),
            "Deal stage changed"
        );
        Ok(deal)
    }

    #[instrument(skip(store))]
    pub fn delete(store: &Store, id: i64) -> Result<Deal, AppError> {
        let deal = store.deals.remove(id).ok_or_else(not_found)?;
        info!(deal.id = %id, "Deal deleted");
        Ok(deal)
    }

    pub fn stats(store: &Store) -> DealStats {
        let rows = store.deals.snapshot();
        let total = rows.len() as i64;
        let total_value: f64 = rows.iter().map(|d| d.value).sum();
        let won_value: f64 = rows
            .iter()
            .filter(|d| d.status == DealStatus::Won)
            .map(|d| d.value)
            .sum();

        let by_stage = DealStage::ALL
            .iter()
            .map(|stage| {
                let in_stage: Vec<&Deal> = rows.iter().filter(|d| d.stage == *stage).collect();
                StageBreakdown {
                    stage: stage.name(),
                    label: stage.label(),
                    count: in_stage.len() as i64,
                    value: in_stage.iter().map(|d| d.value).sum(),
                }
            })
            .collect();

        DealStats {
            total,
            active: rows.iter().filter(|d| d.status == DealStatus::Active).count() as i64,
            won: rows.iter().filter(|d| d.status == DealStatus::Won).count() as i64,
            lost: rows.iter().filter(|d| d.status == DealStatus::Lost).count() as i64,
            total_value,
            won_value,
            average_value: if total > 0 {
                total_value / total as f64
            } else {
                0.0
            },
            by_stage,
        }
    }

    pub fn pipeline(store: &Store) -> Vec<PipelineEntry> {
        let rows = store.deals.snapshot();
        DealStage::ALL
            .iter()
            .map(|stage| {
                let deals: Vec<Deal> = rows
                    .iter()
                    .filter(|d| d.stage == *stage)
                    .cloned()
                    .collect();
                PipelineEntry {
                    stage: stage.name(),
                    label: stage.label(),
                    order: stage.order(),
                    count: deals.len() as i64,
                    value: deals.iter().map(|d| d.value).sum(),
                    deals,
                }
            })
            .collect()
    }
}
