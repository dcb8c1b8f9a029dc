use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::activities::controller::ActivityResponse;
use crate::modules::auth::controller::{ErrorResponse, ProfileUpdateResponse};
use crate::modules::contacts::controller::ContactResponse;
use crate::modules::customers::controller::CustomerResponse;
use crate::modules::deals::controller::DealResponse;

use pipecrm_models::activities::{
    Activity, ActivityListResponse, ActivityStats, ActivityTypeBreakdown, ActivityTypeInfo,
    CompleteActivityDto, CreateActivityDto, PaginatedActivitiesResponse, PriorityBreakdown,
    UpdateActivityDto,
};
use pipecrm_models::contacts::{
    Contact, CreateContactDto, CustomerContactsResponse, PaginatedContactsResponse,
    UpdateContactDto,
};
use pipecrm_models::customers::{
    CreateCustomerDto, Customer, CustomerStats, PaginatedCustomersResponse, UpdateCustomerDto,
};
use pipecrm_models::deals::{
    ChangeStageDto, CreateDealDto, Deal, DealStage, DealStats, DealStatus, PaginatedDealsResponse,
    PipelineEntry, StageBreakdown, StageInfo, UpdateDealDto,
};
use pipecrm_models::users::{
    LoginDto, LoginResponse, RegisterDto, RegisterResponse, Role, UpdateProfileDto, User,
    VerifyResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::verify,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::update_profile,
        crate::modules::customers::controller::get_customer_stats,
        crate::modules::customers::controller::get_customers,
        crate::modules::customers::controller::get_customer,
        crate::modules::customers::controller::create_customer,
        crate::modules::customers::controller::update_customer,
        crate::modules::customers::controller::delete_customer,
        crate::modules::contacts::controller::get_customer_contacts,
        crate::modules::contacts::controller::get_contacts,
        crate::modules::contacts::controller::get_contact,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::update_contact,
        crate::modules::contacts::controller::delete_contact,
        crate::modules::deals::controller::get_stages,
        crate::modules::deals::controller::get_deal_stats,
        crate::modules::deals::controller::get_pipeline,
        crate::modules::deals::controller::get_deals,
        crate::modules::deals::controller::get_deal,
        crate::modules::deals::controller::create_deal,
        crate::modules::deals::controller::update_deal,
        crate::modules::deals::controller::change_deal_stage,
        crate::modules::deals::controller::delete_deal,
        crate::modules::activities::controller::get_activity_types,
        crate::modules::activities::controller::get_my_today,
        crate::modules::activities::controller::get_my_overdue,
        crate::modules::activities::controller::get_activity_stats,
        crate::modules::activities::controller::get_activities,
        crate::modules::activities::controller::get_activity,
        crate::modules::activities::controller::create_activity,
        crate::modules::activities::controller::update_activity,
        crate::modules::activities::controller::complete_activity,
        crate::modules::activities::controller::delete_activity,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterDto,
            LoginDto,
            UpdateProfileDto,
            LoginResponse,
            RegisterResponse,
            VerifyResponse,
            ProfileUpdateResponse,
            ErrorResponse,
            Customer,
            CreateCustomerDto,
            UpdateCustomerDto,
            PaginatedCustomersResponse,
            CustomerStats,
            CustomerResponse,
            Contact,
            CreateContactDto,
            UpdateContactDto,
            PaginatedContactsResponse,
            CustomerContactsResponse,
            ContactResponse,
            Deal,
            DealStage,
            DealStatus,
            StageInfo,
            CreateDealDto,
            UpdateDealDto,
            ChangeStageDto,
            PaginatedDealsResponse,
            StageBreakdown,
            DealStats,
            PipelineEntry,
            DealResponse,
            Activity,
            ActivityTypeInfo,
            CreateActivityDto,
            UpdateActivityDto,
            CompleteActivityDto,
            PaginatedActivitiesResponse,
            ActivityListResponse,
            ActivityTypeBreakdown,
            PriorityBreakdown,
            ActivityStats,
            ActivityResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and profile endpoints"),
        (name = "Customers", description = "Customer account management"),
        (name = "Contacts", description = "People at customer accounts"),
        (name = "Deals", description = "Sales opportunities and the pipeline"),
        (name = "Activities", description = "Tasks, calls, and meetings")
    ),
    info(
        title = "PipeCRM API",
        version = "0.1.0",
        description = "A CRM REST API built with Rust and Axum: customers, contacts, deals with a staged pipeline, and activities, behind JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
