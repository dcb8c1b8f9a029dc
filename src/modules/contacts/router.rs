use axum::{Router, routing::get};

use super::controller::{
    create_contact, delete_contact, get_contact, get_contacts, get_customer_contacts,
    update_contact,
};
use crate::state::AppState;

pub fn init_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/customer/{customer_id}", get(get_customer_contacts))
        .route("/", get(get_contacts).post(create_contact))
        .route(
            "/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
