//! Demo dataset loaded by `Store::seeded`.

use chrono::{Duration, Utc};
use pipecrm_models::activities::Activity;
use pipecrm_models::contacts::Contact;
use pipecrm_models::customers::Customer;
use pipecrm_models::deals::{Deal, DealStage, DealStatus};
use pipecrm_models::users::{Role, User};

/// Plaintext password shared by the demo accounts. Hashed once when the
/// seeded store is built.
pub const DEMO_PASSWORD: &str = "admin123";

pub fn users(password_hash: &str) -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: 1,
            username: "admin".to_string(),
            email: "admin@pipecrm.test".to_string(),
            password: password_hash.to_string(),
            role: Role::Admin,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            created_at: now,
            updated_at: None,
        },
        User {
            id: 2,
            username: "sales".to_string(),
            email: "sales@pipecrm.test".to_string(),
            password: password_hash.to_string(),
            role: Role::Sales,
            first_name: "Sales".to_string(),
            last_name: "Rep".to_string(),
            created_at: now,
            updated_at: None,
        },
    ]
}

pub fn customers() -> Vec<Customer> {
    let now = Utc::now();
    vec![
        Customer {
            id: 1,
            company_name: "Tech Solutions SRL".to_string(),
            contact_person: "Mario Rossi".to_string(),
            email: "mario.rossi@techsolutions.it".to_string(),
            phone: "+39 02 1234567".to_string(),
            address: "Via Milano 123, Milano, MI 20100".to_string(),
            industry: "Technology".to_string(),
            status: "active".to_string(),
            revenue: 50_000.0,
            notes: "Flagship account in the IT sector".to_string(),
            created_at: now,
            updated_at: now,
        },
        Customer {
            id: 2,
            company_name: "Digital Marketing Agency".to_string(),
            contact_person: "Giulia Bianchi".to_string(),
            email: "giulia@digitalmarketing.it".to_string(),
            phone: "+39 06 9876543".to_string(),
            address: "Via Roma 456, Roma, RM 00100".to_string(),
            industry: "Marketing".to_string(),
            status: "prospect".to_string(),
            revenue: 25_000.0,
            notes: "Interested in our consulting services".to_string(),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn contacts() -> Vec<Contact> {
    let now = Utc::now();
    vec![
        Contact {
            id: 1,
            customer_id: 1,
            first_name: "Marco".to_string(),
            last_name: "Verdi".to_string(),
            email: "marco.verdi@techsolutions.it".to_string(),
            phone: "+39 02 1234568".to_string(),
            position: "CTO".to_string(),
            department: "Technology".to_string(),
            is_primary: true,
            notes: "Main technical decision maker".to_string(),
            created_at: now,
            updated_at: now,
        },
        Contact {
            id: 2,
            customer_id: 1,
            first_name: "Laura".to_string(),
            last_name: "Neri".to_string(),
            email: "laura.neri@techsolutions.it".to_string(),
            phone: "+39 02 1234569".to_string(),
            position: "Purchasing Manager".to_string(),
            department: "Procurement".to_string(),
            is_primary: false,
            notes: "Owns IT purchasing".to_string(),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn deals() -> Vec<Deal> {
    let now = Utc::now();
    vec![
        Deal {
            id: 1,
            customer_id: 1,
            title: "Enterprise CRM Implementation".to_string(),
            description: "Full CRM rollout project".to_string(),
            value: 75_000.0,
            currency: "EUR".to_string(),
            stage: DealStage::Proposal,
            probability: 70,
            expected_close_date: now + Duration::days(30),
            source: "referral".to_string(),
            assigned_to: 2,
            status: DealStatus::Active,
            notes: "Very engaged, asked for a technical demo".to_string(),
            created_at: now,
            updated_at: now,
        },
        Deal {
            id: 2,
            customer_id: 2,
            title: "Digital Marketing Consulting".to_string(),
            description: "Consulting engagement for digital strategy".to_string(),
            value: 15_000.0,
            currency: "EUR".to_string(),
            stage: DealStage::Negotiation,
            probability: 85,
            expected_close_date: now + Duration::days(15),
            source: "website".to_string(),
            assigned_to: 2,
            status: DealStatus::Active,
            notes: "Final contract negotiation in progress".to_string(),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn activities() -> Vec<Activity> {
    let now = Utc::now();
    vec![
        Activity {
            id: 1,
            customer_id: 1,
            deal_id: Some(1),
            r#type: "call".to_string(),
            title: "Follow-up call".to_string(),
            description: "Discuss technical requirements for the CRM project".to_string(),
            status: "completed".to_string(),
            priority: "high".to_string(),
            assigned_to: 2,
            created_by: 2,
            due_date: now,
            completed_at: Some(now),
            notes: "Customer wants a technical demo this week".to_string(),
            created_at: now,
            updated_at: now,
        },
        Activity {
            id: 2,
            customer_id: 1,
            deal_id: Some(1),
            r#type: "meeting".to_string(),
            title: "CRM technical demo".to_string(),
            description: "Walk through the main product features".to_string(),
            status: "scheduled".to_string(),
            priority: "high".to_string(),
            assigned_to: 2,
            created_by: 2,
            due_date: now + Duration::days(3),
            completed_at: None,
            notes: "Prepare a demo environment with sample data".to_string(),
            created_at: now,
            updated_at: now,
        },
    ]
}
