use crate::domain::{Contact, ContactId, Status};
use crate::rules::{classify_date, DateClass};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactListItemDto {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub vehicle: Option<String>,
    pub status: Status,
    pub next_date: Option<DateTime<Utc>>,
    pub date_class: Option<DateClass>,
    pub updated_at: i64,
}

impl ContactListItemDto {
    pub fn from_contact<Tz: TimeZone>(contact: &Contact, now: DateTime<Utc>, zone: &Tz) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            vehicle: contact.vehicle_label(),
            status: contact.status,
            next_date: contact.next_date,
            date_class: contact
                .next_date
                .map(|at| classify_date(at, now, zone)),
            updated_at: contact.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaDto {
    pub overdue: Vec<ContactListItemDto>,
    pub today: Vec<ContactListItemDto>,
    pub upcoming: Vec<ContactListItemDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDto {
    pub value: String,
    pub label: String,
}
