use crate::domain::{Contact, Status};
use crate::time::to_millis;
use chrono::{DateTime, Utc};

/// Shallow field replacement for an existing contact. `None` leaves a field
/// untouched; `next_date: Some(None)` clears the follow-up date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub car: Option<String>,
    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub car_trim: Option<String>,
    pub brands: Option<Vec<String>>,
    pub source: Option<String>,
    pub status: Option<Status>,
    pub next_date: Option<Option<DateTime<Utc>>>,
    pub notes: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self == &ContactPatch::default()
    }
}

/// Merges `patch` into `contact` and stamps `updated_at`.
pub fn apply_patch(contact: &mut Contact, now: DateTime<Utc>, patch: ContactPatch) {
    let ContactPatch {
        name,
        phone,
        email,
        car,
        car_brand,
        car_model,
        car_trim,
        brands,
        source,
        status,
        next_date,
        notes,
    } = patch;

    replace(&mut contact.name, name);
    replace(&mut contact.phone, phone);
    replace(&mut contact.email, email);
    replace(&mut contact.car, car);
    replace(&mut contact.car_brand, car_brand);
    replace(&mut contact.car_model, car_model);
    replace(&mut contact.car_trim, car_trim);
    replace(&mut contact.brands, brands);
    replace(&mut contact.source, source);
    replace(&mut contact.status, status);
    replace(&mut contact.next_date, next_date);
    replace(&mut contact.notes, notes);
    contact.updated_at = to_millis(now).max(contact.created_at);
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
