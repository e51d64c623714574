use crate::domain::ids::ContactId;
use crate::domain::interaction::Interaction;
use crate::domain::status::Status;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "wire::or_default")]
    pub id: ContactId,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car_brand: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car_model: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car_trim: String,
    #[serde(default, deserialize_with = "wire::lenient_vec")]
    pub brands: Vec<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub source: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: Status,
    #[serde(default, deserialize_with = "wire::optional_datetime")]
    pub next_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "wire::lenient_vec")]
    pub interactions: Vec<Interaction>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub updated_at: i64,
}

impl Contact {
    /// Human readable vehicle interest: the structured selection when a
    /// brand is set, else the legacy brand list, else the free-text field.
    pub fn vehicle_label(&self) -> Option<String> {
        if !self.car_brand.is_empty() {
            let parts = [&self.car_brand, &self.car_model, &self.car_trim];
            return Some(join_non_empty(parts.iter().map(|part| part.as_str()), " "));
        }
        if !self.brands.is_empty() {
            return Some(self.brands.join(", "));
        }
        if !self.car.is_empty() {
            return Some(self.car.clone());
        }
        None
    }

    /// Lower-cased text the free-text query is matched against.
    pub fn search_haystack(&self) -> String {
        let brands = self.brands.join(" ");
        let fields = [
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.car.as_str(),
            self.car_brand.as_str(),
            self.car_model.as_str(),
            self.car_trim.as_str(),
            brands.as_str(),
            self.notes.as_str(),
        ];
        fields.join(" ").to_lowercase()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(unnamed)"
        } else {
            &self.name
        }
    }
}

pub(crate) fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
