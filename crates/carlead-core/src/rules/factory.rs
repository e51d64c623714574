use crate::domain::contact::join_non_empty;
use crate::domain::{Contact, ContactId, Status, VehicleSelection};
use crate::time::to_millis;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Payload for a new contact. Every field is optional; `normalize` fills
/// the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default, deserialize_with = "wire::or_default")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car: Option<String>,
    #[serde(default, alias = "brand", deserialize_with = "wire::or_default")]
    pub car_brand: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car_model: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub car_trim: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub brands: Option<Vec<String>>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "wire::optional_datetime")]
    pub next_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub notes: Option<String>,
}

/// Builds a well-formed contact from `input`. Never fails.
///
/// A non-blank `car` is kept as given; otherwise it is derived from the
/// brand/model/trim selection. `brands` falls back to the selected brand
/// when the input carries none (an empty list counts as none, matching the
/// stored format written by earlier versions).
pub fn normalize(now: DateTime<Utc>, input: ContactInput) -> Contact {
    let selection = VehicleSelection::from_parts(
        input.car_brand.as_deref().unwrap_or_default(),
        input.car_model.as_deref().unwrap_or_default(),
        input.car_trim.as_deref().unwrap_or_default(),
    );

    let car = match trimmed(input.car) {
        explicit if !explicit.is_empty() => explicit,
        _ => join_non_empty([selection.brand(), selection.model(), selection.trim()], " "),
    };

    let brands = match input.brands {
        Some(brands) if !brands.is_empty() => brands,
        _ if !selection.is_empty() => vec![selection.brand().to_string()],
        _ => Vec::new(),
    };

    let stamp = to_millis(now);
    Contact {
        id: ContactId::new(),
        name: trimmed(input.name),
        phone: trimmed(input.phone),
        email: trimmed(input.email),
        car,
        car_brand: selection.brand().to_string(),
        car_model: selection.model().to_string(),
        car_trim: selection.trim().to_string(),
        brands,
        source: trimmed(input.source),
        status: input.status.unwrap_or_default(),
        next_date: input.next_date,
        notes: input.notes.unwrap_or_default(),
        interactions: Vec::new(),
        created_at: stamp,
        updated_at: stamp,
    }
}

fn trimmed(value: Option<String>) -> String {
    value
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{normalize, ContactInput};
    use crate::domain::Status;
    use chrono::{TimeZone, Utc};

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn vehicle(brand: &str, model: &str, trim: &str) -> ContactInput {
        ContactInput {
            car_brand: Some(brand.to_string()),
            car_model: Some(model.to_string()),
            car_trim: Some(trim.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn derives_car_from_selection() {
        let contact = normalize(now(), vehicle("BMW", "3-serie", "M Sport"));
        assert_eq!(contact.car, "BMW 3-serie M Sport");
        assert_eq!(contact.brands, vec!["BMW".to_string()]);
    }

    #[test]
    fn explicit_car_wins() {
        let mut input = vehicle("BMW", "3-serie", "M Sport");
        input.name = Some("A".to_string());
        input.car = Some("X".to_string());
        let contact = normalize(now(), input);
        assert_eq!(contact.car, "X");
        assert_eq!(contact.car_brand, "BMW");
    }

    #[test]
    fn blank_car_falls_back_to_selection() {
        let mut input = vehicle("Volvo", "XC60", "");
        input.car = Some("   ".to_string());
        assert_eq!(normalize(now(), input).car, "Volvo XC60");
    }

    #[test]
    fn defaults_fill_everything_else() {
        let contact = normalize(now(), ContactInput::default());
        assert_eq!(contact.name, "");
        assert_eq!(contact.car, "");
        assert!(contact.brands.is_empty());
        assert_eq!(contact.status, Status::ToCall);
        assert!(contact.next_date.is_none());
        assert_eq!(contact.notes, "");
        assert!(contact.interactions.is_empty());
        assert_eq!(contact.created_at, now().timestamp_millis());
        assert_eq!(contact.updated_at, contact.created_at);
    }

    #[test]
    fn trims_text_fields() {
        let contact = normalize(
            now(),
            ContactInput {
                name: Some("  Nils Holm ".to_string()),
                phone: Some(" 070-123 45 67".to_string()),
                email: Some("nils@example.com  ".to_string()),
                notes: Some("  keep as typed\n".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(contact.name, "Nils Holm");
        assert_eq!(contact.phone, "070-123 45 67");
        assert_eq!(contact.email, "nils@example.com");
        assert_eq!(contact.notes, "  keep as typed\n");
    }

    #[test]
    fn supplied_brands_are_kept_but_empty_falls_back() {
        let mut input = vehicle("Kia", "", "");
        input.brands = Some(vec!["Audi".to_string(), "Volvo".to_string()]);
        assert_eq!(normalize(now(), input).brands, vec!["Audi", "Volvo"]);

        let mut input = vehicle("Kia", "", "");
        input.brands = Some(Vec::new());
        assert_eq!(normalize(now(), input).brands, vec!["Kia"]);
    }

    #[test]
    fn orphan_levels_are_dropped() {
        let contact = normalize(now(), vehicle("", "A4", "Avant"));
        assert_eq!(contact.car_model, "");
        assert_eq!(contact.car_trim, "");
        assert_eq!(contact.car, "");
    }

    #[test]
    fn decodes_payload_with_brand_alias() {
        let input: ContactInput =
            serde_json::from_str(r#"{"name": "Eva", "brand": "Audi", "status": "nope"}"#)
                .expect("decode");
        let contact = normalize(now(), input);
        assert_eq!(contact.car_brand, "Audi");
        assert_eq!(contact.status, Status::ToCall);
    }

    #[test]
    fn ids_are_fresh() {
        let a = normalize(now(), ContactInput::default());
        let b = normalize(now(), ContactInput::default());
        assert_ne!(a.id, b.id);
    }
}
