use crate::error::Result;
use crate::slot::Slot;
use carlead_core::rules::{
    apply_interaction, apply_patch, normalize, view, ContactInput, ContactPatch,
    InteractionEntry, ViewQuery,
};
use carlead_core::{Contact, ContactId, Interaction};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, warn};

/// What an import did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Replaced(usize),
    Ignored,
}

/// The contact collection and its persistence slot.
///
/// Built once from the slot, then every mutation writes the whole collection
/// back. Slot failures never reach the caller: a failed load starts empty and
/// a failed write is logged and dropped.
pub struct RecordStore<S: Slot> {
    slot: S,
    key: String,
    contacts: Vec<Contact>,
}

impl<S: Slot> RecordStore<S> {
    pub fn load(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let contacts = match slot.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(entries) => decode_contacts(entries),
                Err(err) => {
                    warn!(key = %key, error = %err, "stored contacts unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = %key, error = %err, "contact slot read failed, starting empty");
                Vec::new()
            }
        };
        debug!(key = %key, count = contacts.len(), "contacts loaded");
        Self {
            slot,
            key,
            contacts,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| &contact.id == id)
    }

    pub fn create(&mut self, now: DateTime<Utc>, input: ContactInput) -> Contact {
        let contact = normalize(now, input);
        self.contacts.insert(0, contact.clone());
        self.persist();
        contact
    }

    /// Returns `None` (and changes nothing) for an unknown id.
    pub fn update(
        &mut self,
        now: DateTime<Utc>,
        id: &ContactId,
        patch: ContactPatch,
    ) -> Option<&Contact> {
        let index = self.position(id)?;
        apply_patch(&mut self.contacts[index], now, patch);
        self.persist();
        Some(&self.contacts[index])
    }

    pub fn remove(&mut self, id: &ContactId) -> Option<Contact> {
        let index = self.position(id)?;
        let removed = self.contacts.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn replace_all(&mut self, records: Vec<Contact>) {
        self.contacts = records;
        self.persist();
    }

    pub fn log_interaction(
        &mut self,
        now: DateTime<Utc>,
        id: &ContactId,
        entry: InteractionEntry,
    ) -> Option<Interaction> {
        let index = self.position(id)?;
        let interaction = apply_interaction(&mut self.contacts[index], now, entry);
        self.persist();
        Some(interaction)
    }

    pub fn view<Tz: TimeZone>(
        &self,
        query: &ViewQuery,
        now: DateTime<Utc>,
        zone: &Tz,
    ) -> Vec<&Contact> {
        view(&self.contacts, query, now, zone)
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.contacts)?)
    }

    /// Replaces the collection when `raw` is a JSON array. Anything else
    /// leaves the collection untouched. Array entries that are not contact
    /// objects are skipped.
    pub fn import_json(&mut self, raw: &str) -> ImportOutcome {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "import is not valid json, ignored");
                return ImportOutcome::Ignored;
            }
        };
        let Value::Array(entries) = value else {
            warn!("import is not a json array, ignored");
            return ImportOutcome::Ignored;
        };
        let records = decode_contacts(entries);
        let count = records.len();
        self.replace_all(records);
        ImportOutcome::Replaced(count)
    }

    fn position(&self, id: &ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| &contact.id == id)
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.contacts) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %self.key, error = %err, "contacts could not be encoded, write dropped");
                return;
            }
        };
        if let Err(err) = self.slot.write(&self.key, &encoded) {
            warn!(key = %self.key, error = %err, "contact slot write failed, write dropped");
        }
    }
}

fn decode_contacts(entries: Vec<Value>) -> Vec<Contact> {
    let total = entries.len();
    let contacts: Vec<Contact> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if contacts.len() < total {
        warn!(
            skipped = total - contacts.len(),
            "entries that are not contacts were skipped"
        );
    }
    contacts
}
