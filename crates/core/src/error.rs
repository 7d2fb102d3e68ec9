use std::collections::BTreeMap;

use crate::types::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// Per-field form errors, keyed by field name.
    #[error("Validation failed for {entity}: {}", describe_fields(.fields))]
    InvalidFields {
        entity: &'static str,
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidFields`] from `validator` output.
    ///
    /// Each field maps to its error messages, falling back to the validator
    /// code (e.g. `"length"`) when no message was attached.
    pub fn from_validation(entity: &'static str, errors: &validator::ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        CoreError::InvalidFields { entity, fields }
    }
}

fn describe_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{field} ({})", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fields_message_lists_each_field() {
        let mut fields = BTreeMap::new();
        fields.insert("mare_name".to_string(), vec!["required".to_string()]);
        fields.insert("quantity".to_string(), vec!["range".to_string()]);
        let err = CoreError::InvalidFields {
            entity: "frozen_embryo",
            fields,
        };
        assert_eq!(
            err.to_string(),
            "Validation failed for frozen_embryo: mare_name (required); quantity (range)"
        );
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "horse",
            id: "HR-1".to_string(),
        };
        assert_eq!(err.to_string(), "Entity not found: horse with id HR-1");
    }
}
