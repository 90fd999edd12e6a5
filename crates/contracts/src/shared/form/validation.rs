//! Per-field validation. Each field is checked on its own; there are no
//! cross-field rules.

use std::collections::BTreeMap;

use super::{FieldDescriptor, FieldType, FieldValue, FieldValues};

/// Field name -> message. Keys are always descriptor names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Called as the user edits a field.
    pub fn clear_field(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn is_blank(field_type: FieldType, value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(s)) => s.trim().is_empty(),
        Some(FieldValue::Number(n)) => {
            matches!(field_type, FieldType::Date | FieldType::Time | FieldType::Select) && *n == 0.0
        }
    }
}

/// Returns the message for a failing field, `None` when it passes.
///
/// Optional fields may be left blank; anything entered still has to pass
/// the type rules.
pub fn validate_field(field: &FieldDescriptor, value: Option<&FieldValue>) -> Option<String> {
    let failed = if is_blank(field.field_type, value) {
        field.required
    } else {
        match (field.field_type, value) {
            (FieldType::Number, Some(FieldValue::Number(n))) => !n.is_finite() || *n < 0.0,
            (FieldType::Number, Some(FieldValue::Text(s))) => match s.trim().parse::<f64>() {
                Ok(n) => !n.is_finite() || n < 0.0,
                Err(_) => true,
            },
            _ => false,
        }
    };
    if !failed {
        return None;
    }
    Some(match field.field_type {
        FieldType::Number => format!("{} must be a non-negative number", field.label),
        FieldType::Select => format!("Please select {}", field.label),
        _ => format!("{} is required", field.label),
    })
}

/// Recomputes the whole error map for a submit attempt.
pub fn validate(fields: &[FieldDescriptor], values: &FieldValues) -> ValidationErrors {
    ValidationErrors(
        fields
            .iter()
            .filter_map(|field| {
                validate_field(field, values.get(&field.name))
                    .map(|message| (field.name.clone(), message))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::super::FieldOption;
    use super::*;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::email("email", "Email"),
            FieldDescriptor::number("amount", "Amount"),
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::time("time", "Time"),
            FieldDescriptor::select("category", "Category", vec![FieldOption::same("Supplies")]),
            FieldDescriptor::textarea("note", "Note").optional(),
        ]
    }

    fn filled() -> FieldValues {
        let mut values = FieldValues::empty_for(&fields());
        values.set("description", FieldValue::Text("Gauze".into()));
        values.set("email", FieldValue::Text("ops@clinic.test".into()));
        values.set("amount", FieldValue::Number(0.0));
        values.set("date", FieldValue::Text("2024-03-05".into()));
        values.set("time", FieldValue::Text("09:30".into()));
        values.set("category", FieldValue::Text("Supplies".into()));
        values
    }

    #[test]
    fn test_empty_values_fail_exactly_the_required_fields() {
        let errors = validate(&fields(), &FieldValues::empty_for(&fields()));
        let failed: Vec<&str> = errors.fields().collect();
        assert_eq!(
            failed,
            vec!["amount", "category", "date", "description", "email", "time"]
        );
        assert!(!errors.contains("note"));
    }

    #[test]
    fn test_missing_map_is_treated_as_empty() {
        let errors = validate(&fields(), &FieldValues::default());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_valid_values_pass() {
        assert!(validate(&fields(), &filled()).is_empty());
    }

    #[test]
    fn test_whitespace_text_fails() {
        let mut values = filled();
        values.set("description", FieldValue::Text("   ".into()));
        let errors = validate(&fields(), &values);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[test]
    fn test_number_rules() {
        let field = FieldDescriptor::number("amount", "Amount");
        assert!(validate_field(&field, Some(&FieldValue::Number(-1.0))).is_some());
        assert!(validate_field(&field, Some(&FieldValue::Text("12x".into()))).is_some());
        assert!(validate_field(&field, Some(&FieldValue::Text("".into()))).is_some());
        assert!(validate_field(&field, Some(&FieldValue::Text("12.5".into()))).is_none());
        assert!(validate_field(&field, Some(&FieldValue::Number(0.0))).is_none());
    }

    #[test]
    fn test_optional_number_may_be_blank_but_not_garbage() {
        let field = FieldDescriptor::number("discount", "Discount").optional();
        assert!(validate_field(&field, None).is_none());
        assert!(validate_field(&field, Some(&FieldValue::Text("  ".into()))).is_none());
        assert!(validate_field(&field, Some(&FieldValue::Text("10".into()))).is_none());
        assert_eq!(
            validate_field(&field, Some(&FieldValue::Text("abc".into()))).as_deref(),
            Some("Discount must be a non-negative number")
        );
        assert!(validate_field(&field, Some(&FieldValue::Number(-5.0))).is_some());
    }

    #[test]
    fn test_clear_field() {
        let mut errors = validate(&fields(), &FieldValues::default());
        errors.clear_field("amount");
        assert!(!errors.contains("amount"));
        assert_eq!(errors.len(), 5);
    }
}
