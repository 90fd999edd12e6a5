//! Display formatting for generic data table cells.

pub mod print;

use serde_json::{Map, Value};

use super::date_format::format_short_date;
use super::form::{FieldDescriptor, FieldType};
use super::number_format::{format_money, format_percent};

/// Opaque backend row.
pub type Record = Map<String, Value>;

pub const PLACEHOLDER: &str = "N/A";

/// `_id`, falling back to `id`; strings and numbers both count.
pub fn record_id(record: &Record) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match record.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A field that may hold a populated document or just its id, depending on
/// how the backend populated the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    Populated {
        id: Option<String>,
        name: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    },
    RawId(String),
    Missing,
}

impl RefValue {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(obj)) => {
                let text = |key: &str| {
                    obj.get(key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                Self::Populated {
                    id: record_id(obj),
                    name: text("name"),
                    first_name: text("firstName"),
                    last_name: text("lastName"),
                }
            }
            Some(Value::String(s)) if !s.trim().is_empty() => Self::RawId(s.clone()),
            Some(Value::Number(n)) => Self::RawId(n.to_string()),
            _ => Self::Missing,
        }
    }

    /// `name`, else `firstName lastName`.
    pub fn person_name(&self) -> Option<String> {
        match self {
            Self::Populated {
                name,
                first_name,
                last_name,
                ..
            } => name.clone().or_else(|| {
                let full = [first_name.as_deref(), last_name.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                (!full.is_empty()).then_some(full)
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<String> {
        match self {
            Self::Populated { name, .. } => name.clone(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
    Danger,
    Neutral,
    Default,
}

impl StatusTone {
    pub fn for_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "completed" | "active" => Self::Success,
            "pending" => Self::Warning,
            "cancelled" => Self::Danger,
            "inactive" => Self::Neutral,
            _ => Self::Default,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "badge badge--success",
            Self::Warning => "badge badge--warning",
            Self::Danger => "badge badge--error",
            Self::Neutral => "badge badge--neutral",
            Self::Default => "badge badge--primary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDisplay {
    Placeholder,
    Text(String),
    Percent(String),
    Money(String),
    Status { label: String, tone: StatusTone },
}

impl CellDisplay {
    pub fn text(&self) -> String {
        match self {
            Self::Placeholder => PLACEHOLDER.to_string(),
            Self::Text(s) | Self::Percent(s) | Self::Money(s) => s.clone(),
            Self::Status { label, .. } => label.clone(),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Value::Object(_) => RefValue::from_json(Some(value)).name(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(raw_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null => None,
    }
}

/// Formats one cell. The rules form an ordered chain in which a later rule
/// overrides an earlier one, so they are tried here from last to first.
pub fn format_cell(field: &FieldDescriptor, value: Option<&Value>) -> CellDisplay {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return CellDisplay::Placeholder,
    };
    let name = field.name.as_str();

    if matches!(name, "type" | "category") && value.is_object() {
        return RefValue::from_json(Some(value))
            .name()
            .map(CellDisplay::Text)
            .unwrap_or(CellDisplay::Placeholder);
    }
    if name == "status" {
        let label = raw_text(value).unwrap_or_default();
        return CellDisplay::Status {
            tone: StatusTone::for_status(&label),
            label,
        };
    }
    if name == "totalAmount" {
        if let Some(n) = as_number(value) {
            return CellDisplay::Money(format_money(n));
        }
    }
    if matches!(name, "discount" | "percentage") {
        if let Some(n) = as_number(value) {
            return CellDisplay::Percent(format_percent(n));
        }
    }
    if matches!(name, "patientId" | "doctor") && value.is_object() {
        return RefValue::from_json(Some(value))
            .person_name()
            .map(CellDisplay::Text)
            .unwrap_or(CellDisplay::Placeholder);
    }
    if field.field_type == FieldType::Date {
        if let Some(formatted) = value.as_str().and_then(format_short_date) {
            return CellDisplay::Text(formatted);
        }
    }
    raw_text(value)
        .filter(|s| !s.is_empty())
        .map(CellDisplay::Text)
        .unwrap_or(CellDisplay::Placeholder)
}

pub fn format_record_cell(field: &FieldDescriptor, record: &Record) -> CellDisplay {
    format_cell(field, record.get(&field.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(field: FieldDescriptor, value: Value) -> CellDisplay {
        format_cell(&field, Some(&value))
    }

    #[test]
    fn test_discount_renders_percent() {
        let display = cell(FieldDescriptor::number("discount", "Discount"), json!(15));
        assert_eq!(display, CellDisplay::Percent("15%".into()));
        assert_eq!(display.text(), "15%");
    }

    #[test]
    fn test_total_amount_renders_two_decimals() {
        let display = cell(FieldDescriptor::number("totalAmount", "Total"), json!(19.5));
        assert_eq!(display.text(), "19.50");
    }

    #[test]
    fn test_date_renders_short_date() {
        let display = cell(
            FieldDescriptor::date("date", "Date"),
            json!("2024-03-05T00:00:00Z"),
        );
        assert_eq!(display.text(), "Mar 5, 2024");
    }

    #[test]
    fn test_blank_values_render_placeholder() {
        let field = FieldDescriptor::text("note", "Note");
        assert_eq!(format_cell(&field, None), CellDisplay::Placeholder);
        assert_eq!(cell(field.clone(), Value::Null), CellDisplay::Placeholder);
        assert_eq!(cell(field, json!("  ")).text(), PLACEHOLDER);
    }

    #[test]
    fn test_populated_patient_and_doctor() {
        let patient = FieldDescriptor::text("patientId", "Patient");
        assert_eq!(
            cell(patient.clone(), json!({"_id": "p1", "name": "Rahim Uddin"})).text(),
            "Rahim Uddin"
        );
        assert_eq!(
            cell(
                FieldDescriptor::text("doctor", "Doctor"),
                json!({"firstName": "Nadia", "lastName": "Islam"})
            )
            .text(),
            "Nadia Islam"
        );
        assert_eq!(cell(patient.clone(), json!({"_id": "p1"})), CellDisplay::Placeholder);
        // unpopulated reference falls through to the raw id
        assert_eq!(cell(patient, json!("65f0c2")).text(), "65f0c2");
    }

    #[test]
    fn test_status_badges() {
        let field = FieldDescriptor::text("status", "Status");
        assert_eq!(
            cell(field.clone(), json!("Completed")),
            CellDisplay::Status {
                label: "Completed".into(),
                tone: StatusTone::Success
            }
        );
        match cell(field, json!("on hold")) {
            CellDisplay::Status { tone, .. } => assert_eq!(tone, StatusTone::Default),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_category_object_uses_name() {
        let field = FieldDescriptor::text("category", "Category");
        assert_eq!(cell(field, json!({"_id": "c1", "name": "Utilities"})).text(), "Utilities");
    }

    #[test]
    fn test_later_rule_wins() {
        // a date-typed status column is still a status badge
        let field = FieldDescriptor::date("status", "Status");
        assert!(matches!(cell(field, json!("pending")), CellDisplay::Status { .. }));
    }

    #[test]
    fn test_default_object_uses_name() {
        let field = FieldDescriptor::text("ward", "Ward");
        assert_eq!(cell(field.clone(), json!({"name": "Ward B"})).text(), "Ward B");
        assert_eq!(cell(field, json!(true)).text(), "Yes");
    }

    #[test]
    fn test_record_id() {
        let rec = json!({"_id": "abc"});
        assert_eq!(record_id(rec.as_object().unwrap()).as_deref(), Some("abc"));
        let rec = json!({"id": 42});
        assert_eq!(record_id(rec.as_object().unwrap()).as_deref(), Some("42"));
        let rec = json!({"name": "x"});
        assert_eq!(record_id(rec.as_object().unwrap()), None);
    }
}
