//! Field descriptors and value maps behind the schema-driven form modal.

pub mod controller;
pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::date_format::to_input_date;
use super::table::{Record, RefValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Time,
    Select,
    Email,
    Textarea,
}

impl FieldType {
    /// `type` attribute of the rendered `<input>`; textarea and select
    /// render their own elements.
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Text | Self::Textarea | Self::Select => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose label and value are the same string.
    pub fn same(text: &str) -> Self {
        Self::new(text, text)
    }
}

/// One column of a form or table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl FieldDescriptor {
    pub fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            options: Vec::new(),
            required: true,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Date)
    }

    pub fn time(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Time)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Email)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Textarea)
    }

    pub fn select(name: &str, label: &str, options: Vec<FieldOption>) -> Self {
        Self {
            options,
            ..Self::new(name, label, FieldType::Select)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A single input value. Numeric inputs that parse are kept as numbers so
/// the JSON body carries numbers; everything else stays text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    pub fn from_input(field_type: FieldType, raw: &str) -> Self {
        if field_type == FieldType::Number {
            if let Ok(n) = raw.trim().parse::<f64>() {
                if n.is_finite() {
                    return Self::Number(n);
                }
            }
        }
        Self::Text(raw.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Text shown back in the input element.
    pub fn as_input(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Current input values of an open form, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldValues(BTreeMap<String, FieldValue>);

impl FieldValues {
    /// One empty entry per descriptor.
    pub fn empty_for(fields: &[FieldDescriptor]) -> Self {
        Self(
            fields
                .iter()
                .map(|f| (f.name.clone(), FieldValue::default()))
                .collect(),
        )
    }

    /// Prefill for an edit form. Populated references collapse to their id
    /// and dates are cut down to what a date input accepts.
    pub fn from_record(fields: &[FieldDescriptor], record: &Record) -> Self {
        let mut values = Self::empty_for(fields);
        for field in fields {
            let Some(raw) = record.get(&field.name) else {
                continue;
            };
            let value = match (field.field_type, raw) {
                (_, Value::Null) => FieldValue::default(),
                (FieldType::Number, Value::Number(n)) => {
                    n.as_f64().map(FieldValue::Number).unwrap_or_default()
                }
                (FieldType::Number, Value::String(s)) => FieldValue::from_input(FieldType::Number, s),
                (FieldType::Date, Value::String(s)) => {
                    FieldValue::Text(to_input_date(s).unwrap_or_else(|| s.clone()))
                }
                (_, Value::String(s)) => FieldValue::Text(s.clone()),
                (_, Value::Number(n)) => FieldValue::Text(n.to_string()),
                (_, Value::Bool(b)) => FieldValue::Text(b.to_string()),
                (_, other) => match RefValue::from_json(Some(other)) {
                    RefValue::Populated { id: Some(id), .. } | RefValue::RawId(id) => {
                        FieldValue::Text(id)
                    }
                    _ => FieldValue::default(),
                },
            };
            values.0.insert(field.name.clone(), value);
        }
        values
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn input_value(&self, name: &str) -> String {
        self.get(name).map(FieldValue::as_input).unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Request body: every entry, plus `""` for any descriptor without one.
    pub fn to_json(&self, fields: &[FieldDescriptor]) -> Value {
        let mut body = serde_json::Map::new();
        for (name, value) in &self.0 {
            body.insert(name.clone(), value.to_json());
        }
        for field in fields {
            body.entry(field.name.clone())
                .or_insert_with(|| Value::String(String::new()));
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::date("admissionDate", "Admission date"),
            FieldDescriptor::number("dailyRate", "Daily rate"),
            FieldDescriptor::select(
                "status",
                "Status",
                vec![FieldOption::same("active"), FieldOption::same("completed")],
            ),
            FieldDescriptor::textarea("note", "Note").optional(),
        ]
    }

    #[test]
    fn test_empty_for_has_one_entry_per_field() {
        let values = FieldValues::empty_for(&fields());
        assert_eq!(values.iter().count(), 5);
        assert!(values.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_number_input_parses() {
        assert_eq!(
            FieldValue::from_input(FieldType::Number, " 250 "),
            FieldValue::Number(250.0)
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Number, "abc"),
            FieldValue::Text("abc".into())
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Text, "250"),
            FieldValue::Text("250".into())
        );
    }

    #[test]
    fn test_from_record_prefills_edit_form() {
        let record = json!({
            "_id": "r1",
            "patientId": {"_id": "p9", "name": "Rahim"},
            "admissionDate": "2024-03-05T10:30:00.000Z",
            "dailyRate": 1200,
            "status": "active"
        });
        let values = FieldValues::from_record(&fields(), record.as_object().unwrap());
        assert_eq!(values.input_value("patientId"), "p9");
        assert_eq!(values.input_value("admissionDate"), "2024-03-05");
        assert_eq!(values.get("dailyRate"), Some(&FieldValue::Number(1200.0)));
        assert_eq!(values.input_value("status"), "active");
        assert_eq!(values.input_value("note"), "");
    }

    #[test]
    fn test_to_json_fills_missing_keys() {
        let mut values = FieldValues::default();
        values.set("dailyRate", FieldValue::Number(99.5));
        let body = values.to_json(&fields());
        assert_eq!(body["dailyRate"], json!(99.5));
        assert_eq!(body["patientId"], json!(""));
        assert_eq!(body.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_descriptor_serde_defaults_required() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name":"amount","label":"Amount","type":"number"}"#).unwrap();
        assert!(field.required);
        assert_eq!(field.field_type, FieldType::Number);
    }
}
