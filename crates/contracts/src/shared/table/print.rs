//! Print layout for one record or a batch of checked records.

use super::{format_record_cell, record_id, Record};
use crate::shared::form::FieldDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSheet {
    pub record_id: Option<String>,
    pub lines: Vec<PrintLine>,
}

/// Restricts `fields` to `print_fields` (in that order). An empty list
/// prints every field.
pub fn print_fields<'a>(
    fields: &'a [FieldDescriptor],
    print_fields: &[&str],
) -> Vec<&'a FieldDescriptor> {
    if print_fields.is_empty() {
        return fields.iter().collect();
    }
    print_fields
        .iter()
        .filter_map(|name| fields.iter().find(|f| f.name == *name))
        .collect()
}

pub fn build_sheets(
    fields: &[FieldDescriptor],
    selected: &[&str],
    records: &[Record],
) -> Vec<PrintSheet> {
    let fields = print_fields(fields, selected);
    records
        .iter()
        .map(|record| PrintSheet {
            record_id: record_id(record),
            lines: fields
                .iter()
                .map(|field| PrintLine {
                    label: field.label.clone(),
                    value: format_record_cell(field, record).text(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sheets_follow_print_field_order() {
        let fields = vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::number("totalAmount", "Total"),
            FieldDescriptor::text("note", "Note"),
        ];
        let records = vec![
            json!({"_id": "a", "patientId": {"name": "Rahim"}, "totalAmount": 300})
                .as_object()
                .cloned()
                .unwrap(),
            json!({"_id": "b", "totalAmount": "12.5"})
                .as_object()
                .cloned()
                .unwrap(),
        ];

        let sheets = build_sheets(&fields, &["totalAmount", "patientId"], &records);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].record_id.as_deref(), Some("a"));
        assert_eq!(sheets[0].lines[0].label, "Total");
        assert_eq!(sheets[0].lines[0].value, "300.00");
        assert_eq!(sheets[0].lines[1].value, "Rahim");
        assert_eq!(sheets[1].lines[1].value, "N/A");
    }

    #[test]
    fn test_empty_selection_prints_all_fields() {
        let fields = vec![
            FieldDescriptor::text("a", "A"),
            FieldDescriptor::text("b", "B"),
        ];
        assert_eq!(print_fields(&fields, &[]).len(), 2);
        assert_eq!(print_fields(&fields, &["b", "missing"]).len(), 1);
    }
}
