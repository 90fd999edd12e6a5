//! Submission state of an open form: values, errors, in-flight flag and the
//! outcome message.

use serde_json::Value;

use super::validation::{validate, ValidationErrors};
use super::{FieldDescriptor, FieldValue, FieldValues};
use crate::shared::api::{create_url, item_url, HttpMethod};
use crate::shared::table::Record;

pub const SAVED_MESSAGE: &str = "Saved successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    fields: Vec<FieldDescriptor>,
    resource: String,
    mode: FormMode,
    values: FieldValues,
    errors: ValidationErrors,
    submitting: bool,
    message: Option<FormMessage>,
}

impl FormController {
    pub fn create(fields: Vec<FieldDescriptor>, resource: &str) -> Self {
        let values = FieldValues::empty_for(&fields);
        Self::with_values(fields, resource, FormMode::Create, values)
    }

    pub fn edit(fields: Vec<FieldDescriptor>, resource: &str, id: &str, record: &Record) -> Self {
        let values = FieldValues::from_record(&fields, record);
        Self::with_values(
            fields,
            resource,
            FormMode::Edit { id: id.to_string() },
            values,
        )
    }

    fn with_values(
        fields: Vec<FieldDescriptor>,
        resource: &str,
        mode: FormMode,
        values: FieldValues,
    ) -> Self {
        Self {
            fields,
            resource: resource.to_string(),
            mode,
            values,
            errors: ValidationErrors::default(),
            submitting: false,
            message: None,
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Stores raw input for `name` and drops that field's error.
    pub fn set_input(&mut self, name: &str, raw: &str) {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            return;
        };
        let value = FieldValue::from_input(field.field_type, raw);
        self.values.set(name, value);
        self.errors.clear_field(name);
    }

    /// Validates and, if clean, marks the form in flight and returns the
    /// request to send. `None` means nothing must be sent: either a request
    /// is already in flight or validation failed.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.submitting {
            return None;
        }
        self.errors = validate(&self.fields, &self.values);
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        self.message = None;

        let (method, url) = match &self.mode {
            FormMode::Create => (HttpMethod::Post, create_url(&self.resource)),
            FormMode::Edit { id } => (HttpMethod::Patch, item_url(&self.resource, id)),
        };
        Some(SubmitRequest {
            method,
            url,
            body: self.values.to_json(&self.fields),
        })
    }

    /// Records the server outcome. On success the values are reset and
    /// `on_saved` runs exactly once; on failure the form keeps its input.
    pub fn complete(&mut self, result: Result<(), String>, on_saved: impl FnOnce()) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.values = FieldValues::empty_for(&self.fields);
                self.errors.clear();
                self.message = Some(FormMessage::Success(SAVED_MESSAGE.to_string()));
                on_saved();
            }
            Err(message) => {
                self.message = Some(FormMessage::Error(message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::FieldOption;
    use serde_json::json;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::select(
                "category",
                "Category",
                vec![FieldOption::same("Salary"), FieldOption::same("Supplies")],
            ),
            FieldDescriptor::number("amount", "Amount"),
            FieldDescriptor::text("note", "Note").optional(),
        ]
    }

    #[test]
    fn test_create_submit_with_optional_empty_succeeds() {
        let mut form = FormController::create(fields(), "/expense");
        form.set_input("date", "2024-03-05");
        form.set_input("category", "Supplies");
        form.set_input("amount", "450");

        let request = form.begin_submit().expect("form is valid");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "/expense/");
        assert_eq!(
            request.body,
            json!({"date": "2024-03-05", "category": "Supplies", "amount": 450.0, "note": ""})
        );
        assert!(form.is_submitting());
        // a second click while in flight sends nothing
        assert!(form.begin_submit().is_none());

        let mut refreshed = 0;
        form.complete(Ok(()), || refreshed += 1);
        assert_eq!(refreshed, 1);
        assert!(!form.is_submitting());
        assert_eq!(
            form.message(),
            Some(&FormMessage::Success(SAVED_MESSAGE.to_string()))
        );
        assert!(form.values().iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_missing_required_field_blocks_request() {
        let mut form = FormController::create(fields(), "/expense");
        form.set_input("date", "2024-03-05");
        form.set_input("category", "Supplies");

        assert!(form.begin_submit().is_none());
        assert!(!form.is_submitting());
        assert_eq!(form.errors().len(), 1);
        assert!(form.errors().contains("amount"));

        form.set_input("amount", "1");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_edit_submits_patch_to_item() {
        let record = json!({"_id": "e7", "date": "2024-01-02T00:00:00Z", "category": "Salary", "amount": 900});
        let mut form = FormController::edit(fields(), "/expense", "e7", record.as_object().unwrap());
        let request = form.begin_submit().expect("prefilled form is valid");
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.url, "/expense/e7");
        assert_eq!(request.body["date"], json!("2024-01-02"));
    }

    #[test]
    fn test_failure_keeps_input_and_reports_message() {
        let mut form = FormController::create(fields(), "/expense");
        form.set_input("date", "2024-03-05");
        form.set_input("category", "Salary");
        form.set_input("amount", "10");
        form.begin_submit().expect("valid");

        let mut refreshed = false;
        form.complete(Err("Duplicate entry".to_string()), || refreshed = true);
        assert!(!refreshed);
        assert_eq!(
            form.message(),
            Some(&FormMessage::Error("Duplicate entry".to_string()))
        );
        assert_eq!(form.values().input_value("amount"), "10");
    }

    #[test]
    fn test_unknown_field_input_is_ignored() {
        let mut form = FormController::create(fields(), "/expense");
        form.set_input("hacker", "x");
        assert!(form.values().get("hacker").is_none());
    }
}
