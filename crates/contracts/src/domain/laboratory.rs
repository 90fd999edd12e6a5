use super::{options, ResourceDef, STATUS_VALUES};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "laboratory",
        title: "Laboratory",
        route: "/laboratory",
        endpoint: "/laboratory",
        allowed_roles: &[Role::Admin, Role::Receptionist, Role::Doctor],
        fields: vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::text("doctor", "Referred by"),
            FieldDescriptor::text("testName", "Test"),
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::time("time", "Time"),
            FieldDescriptor::number("discount", "Discount").optional(),
            FieldDescriptor::number("totalAmount", "Total amount"),
            FieldDescriptor::select("status", "Status", options(&STATUS_VALUES)),
            FieldDescriptor::textarea("result", "Result").optional(),
        ],
        search_fields: &["testName"],
        categories: &[],
        print_fields: &[
            "patientId",
            "doctor",
            "testName",
            "date",
            "discount",
            "totalAmount",
            "result",
        ],
    }
}
