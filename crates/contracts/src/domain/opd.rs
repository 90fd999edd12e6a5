use super::{options, ResourceDef, STATUS_VALUES};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "opd",
        title: "OPD visits",
        route: "/opd",
        endpoint: "/opd",
        allowed_roles: &[Role::Admin, Role::Receptionist, Role::Doctor],
        fields: vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::text("doctor", "Doctor"),
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::time("time", "Time"),
            FieldDescriptor::textarea("visitReason", "Reason for visit"),
            FieldDescriptor::number("discount", "Discount").optional(),
            FieldDescriptor::number("totalAmount", "Fee"),
            FieldDescriptor::select("status", "Status", options(&STATUS_VALUES)),
        ],
        search_fields: &["visitReason"],
        categories: &[],
        print_fields: &["patientId", "doctor", "date", "time", "discount", "totalAmount"],
    }
}
