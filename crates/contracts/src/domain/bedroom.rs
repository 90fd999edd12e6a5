use super::{options, ResourceDef};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "bedroom",
        title: "Bedroom admissions",
        route: "/bedroom",
        endpoint: "/bedroom",
        allowed_roles: &[Role::Admin, Role::Receptionist, Role::Doctor],
        fields: vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::text("bedNumber", "Bed number"),
            FieldDescriptor::select(
                "roomType",
                "Room type",
                options(&["general", "private", "icu"]),
            ),
            FieldDescriptor::date("admissionDate", "Admission date"),
            FieldDescriptor::date("dischargeDate", "Discharge date").optional(),
            FieldDescriptor::number("dailyRate", "Daily rate"),
            FieldDescriptor::number("discount", "Discount").optional(),
            FieldDescriptor::number("totalAmount", "Total amount"),
            FieldDescriptor::select(
                "status",
                "Status",
                options(&["active", "completed", "cancelled"]),
            ),
        ],
        search_fields: &["bedNumber"],
        categories: &[],
        print_fields: &[
            "patientId",
            "bedNumber",
            "roomType",
            "admissionDate",
            "dischargeDate",
            "discount",
            "totalAmount",
        ],
    }
}
