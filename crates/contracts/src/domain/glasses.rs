use super::{options, ResourceDef};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "glasses",
        title: "Glasses orders",
        route: "/glasses",
        endpoint: "/glasses",
        allowed_roles: &[Role::Admin, Role::Receptionist, Role::Pharmacist],
        fields: vec![
            FieldDescriptor::text("patientId", "Patient"),
            FieldDescriptor::select(
                "frameType",
                "Frame",
                options(&["full-rim", "half-rim", "rimless"]),
            ),
            FieldDescriptor::select(
                "lensType",
                "Lens",
                options(&["single vision", "bifocal", "progressive"]),
            ),
            FieldDescriptor::text("prescription", "Prescription").optional(),
            FieldDescriptor::date("date", "Order date"),
            FieldDescriptor::date("deliveryDate", "Delivery date").optional(),
            FieldDescriptor::number("discount", "Discount").optional(),
            FieldDescriptor::number("totalAmount", "Total amount"),
            FieldDescriptor::select("status", "Status", options(&["pending", "completed"])),
        ],
        search_fields: &["prescription"],
        categories: &[],
        print_fields: &[
            "patientId",
            "frameType",
            "lensType",
            "prescription",
            "deliveryDate",
            "totalAmount",
        ],
    }
}
