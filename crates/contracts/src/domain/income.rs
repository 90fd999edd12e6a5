use super::{options, ResourceDef};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub const CATEGORIES: [&str; 6] = [
    "Consultation",
    "Pharmacy",
    "Laboratory",
    "Bedroom",
    "Glasses",
    "Other",
];

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "income",
        title: "Income",
        route: "/income",
        endpoint: "/income",
        allowed_roles: &[Role::Admin, Role::Receptionist],
        fields: vec![
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::select("category", "Category", options(&CATEGORIES)),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::number("amount", "Amount"),
            FieldDescriptor::text("receivedBy", "Received by").optional(),
        ],
        search_fields: &["description", "receivedBy"],
        categories: &CATEGORIES,
        print_fields: &[],
    }
}
