use super::{options, ResourceDef};
use crate::shared::form::FieldDescriptor;
use crate::system::auth::Role;

pub const CATEGORIES: [&str; 5] = ["Salary", "Utilities", "Supplies", "Maintenance", "Other"];

pub fn resource() -> ResourceDef {
    ResourceDef {
        key: "expense",
        title: "Expenses",
        route: "/expense",
        endpoint: "/expense",
        allowed_roles: &[Role::Admin],
        fields: vec![
            FieldDescriptor::date("date", "Date"),
            FieldDescriptor::select("category", "Category", options(&CATEGORIES)),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::number("amount", "Amount"),
            FieldDescriptor::select(
                "paymentMethod",
                "Payment method",
                options(&["cash", "card", "bank"]),
            ),
            FieldDescriptor::text("note", "Note").optional(),
        ],
        search_fields: &["description"],
        categories: &CATEGORIES,
        print_fields: &["date", "category", "description", "amount", "paymentMethod"],
    }
}
