//! Department resources: the field schema, endpoint and role set that a
//! generic CRUD page needs to serve one backend collection.

pub mod bedroom;
pub mod expense;
pub mod glasses;
pub mod income;
pub mod laboratory;
pub mod opd;

use crate::shared::form::{FieldDescriptor, FieldOption};
use crate::system::auth::Role;

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDef {
    /// Stable key, also used in DOM ids.
    pub key: &'static str,
    pub title: &'static str,
    /// Client route, e.g. `/expense`.
    pub route: &'static str,
    /// REST collection path relative to `BASE_URL`.
    pub endpoint: &'static str,
    pub allowed_roles: &'static [Role],
    pub fields: Vec<FieldDescriptor>,
    /// Fields the search box can target; empty disables search.
    pub search_fields: &'static [&'static str],
    /// Values for the `category` filter; empty disables it.
    pub categories: &'static [&'static str],
    /// Fields shown on the printout; empty prints every field.
    pub print_fields: &'static [&'static str],
}

impl ResourceDef {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Label/value pairs for the search field picker.
    pub fn search_options(&self) -> Vec<FieldOption> {
        self.search_fields
            .iter()
            .filter_map(|name| self.field(name))
            .map(|f| FieldOption::new(f.label.clone(), f.name.clone()))
            .collect()
    }
}

pub(crate) fn options(values: &[&str]) -> Vec<FieldOption> {
    values.iter().map(|v| FieldOption::same(v)).collect()
}

pub const STATUS_VALUES: [&str; 3] = ["pending", "completed", "cancelled"];

pub fn all() -> Vec<ResourceDef> {
    vec![
        opd::resource(),
        laboratory::resource(),
        bedroom::resource(),
        glasses::resource(),
        income::resource(),
        expense::resource(),
    ]
}

pub fn find(key: &str) -> Option<ResourceDef> {
    all().into_iter().find(|r| r.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::FieldType;
    use std::collections::HashSet;

    #[test]
    fn test_resource_keys_and_routes_are_unique() {
        let resources = all();
        let keys: HashSet<_> = resources.iter().map(|r| r.key).collect();
        let routes: HashSet<_> = resources.iter().map(|r| r.route).collect();
        assert_eq!(keys.len(), resources.len());
        assert_eq!(routes.len(), resources.len());
    }

    #[test]
    fn test_schemas_are_consistent() {
        for resource in all() {
            let names: HashSet<_> = resource.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names.len(), resource.fields.len(), "{}", resource.key);
            assert!(!resource.allowed_roles.is_empty(), "{}", resource.key);
            for name in resource.search_fields.iter().chain(resource.print_fields) {
                assert!(names.contains(name), "{} lacks {}", resource.key, name);
            }
            for field in &resource.fields {
                if field.field_type == FieldType::Select {
                    assert!(!field.options.is_empty(), "{}.{}", resource.key, field.name);
                }
            }
        }
    }

    #[test]
    fn test_admin_reaches_every_department() {
        assert!(all()
            .iter()
            .all(|r| r.allowed_roles.contains(&Role::Admin)));
    }

    #[test]
    fn test_find() {
        assert_eq!(find("expense").map(|r| r.endpoint), Some("/expense"));
        assert!(find("pharmacy-x").is_none());
    }
}
