//! REST contract of the clinic backend: endpoint builders, list query,
//! and tolerant parsing of the list/mutation envelopes.

use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::pagination::ListMeta;
use super::table::Record;

pub const AUTH_ME: &str = "/user/me";
pub const AUTH_LOGIN: &str = "/user/login";
pub const AUTH_LOGOUT: &str = "/user/logout";

/// Endpoints a 401 from which must not start the session-expiry flow.
pub const AUTH_EXEMPT: [&str; 3] = [AUTH_ME, AUTH_LOGIN, AUTH_LOGOUT];

pub fn is_auth_exempt(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    AUTH_EXEMPT.iter().any(|exempt| path.ends_with(exempt))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ListQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            search_term: None,
            field_name: None,
            category: None,
        }
    }

    /// Blank terms are dropped so they never reach the query string.
    pub fn with_search(mut self, term: &str, field: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() && !field.is_empty() {
            self.search_term = Some(term.to_string());
            self.field_name = Some(field.to_string());
        }
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        if !category.trim().is_empty() {
            self.category = Some(category.trim().to_string());
        }
        self
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_else(|_| format!("page={}&limit={}", self.page, self.limit))
    }
}

pub fn list_url(resource: &str, query: &ListQuery) -> String {
    format!("{}?{}", resource.trim_end_matches('/'), query.to_query_string())
}

pub fn search_url(resource: &str, term: &str) -> String {
    format!(
        "{}/search/{}",
        resource.trim_end_matches('/'),
        urlencoding::encode(term.trim())
    )
}

pub fn create_url(resource: &str) -> String {
    format!("{}/", resource.trim_end_matches('/'))
}

pub fn item_url(resource: &str, id: &str) -> String {
    format!(
        "{}/{}",
        resource.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// One page of records plus whatever paging metadata the endpoint sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    pub records: Vec<Record>,
    pub meta: ListMeta,
}

impl ListPage {
    /// Accepts both `{data: {results: [..]}, totalPages, results}` and the
    /// search shape `{data: {records: [..], totalPages, results}}`.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let data = value.get("data").unwrap_or(value);

        let rows = data
            .get("results")
            .filter(|v| v.is_array())
            .or_else(|| data.get("records").filter(|v| v.is_array()))
            .or_else(|| value.is_array().then_some(value))
            .ok_or_else(|| ApiError::Parse("list response has no records".to_string()))?;

        let records = rows
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_object().cloned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let total_pages = read_count(value, "totalPages").or_else(|| read_count(data, "totalPages"));
        let results = read_count(value, "results").or_else(|| read_count(data, "results"));

        Ok(Self {
            records,
            meta: ListMeta {
                total_pages,
                results,
            },
        })
    }
}

fn read_count(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Mutation responses come back either bare or wrapped in `{data}`.
pub fn extract_record(value: &Value) -> Option<Record> {
    match value.get("data") {
        Some(Value::Object(inner)) => Some(inner.clone()),
        _ => value.as_object().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_url_with_search_and_category() {
        let query = ListQuery::new(2, 25)
            .with_search("  khan ", "patientName")
            .with_category("Supplies");
        assert_eq!(
            list_url("/expense", &query),
            "/expense?page=2&limit=25&searchTerm=khan&fieldName=patientName&category=Supplies"
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListQuery::new(1, 10).with_search("   ", "name").with_category("");
        assert_eq!(list_url("/income/", &query), "/income?page=1&limit=10");
    }

    #[test]
    fn test_item_and_search_urls() {
        assert_eq!(item_url("/bedroom", "65f0a"), "/bedroom/65f0a");
        assert_eq!(create_url("/bedroom"), "/bedroom/");
        assert_eq!(search_url("/opd", "john doe"), "/opd/search/john%20doe");
    }

    #[test]
    fn test_auth_exempt_matching() {
        assert!(is_auth_exempt("/user/me"));
        assert!(is_auth_exempt("http://localhost:3000/user/login?next=/"));
        assert!(is_auth_exempt("/user/logout/"));
        assert!(!is_auth_exempt("/user/list"));
        assert!(!is_auth_exempt("/expense"));
    }

    #[test]
    fn test_parse_list_shape() {
        let body = json!({
            "data": { "results": [{"_id": "a"}, {"_id": "b"}] },
            "totalPages": 3,
            "results": 27
        });
        let page = ListPage::from_json(&body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.meta.total_pages, Some(3));
        assert_eq!(page.meta.results, Some(27));
    }

    #[test]
    fn test_parse_search_shape() {
        let body = json!({
            "data": { "records": [{"_id": "a"}], "totalPages": 1, "results": 1 }
        });
        let page = ListPage::from_json(&body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.meta.total_pages, Some(1));
    }

    #[test]
    fn test_parse_rejects_missing_records() {
        assert!(ListPage::from_json(&json!({"data": {}})).is_err());
    }

    #[test]
    fn test_extract_record() {
        assert_eq!(
            extract_record(&json!({"data": {"_id": "x"}})).unwrap()["_id"],
            "x"
        );
        assert_eq!(extract_record(&json!({"_id": "y"})).unwrap()["_id"], "y");
        assert!(extract_record(&json!("ok")).is_none());
    }
}
