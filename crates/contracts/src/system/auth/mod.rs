use serde::{Deserialize, Serialize};

/// Roles the clinic backend hands out. The set is closed: any other role
/// string coming from the server is treated as "no role" and denied everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Pharmacist,
    Receptionist,
    Doctor,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Pharmacist,
        Role::Receptionist,
        Role::Doctor,
    ];

    pub fn parse(raw: &str) -> Option<Role> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Pharmacist => "pharmacist",
            Self::Receptionist => "receptionist",
            Self::Doctor => "doctor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Pharmacist => "Pharmacist",
            Self::Receptionist => "Receptionist",
            Self::Doctor => "Doctor",
        }
    }
}

/// Current user as returned by `GET /user/me` and `POST /user/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(alias = "_id")]
    pub id: String,
    /// Raw role string; use [`UserInfo::role`] for the checked value.
    #[serde(rename = "role")]
    pub role_raw: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role_raw)
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The backend is inconsistent about wrapping the user object, so every
/// known envelope is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Data { data: UserInfo },
    User { user: UserInfo },
    DataUser { data: UserHolder },
    Bare(UserInfo),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserHolder {
    pub user: UserInfo,
}

impl UserEnvelope {
    pub fn into_user(self) -> UserInfo {
        match self {
            Self::Data { data } => data,
            Self::User { user } => user,
            Self::DataUser { data } => data.user,
            Self::Bare(user) => user,
        }
    }
}

/// Pure membership test. `None` (unknown role) is never allowed.
pub fn is_allowed(role: Option<Role>, allowed: &[Role]) -> bool {
    match role {
        Some(role) => allowed.contains(&role),
        None => false,
    }
}

/// What a protected route should render for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Loading,
    RedirectToLogin,
    RedirectToNotAuthorized,
    Render,
}

pub const LOGIN_PATH: &str = "/login";
pub const NOT_AUTHORIZED_PATH: &str = "/not-authorized";

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            role_raw: role.into(),
            name: None,
            first_name: Some("Amina".into()),
            last_name: Some("Rahman".into()),
            email: None,
        }
    }

    #[test]
    fn test_role_parse_is_closed() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" Doctor "), Some(Role::Doctor));
        assert_eq!(Role::parse("nurse"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_is_allowed() {
        assert!(is_allowed(Some(Role::Admin), &[Role::Admin]));
        assert!(!is_allowed(Some(Role::Doctor), &[Role::Admin]));
        assert!(!is_allowed(None, &Role::ALL));
    }

    #[test]
    fn test_unknown_role_user_is_denied() {
        let u = user("superuser");
        assert_eq!(u.role(), None);
        assert!(!is_allowed(u.role(), &Role::ALL));
    }

    #[test]
    fn test_user_envelopes() {
        let bare = r#"{"_id":"1","role":"doctor","name":"Dr. Khan"}"#;
        let wrapped = r#"{"data":{"id":"1","role":"doctor"}}"#;
        let nested = r#"{"data":{"user":{"id":"1","role":"pharmacist"}}}"#;

        let u: UserEnvelope = serde_json::from_str(bare).unwrap();
        assert_eq!(u.into_user().display_name(), "Dr. Khan");
        let u: UserEnvelope = serde_json::from_str(wrapped).unwrap();
        assert_eq!(u.into_user().role(), Some(Role::Doctor));
        let u: UserEnvelope = serde_json::from_str(nested).unwrap();
        assert_eq!(u.into_user().role(), Some(Role::Pharmacist));
    }

    #[test]
    fn test_display_name_falls_back_to_first_last() {
        assert_eq!(user("admin").display_name(), "Amina Rahman");
    }
}
