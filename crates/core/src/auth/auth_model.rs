use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::input_format::{deserialize_text, lenient_record};

/// Access level of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Masjid committee account; full access to its own ledger.
    #[serde(alias = "ADMIN")]
    Admin,
    /// Read-only visitor.
    #[default]
    #[serde(alias = "GUEST")]
    Guest,
    /// Platform operator; sees everything, including masjid administration.
    #[serde(alias = "superadmin", alias = "super_admin", alias = "superAdmin")]
    SuperAdmin,
}

/// Screens and endpoint groups that are gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Dashboard,
    Members,
    Payments,
    ImamSalary,
    Imams,
    Income,
    Expenses,
    Reports,
    RecycleBin,
    Profile,
    MosqueAdministration,
}

impl Role {
    pub fn can_view(&self, view: View) -> bool {
        match self {
            Role::SuperAdmin => true,
            Role::Admin => view != View::MosqueAdministration,
            Role::Guest => !matches!(
                view,
                View::RecycleBin | View::Profile | View::MosqueAdministration
            ),
        }
    }

    /// Whether the role may create, change, delete or restore records.
    pub fn can_modify(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
            Role::SuperAdmin => "super-admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account behind a token, as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mosque_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Role,
}

lenient_record!(AuthUser);

/// Unknown or missing roles fall back to [`Role::Guest`].
fn deserialize_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// A token together with the account it was issued for.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    #[serde(alias = "mosque")]
    pub user: AuthUser,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A new masjid account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub mosque_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("mosque_name", &self.mosque_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Profile fields to change; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mosque_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_is_read_only_and_cannot_see_bin() {
        assert!(Role::Guest.can_view(View::Dashboard));
        assert!(Role::Guest.can_view(View::Reports));
        assert!(!Role::Guest.can_view(View::RecycleBin));
        assert!(!Role::Guest.can_view(View::Profile));
        assert!(!Role::Guest.can_modify());
    }

    #[test]
    fn test_admin_and_super_admin() {
        assert!(Role::Admin.can_view(View::RecycleBin));
        assert!(!Role::Admin.can_view(View::MosqueAdministration));
        assert!(Role::Admin.can_modify());
        assert!(Role::SuperAdmin.can_view(View::MosqueAdministration));
        assert!(Role::SuperAdmin.can_modify());
    }

    #[test]
    fn test_role_parsing() {
        let user: AuthUser = serde_json::from_str(
            r#"{"_id": "u1", "email": "office@masjid.org", "role": "superadmin"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::SuperAdmin);

        // Missing role falls back to the least privileged one
        let user: AuthUser = serde_json::from_str(r#"{"id": "u2", "phone": 9876543210}"#).unwrap();
        assert_eq!(user.role, Role::Guest);
        assert_eq!(user.phone.as_deref(), Some("9876543210"));

        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super-admin\"");
    }

    #[test]
    fn test_user_with_null_fields_and_both_ids() {
        let user: AuthUser = serde_json::from_str(
            r#"{"_id": "u1", "id": "u1", "email": null, "mosqueName": null,
                "address": null, "role": "treasurer"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.email.is_none());
        assert!(user.mosque_name.is_none());
        assert_eq!(user.role, Role::Guest);

        let user: AuthUser = serde_json::from_str(r#"{"id": "u2", "role": null}"#).unwrap();
        assert_eq!(user.role, Role::Guest);
    }

    #[test]
    fn test_session_accepts_mosque_key() {
        let session: AuthSession = serde_json::from_str(
            r#"{"token": "t", "mosque": {"_id": "u1", "role": "admin"}}"#,
        )
        .unwrap();
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.role, Role::Admin);
    }

    #[test]
    fn test_secrets_are_not_debug_printed() {
        let credentials = Credentials {
            email: "office@masjid.org".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("office@masjid.org"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            phone: Some("9000000000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "phone": "9000000000" })
        );
    }
}
