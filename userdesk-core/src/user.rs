//! Users as returned by the users API, and the row shape the table shows.

use crate::format::format_date;
use crate::operator::FilterVariant;
use crate::table::{ColumnCatalog, ColumnDef, ColumnOption, TableRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role shown for every user; the API does not carry one.
pub const DEFAULT_ROLE: &str = "User";

/// User id as sent by the API: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the API's `data` array. Unknown fields are ignored;
/// missing and `null` text fields both map to an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub registered_at: Option<String>,
}

/// Body of `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub data: Vec<UserRecord>,
}

/// A user as displayed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub role: String,
    pub created_at: String,
}

impl From<UserRecord> for UserRow {
    fn from(record: UserRecord) -> Self {
        let name = format!(
            "{} {}",
            record.first_name.unwrap_or_default(),
            record.last_name.unwrap_or_default()
        )
        .trim()
        .to_string();
        Self {
            id: record.id.to_string(),
            name,
            email: record.email.unwrap_or_default(),
            mobile: record.mobile.unwrap_or_default(),
            role: DEFAULT_ROLE.to_string(),
            created_at: record.registered_at.unwrap_or_default(),
        }
    }
}

impl ListUsersResponse {
    pub fn into_rows(self) -> Vec<UserRow> {
        self.data.into_iter().map(UserRow::from).collect()
    }
}

impl TableRow for UserRow {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, column_id: &str) -> String {
        match column_id {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "mobile" => self.mobile.clone(),
            "role" => self.role.clone(),
            "createdAt" => format_date(&self.created_at),
            _ => String::new(),
        }
    }

    fn sort_key(&self, column_id: &str) -> String {
        match column_id {
            "createdAt" => self.created_at.clone(),
            _ => self.cell(column_id),
        }
    }
}

/// Columns of the users table.
pub fn users_catalog() -> ColumnCatalog {
    ColumnCatalog::new(vec![
        ColumnDef::new("name", "Name", FilterVariant::Text)
            .with_width(24)
            .with_placeholder("Filter names...")
            .not_hideable(),
        ColumnDef::new("email", "Email", FilterVariant::Text)
            .with_width(30)
            .with_placeholder("Filter emails..."),
        ColumnDef::new("mobile", "Mobile", FilterVariant::Text).with_width(18),
        ColumnDef::new("role", "Role", FilterVariant::Select)
            .with_width(10)
            .with_options(vec![ColumnOption::new(DEFAULT_ROLE, DEFAULT_ROLE)]),
        ColumnDef::new("createdAt", "Created At", FilterVariant::Date).with_width(14),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_maps_to_rows() {
        let body = r#"{"data":[
            {"id":1,"firstName":"Omar","lastName":"Haddad","email":"omar@example.com",
             "mobile":"555-0100","registeredAt":"2023-05-01T10:30:00Z","age":41},
            {"id":"u-2","firstName":"Ana","lastName":"","email":"ana@example.com"}
        ]}"#;
        let response: ListUsersResponse = serde_json::from_str(body).unwrap();
        let rows = response.into_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].name, "Omar Haddad");
        assert_eq!(rows[0].role, DEFAULT_ROLE);
        assert_eq!(rows[0].created_at, "2023-05-01T10:30:00Z");
        assert_eq!(rows[1].id, "u-2");
        assert_eq!(rows[1].name, "Ana");
        assert_eq!(rows[1].mobile, "");
    }

    #[test]
    fn test_null_fields_keep_the_row() {
        let body = r#"{"data":[
            {"id":1,"firstName":"Omar","lastName":"Haddad","email":"omar@example.com","mobile":"555-0100"},
            {"id":2,"firstName":null,"lastName":"Lopez","email":null,"mobile":null,"registeredAt":null}
        ]}"#;
        let rows = serde_json::from_str::<ListUsersResponse>(body)
            .unwrap()
            .into_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mobile, "555-0100");
        assert_eq!(rows[1].name, "Lopez");
        assert_eq!(rows[1].email, "");
        assert_eq!(rows[1].mobile, "");
        assert_eq!(rows[1].created_at, "");
        assert_eq!(rows[1].cell("createdAt"), format_date(""));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(serde_json::from_str::<ListUsersResponse>("{}").is_err());
        assert!(serde_json::from_str::<ListUsersResponse>(r#"{"data":[{"firstName":"x"}]}"#).is_err());
    }

    #[test]
    fn test_cells_and_sort_keys() {
        let row = UserRow {
            id: "1".into(),
            name: "Omar Haddad".into(),
            email: "omar@example.com".into(),
            mobile: "555".into(),
            role: DEFAULT_ROLE.into(),
            created_at: "2023-05-01T10:30:00Z".into(),
        };
        assert_eq!(row.cell("createdAt"), "01 May 2023");
        assert_eq!(row.sort_key("createdAt"), "2023-05-01T10:30:00Z");
        assert_eq!(row.cell("unknown"), "");
    }

    #[test]
    fn test_users_catalog_is_fully_filterable() {
        let catalog = users_catalog();
        assert_eq!(
            catalog.filterable_ids(),
            vec!["name", "email", "mobile", "role", "createdAt"]
        );
        assert!(!catalog.get("name").unwrap().hideable);
    }
}
