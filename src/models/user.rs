//! User model, staff roles, and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Role & permissions
// ---------------------------------------------------------------------------

/// Back-office staff roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    AdminHelper,
    BookingManager,
    OperationsCoordinator,
    Driver,
    Finance,
    Support,
}

/// Permission tags gating API operations. Roles map to permissions through
/// an explicit enumerated table, not through per-route ad-hoc checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadOperations,
    WriteOperations,
    ReadAttendance,
    WriteAttendance,
    ReadUsers,
    ManageFleet,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::AdminHelper => "admin_helper",
            Role::BookingManager => "booking_manager",
            Role::OperationsCoordinator => "operations_coordinator",
            Role::Driver => "driver",
            Role::Finance => "finance",
            Role::Support => "support",
        }
    }

    /// Static role -> permission mapping
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Role::Admin | Role::AdminHelper => &[
                ReadOperations,
                WriteOperations,
                ReadAttendance,
                WriteAttendance,
                ReadUsers,
                ManageFleet,
            ],
            Role::OperationsCoordinator => &[
                ReadOperations,
                WriteOperations,
                ReadAttendance,
                ReadUsers,
                ManageFleet,
            ],
            Role::BookingManager => &[ReadOperations, ReadUsers],
            Role::Driver => &[ReadOperations, ReadAttendance, WriteAttendance],
            Role::Finance => &[ReadOperations, ReadAttendance, ReadUsers],
            Role::Support => &[ReadOperations],
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "admin_helper" => Ok(Role::AdminHelper),
            "booking_manager" => Ok(Role::BookingManager),
            "operations_coordinator" => Ok(Role::OperationsCoordinator),
            "driver" => Ok(Role::Driver),
            "finance" => Ok(Role::Finance),
            "support" => Ok(Role::Support),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Staff account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response with bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// JWT claims
// ---------------------------------------------------------------------------

/// Claims carried in the JWT bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject (user email)
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            self,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<UserClaims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            &jsonwebtoken::Validation::default(),
        )?;
        Ok(data.claims)
    }

    fn require(&self, permission: Permission) -> AppResult<()> {
        if self.role.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role {} lacks permission {:?}",
                self.role, permission
            )))
        }
    }

    pub fn require_read_operations(&self) -> AppResult<()> {
        self.require(Permission::ReadOperations)
    }

    pub fn require_write_operations(&self) -> AppResult<()> {
        self.require(Permission::WriteOperations)
    }

    pub fn require_read_attendance(&self) -> AppResult<()> {
        self.require(Permission::ReadAttendance)
    }

    pub fn require_write_attendance(&self) -> AppResult<()> {
        self.require(Permission::WriteAttendance)
    }

    pub fn require_read_users(&self) -> AppResult<()> {
        self.require(Permission::ReadUsers)
    }

    pub fn require_manage_fleet(&self) -> AppResult<()> {
        self.require(Permission::ManageFleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_permissions() {
        for p in [
            Permission::ReadOperations,
            Permission::WriteOperations,
            Permission::ReadAttendance,
            Permission::WriteAttendance,
            Permission::ReadUsers,
            Permission::ManageFleet,
        ] {
            assert!(Role::Admin.has_permission(p), "admin missing {:?}", p);
        }
    }

    #[test]
    fn support_is_read_only() {
        assert!(Role::Support.has_permission(Permission::ReadOperations));
        assert!(!Role::Support.has_permission(Permission::WriteOperations));
        assert!(!Role::Support.has_permission(Permission::ManageFleet));
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [
            Role::Admin,
            Role::AdminHelper,
            Role::BookingManager,
            Role::OperationsCoordinator,
            Role::Driver,
            Role::Finance,
            Role::Support,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
