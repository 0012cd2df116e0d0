//! Wire types for the HR backend.
//!
//! Enum values travel as the backend spells them (`Active`, `Annual`, ...);
//! roles are lowercase. Anything unrecognized decodes as `Unknown` rather than
//! failing the whole response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HrRole {
    Admin,
    Hr,
    Manager,
    #[default]
    Employee,
    #[serde(other)]
    Unknown,
}

impl HrRole {
    /// Roles allowed to create, update and delete employees and departments.
    #[must_use]
    pub fn can_manage_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }

    /// Roles allowed to approve or reject leave.
    #[must_use]
    pub fn can_approve_leave(self) -> bool {
        matches!(self, Self::Admin | Self::Hr | Self::Manager)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    Terminated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    Annual,
    Sick,
    Maternity,
    Paternity,
    Personal,
    Emergency,
    Bereavement,
    Study,
    Unpaid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Outcome of a leave review. The backend accepts nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

// =============================================================================
// RECORDS
// =============================================================================

/// Login account. Distinct from the [`Employee`] record it may be linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub role: HrRole,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Employee record. Nested copies (department heads, managers, approvers)
/// are often partial, so every field but `id` tolerates absence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub address: String,
    /// Human-facing staff number such as `EMP0042`.
    pub employee_id: String,
    pub position: String,
    pub department: Department,
    pub hire_date: String,
    pub salary: f64,
    pub status: EmployeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Box<Employee>>,
    pub emergency_contact: String,
    pub emergency_contact_phone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub budget: f64,
    pub goals: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Box<Employee>>,
    pub employee_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub id: u64,
    #[serde(default)]
    pub employee: Employee,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Leave {
    /// Only pending leave can be edited, deleted or reviewed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// Session principal: the account plus its employee record when linked.
/// Also the shape of `GET /auth/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrPrincipal {
    pub user: User,
    #[serde(default)]
    pub employee: Option<Employee>,
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: User,
    #[serde(default)]
    pub employee: Option<Employee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<HrRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// =============================================================================
// MUTATIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: String,
    pub position: String,
    pub department_id: u64,
    pub hire_date: String,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<u64>,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
}

/// Partial update; only set fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateEmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_id: Option<u64>,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub goals: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDepartmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    pub employee_id: u64,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateLeaveRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApproval {
    pub status: ApprovalDecision,
    #[serde(default)]
    pub comments: String,
}

impl LeaveApproval {
    #[must_use]
    pub fn new(status: ApprovalDecision, comments: impl Into<String>) -> Self {
        Self { status, comments: comments.into() }
    }
}

// =============================================================================
// FILTERS AND LISTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeFilter {
    pub page: u32,
    pub limit: u32,
    /// Department id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    /// Matches first name, last name, email or staff number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for EmployeeFilter {
    fn default() -> Self {
        Self { page: 1, limit: 10, department: None, status: None, search: None }
    }
}

/// Departments are not paginated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DepartmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveFilter {
    pub page: u32,
    pub limit: u32,
    /// Employee id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for LeaveFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            employee: None,
            status: None,
            leave_type: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentList {
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypes {
    pub leave_types: Vec<LeaveType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatuses {
    pub leave_statuses: Vec<LeaveStatus>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
