#![allow(dead_code)]

use aulasegura_table::{ColumnConfig, Paginated, PaginationMeta};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: u32,
    pub subject_code: String,
    pub name: String,
    pub department: Department,
    pub is_active: bool,
}

/// Five users as the users endpoint returns them: unsorted, mixed case.
pub fn users_page() -> Paginated<User> {
    serde_json::from_value(json!({
        "data": [
            {"userId": "u1", "name": "Bob", "lastname": "Martín", "email": "bob@school.es", "roles": ["teacher"],
             "department": {"departmentId": 2, "name": "Matemáticas"}},
            {"userId": "u2", "name": "alice", "lastname": "Álvarez", "email": "alice@school.es", "roles": ["admin"],
             "department": {"departmentId": 1, "name": "Física"}},
            {"userId": "u3", "name": "Carol", "lastname": "Zamora", "email": "carol@school.es", "roles": ["janitor"],
             "department": null},
            {"userId": "u4", "name": "dave", "lastname": "Écija", "email": "dave@school.es", "roles": ["teacher"],
             "department": {"departmentId": 2, "name": "Matemáticas"}},
            {"userId": "u5", "name": "Eve", "lastname": "Benítez", "email": "eve@school.es", "roles": ["support_staff"],
             "department": {"departmentId": 3, "name": "Biología"}}
        ],
        "meta": {"total": 23, "page": 2, "limit": 5, "totalPages": 5, "hasPrevious": true, "hasNext": true}
    }))
    .expect("fixture must deserialize")
}

pub fn user_columns() -> Vec<ColumnConfig<User>> {
    vec![
        ColumnConfig::new("name", "Name").flex(1.0).sort_by_field("name"),
        ColumnConfig::new("lastname", "Last name").flex(1.0).sort_by_field("lastname"),
        ColumnConfig::new("department", "Department")
            .flex(0.8)
            .sort_by_field("department.name"),
        ColumnConfig::new("roles", "Roles").flex(0.7).sort_by(|u: &User| u.roles.len() as u32),
        ColumnConfig::new("actions", "Actions").flex(0.27).unsortable(),
    ]
}

pub fn subjects() -> Vec<Subject> {
    serde_json::from_value(json!([
        {"subjectId": 1, "subjectCode": "MAT1", "name": "Matemáticas I", "isActive": true,
         "department": {"departmentId": 2, "name": "Matemáticas"}},
        {"subjectId": 2, "subjectCode": "FIS1", "name": "Física I", "isActive": false,
         "department": {"departmentId": 1, "name": "Física"}},
        {"subjectId": 3, "subjectCode": "BIO1", "name": "Biología", "isActive": true,
         "department": {"departmentId": 3, "name": "Biología"}},
        {"subjectId": 4, "subjectCode": "MAT2", "name": "Matemáticas II", "isActive": false,
         "department": {"departmentId": 2, "name": "Matemáticas"}}
    ]))
    .expect("fixture must deserialize")
}

pub fn subject_columns() -> Vec<ColumnConfig<Subject>> {
    vec![
        ColumnConfig::new("subjectCode", "Code").flex(0.5).sort_by_field("subjectCode"),
        ColumnConfig::new("name", "Name").flex(1.2).sort_by_field("name"),
        ColumnConfig::new("department", "Department")
            .flex(0.7)
            .sort_by(|s: &Subject| s.department.name.clone()),
        ColumnConfig::new("courses", "Courses").flex(1.2).unsortable(),
        ColumnConfig::new("isActive", "Status").flex(0.4).sort_by(|s: &Subject| s.is_active),
        ColumnConfig::new("actions", "Actions").flex(0.27).unsortable(),
    ]
}

pub fn meta(page: u64, total_pages: u64, limit: u64) -> PaginationMeta {
    PaginationMeta {
        total: total_pages * limit,
        page,
        limit,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

/// Route library logs to the test writer. Set `RUST_LOG=aulasegura_table=trace`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
