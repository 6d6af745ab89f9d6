//! Conversion between database entities and domain models.

use ems_model::Employee;

use crate::entities::EmployeeRow;

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            phone: row.phone,
            department: row.department,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
