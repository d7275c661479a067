//! Employee/contract lookup port.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Employee;

/// Read-only view of the HR system's employees and contracts.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by ID.
    fn find_employee(&self, employee_id: &str) -> Option<Employee>;

    /// Resolves which employee holds a contract.
    fn employee_for_contract(&self, contract_id: &str) -> Option<String>;
}

/// Directory backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: Arc<RwLock<HashMap<String, Employee>>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert(&self, employee: Employee) {
        self.employees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(employee.id.clone(), employee);
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find_employee(&self, employee_id: &str) -> Option<Employee> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(employee_id)
            .cloned()
    }

    fn employee_for_contract(&self, contract_id: &str) -> Option<String> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|e| e.holds_contract(contract_id))
            .map(|e| e.id.clone())
    }
}
