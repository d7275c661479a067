//! Employee model.
//!
//! Employees and their contracts are owned by an external HR system; the
//! engine only needs enough of them to resolve who a shift belongs to.

use serde::{Deserialize, Serialize};

/// Represents an employee as seen by the timeclock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contracts held by the employee.
    #[serde(default)]
    pub contract_ids: Vec<String>,
}

impl Employee {
    /// Returns true if the employee holds the given contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_timeclock::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana".to_string(),
    ///     contract_ids: vec!["contract_001".to_string()],
    /// };
    /// assert!(employee.holds_contract("contract_001"));
    /// assert!(!employee.holds_contract("contract_002"));
    /// ```
    pub fn holds_contract(&self, contract_id: &str) -> bool {
        self.contract_ids.iter().any(|c| c == contract_id)
    }
}
