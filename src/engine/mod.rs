//! The payroll engine.
//!
//! [`PayrollEngine`] ties the employee registry, the current payslip of each
//! employee and the configured rate tables together. It is the single entry
//! point for every operation exposed over HTTP and on the command line.
//!
//! # Example
//!
//! ```
//! use paysphere::config::PayrollConfig;
//! use paysphere::engine::PayrollEngine;
//! use paysphere::models::{NewEmployee, PayslipInput};
//! use rust_decimal::Decimal;
//!
//! let mut engine = PayrollEngine::new(PayrollConfig::default());
//! let id = engine
//!     .create_employee(&NewEmployee {
//!         department_code: "IT".to_string(),
//!         classification_code: "P".to_string(),
//!         name: "Liam Thompson".to_string(),
//!         job_title: "Data Analyst".to_string(),
//!         email: "liam.thompson@example.com".to_string(),
//!         phone: "9123456788".to_string(),
//!         department: "Information Technology".to_string(),
//!         manager_name: "Jane Doe".to_string(),
//!         hire_date: "2022-05-10".to_string(),
//!         birth_date: "1996-07-30".to_string(),
//!     })
//!     .unwrap();
//!
//! let input = PayslipInput {
//!     hours_worked: Decimal::from(10),
//!     overtime_hours: Decimal::from(2),
//!     ..PayslipInput::default()
//! };
//! let payslip = engine.create_payslip(&id.to_string(), &input).unwrap();
//! assert_eq!(payslip.basic_pay, Decimal::from(585));
//! ```

mod allocator;
mod ledger;
mod registry;

pub use allocator::IdentifierAllocator;
pub use ledger::IdMap;
pub use registry::EmployeeRegistry;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calculation::{aggregate, build_report, calculate_payslip};
use crate::config::{PayrollConfig, RosterEntry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeId, EmployeeUpdate, NewEmployee, PayrollReport, PayrollTotals, Payslip,
    PayslipInput,
};
use crate::store::{NullStore, PayrollStore, Snapshot};

/// Owns all payroll state for one company.
#[derive(Debug)]
pub struct PayrollEngine {
    config: PayrollConfig,
    registry: EmployeeRegistry,
    payslips: IdMap<Payslip>,
    store: Box<dyn PayrollStore>,
}

impl PayrollEngine {
    /// Creates an empty engine that persists nothing.
    pub fn new(config: PayrollConfig) -> Self {
        Self::with_store(config, Box::new(NullStore))
    }

    /// Creates an empty engine that reports mutations to `store`.
    pub fn with_store(config: PayrollConfig, store: Box<dyn PayrollStore>) -> Self {
        Self {
            config,
            registry: EmployeeRegistry::new(),
            payslips: IdMap::new(),
            store,
        }
    }

    /// Rebuilds an engine from persisted state.
    ///
    /// Payslips whose employee is missing from the snapshot are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if two stored employees share a sequence.
    pub fn restore(
        config: PayrollConfig,
        snapshot: Snapshot,
        store: Box<dyn PayrollStore>,
    ) -> EngineResult<Self> {
        let mut engine = Self::with_store(config, store);
        for employee in snapshot.employees {
            engine.registry.restore(employee)?;
        }
        engine.registry.retire_below(snapshot.next_sequence);

        for payslip in snapshot.payslips {
            if engine.registry.contains(&payslip.employee_id) {
                engine.payslips.insert(payslip.employee_id, payslip);
            } else {
                warn!(employee_id = %payslip.employee_id, "Dropping payslip of unknown employee");
            }
        }

        info!(
            employees = engine.registry.len(),
            payslips = engine.payslips.len(),
            "Restored payroll state"
        );
        Ok(engine)
    }

    /// Registers predefined employees, returning how many were added.
    ///
    /// Entries that fail validation or collide are skipped with a warning.
    /// An entry carrying payslip inputs also gets its first payslip computed.
    pub fn seed_roster(&mut self, roster: &[RosterEntry]) -> usize {
        let mut seeded = 0;
        for entry in roster {
            let id = match self.create_employee_with_id(&entry.id, &entry.fields) {
                Ok(id) => id,
                Err(e) => {
                    warn!(id = %entry.id, error = %e, "Skipping roster entry");
                    continue;
                }
            };
            seeded += 1;

            if let Some(input) = &entry.payslip {
                if let Err(e) = self.create_payslip(&id.to_string(), input) {
                    warn!(employee_id = %id, error = %e, "Skipping roster payslip");
                }
            }
        }
        seeded
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the identifier allocator.
    pub fn allocator(&self) -> &IdentifierAllocator {
        self.registry.allocator()
    }

    /// Validates and registers a new employee under a fresh identifier.
    pub fn create_employee(&mut self, fields: &NewEmployee) -> EngineResult<EmployeeId> {
        let id = self.registry.create(fields)?;
        info!(employee_id = %id, "Employee created");
        self.persist_employee(&id);
        Ok(id)
    }

    /// Registers a new employee under a caller-supplied identifier.
    pub fn create_employee_with_id(
        &mut self,
        id: &str,
        fields: &NewEmployee,
    ) -> EngineResult<EmployeeId> {
        let id = self.registry.create_with_id(id, fields)?;
        info!(employee_id = %id, "Employee created with supplied identifier");
        self.persist_employee(&id);
        Ok(id)
    }

    /// Looks up an employee.
    ///
    /// Surrounding whitespace and letter case in `id` are ignored.
    pub fn read_employee(&self, id: &str) -> EngineResult<&Employee> {
        let id = lookup_id(id)?;
        self.registry.read(&id)
    }

    /// Iterates all employees in creation order.
    pub fn list_employees(&self) -> impl Iterator<Item = &Employee> {
        self.registry.iter()
    }

    /// Number of registered employees.
    pub fn employee_count(&self) -> usize {
        self.registry.len()
    }

    /// Applies a partial update to an employee. See [`EmployeeRegistry::update`].
    pub fn update_employee(&mut self, id: &str, update: &EmployeeUpdate) -> EngineResult<&Employee> {
        let id = lookup_id(id)?;
        self.registry.update(&id, update)?;
        info!(employee_id = %id, "Employee updated");
        self.persist_employee(&id);
        self.registry.read(&id)
    }

    /// Removes an employee together with their payslip.
    pub fn delete_employee(&mut self, id: &str) -> EngineResult<Employee> {
        let id = lookup_id(id)?;
        let employee = self.registry.delete(&id)?;
        self.payslips.remove(&id);
        info!(employee_id = %id, "Employee deleted");

        if let Err(e) = self.store.delete_employee(&id) {
            warn!(employee_id = %id, error = %e, "Failed to persist deletion");
        }
        Ok(employee)
    }

    /// Computes a payslip and makes it the employee's current one.
    ///
    /// On error the previous payslip, if any, is left untouched.
    pub fn create_payslip(&mut self, id: &str, input: &PayslipInput) -> EngineResult<&Payslip> {
        let id = lookup_id(id)?;
        let employee = self.registry.read(&id)?;
        let payslip = calculate_payslip(employee, input, &self.config)?;

        info!(
            employee_id = %id,
            net_pay = %payslip.net_pay,
            "Payslip computed"
        );
        if let Err(e) = self.store.save_payslip(&payslip) {
            warn!(employee_id = %id, error = %e, "Failed to persist payslip");
        }

        self.payslips.insert(id, payslip);
        self.payslips
            .get(&id)
            .ok_or_else(|| EngineError::NotFound { id: id.to_string() })
    }

    /// Returns the employee's current payslip, or `None` if none was computed.
    pub fn read_payslip(&self, id: &str) -> EngineResult<Option<&Payslip>> {
        let id = lookup_id(id)?;
        self.registry.read(&id)?;
        Ok(self.payslips.get(&id))
    }

    /// Sums every current payslip at full precision.
    pub fn compute_payroll_totals(&self) -> EngineResult<PayrollTotals> {
        aggregate(self.payslips.values())
    }

    /// Builds the payroll report over every employee with a payslip.
    ///
    /// Rows follow the order in which each employee's payslip was first
    /// computed; replacing a payslip keeps its row in place.
    pub fn payroll_report(&self, payroll_date: Option<NaiveDate>) -> EngineResult<PayrollReport> {
        let entries = self
            .payslips
            .values()
            .filter_map(|p| self.registry.read(&p.employee_id).ok().map(|e| (e, p)));
        build_report(entries, payroll_date)
    }

    fn persist_employee(&mut self, id: &EmployeeId) {
        let Ok(employee) = self.registry.read(id) else {
            return;
        };
        if let Err(e) = self.store.save_employee(employee) {
            warn!(employee_id = %id, error = %e, "Failed to persist employee");
        }
    }
}

/// Normalizes a caller-supplied identifier; anything unparseable cannot exist.
fn lookup_id(raw: &str) -> EngineResult<EmployeeId> {
    let normalized = raw.trim().to_uppercase();
    normalized
        .parse()
        .map_err(|_| EngineError::NotFound { id: normalized })
}
