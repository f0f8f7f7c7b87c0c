//! The employee registry.
//!
//! Holds every employee keyed by identifier and is the only place employee
//! records are created, changed or removed. Every mutation validates first
//! and applies all-or-nothing.

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use crate::validation::{
    parse_employee_id, validate_date, validate_email, validate_new_employee, validate_phone,
    validate_text,
};

use super::allocator::IdentifierAllocator;
use super::ledger::IdMap;

/// In-memory employee records plus the allocator that names them.
#[derive(Debug, Clone, Default)]
pub struct EmployeeRegistry {
    allocator: IdentifierAllocator,
    employees: IdMap<Employee>,
}

impl EmployeeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier allocator.
    pub fn allocator(&self) -> &IdentifierAllocator {
        &self.allocator
    }

    /// Validates `fields`, allocates an identifier and stores the employee.
    ///
    /// Nothing is stored and no identifier is consumed when validation fails.
    pub fn create(&mut self, fields: &NewEmployee) -> EngineResult<EmployeeId> {
        let (department, classification) = validate_new_employee(fields)?;
        let id = self.allocator.allocate(department, classification)?;
        self.employees.insert(id, build_employee(id, fields));
        Ok(id)
    }

    /// Stores an employee under a caller-supplied identifier.
    ///
    /// Blank department or classification codes are taken from the
    /// identifier; non-blank ones must agree with it.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed identifier or field, `DuplicateIdentifier`
    /// when the identifier's sequence has already been issued.
    pub fn create_with_id(&mut self, id: &str, fields: &NewEmployee) -> EngineResult<EmployeeId> {
        let id = parse_employee_id(id.trim())?;

        let mut fields = fields.clone();
        if fields.department_code.trim().is_empty() {
            fields.department_code = id.department().code().to_string();
        }
        if fields.classification_code.trim().is_empty() {
            fields.classification_code = id.classification().code().to_string();
        }

        let (department, classification) = validate_new_employee(&fields)?;
        if department != id.department() {
            return Err(EngineError::validation(
                "department_code",
                format!("does not match identifier {id}"),
            ));
        }
        if classification != id.classification() {
            return Err(EngineError::validation(
                "classification_code",
                format!("does not match identifier {id}"),
            ));
        }

        self.allocator.claim(id)?;
        self.employees.insert(id, build_employee(id, &fields));
        Ok(id)
    }

    /// Returns the employee with `id`.
    pub fn read(&self, id: &EmployeeId) -> EngineResult<&Employee> {
        self.employees.get(id).ok_or_else(|| not_found(id))
    }

    /// Applies a partial update.
    ///
    /// Absent or blank fields keep their current value. If any present field
    /// is invalid nothing is changed. The classification never changes.
    pub fn update(&mut self, id: &EmployeeId, update: &EmployeeUpdate) -> EngineResult<&Employee> {
        let mut updated = self.read(id)?.clone();

        apply(&mut updated.name, &update.name, |v| validate_text("name", v))?;
        apply(&mut updated.job_title, &update.job_title, |v| {
            validate_text("job_title", v)
        })?;
        apply(&mut updated.email, &update.email, validate_email)?;
        apply(&mut updated.phone, &update.phone, validate_phone)?;
        apply(&mut updated.department, &update.department, |v| {
            validate_text("department", v)
        })?;
        apply(&mut updated.manager_name, &update.manager_name, |v| {
            validate_text("manager_name", v)
        })?;
        apply(&mut updated.hire_date, &update.hire_date, |v| {
            validate_date("hire_date", v)
        })?;
        apply(&mut updated.birth_date, &update.birth_date, |v| {
            validate_date("birth_date", v)
        })?;

        self.employees.insert(*id, updated);
        self.read(id)
    }

    /// Removes and returns the employee with `id`.
    pub fn delete(&mut self, id: &EmployeeId) -> EngineResult<Employee> {
        self.employees.remove(id).ok_or_else(|| not_found(id))
    }

    /// Returns true if an employee with `id` exists.
    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.employees.contains(id)
    }

    /// Iterates employees in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if there are no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Re-inserts a previously persisted employee without re-validating it.
    pub fn restore(&mut self, employee: Employee) -> EngineResult<()> {
        self.allocator.claim(employee.id)?;
        self.employees.insert(employee.id, employee);
        Ok(())
    }

    /// Keeps identifiers below `next_sequence` retired.
    pub fn retire_below(&mut self, next_sequence: u32) {
        self.allocator.advance_to(next_sequence);
    }
}

fn not_found(id: &EmployeeId) -> EngineError {
    EngineError::NotFound { id: id.to_string() }
}

fn build_employee(id: EmployeeId, fields: &NewEmployee) -> Employee {
    Employee {
        id,
        name: fields.name.clone(),
        job_title: fields.job_title.clone(),
        email: fields.email.clone(),
        phone: fields.phone.clone(),
        department: fields.department.clone(),
        manager_name: fields.manager_name.clone(),
        hire_date: fields.hire_date.clone(),
        birth_date: fields.birth_date.clone(),
    }
}

/// Validates and writes `value` into `target` unless it is absent or blank.
fn apply(
    target: &mut String,
    value: &Option<String>,
    validate: impl Fn(&str) -> EngineResult<()>,
) -> EngineResult<()> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => {
            validate(v)?;
            *target = v.to_string();
            Ok(())
        }
        _ => Ok(()),
    }
}
