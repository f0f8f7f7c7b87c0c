//! Persistence for employees and payslips.
//!
//! The engine keeps its working state in memory and reports every committed
//! mutation to a [`PayrollStore`]. Stores are write-behind: a failure is
//! reported to the caller but never undoes the in-memory change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Employee, EmployeeId, Payslip};

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data could not be encoded or decoded.
    #[error("Storage format error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A sink for committed engine mutations.
pub trait PayrollStore: Send + std::fmt::Debug {
    /// Records a created or updated employee.
    fn save_employee(&mut self, employee: &Employee) -> StoreResult<()>;

    /// Records a created or replaced payslip.
    fn save_payslip(&mut self, payslip: &Payslip) -> StoreResult<()>;

    /// Records that an employee and their payslip were removed.
    fn delete_employee(&mut self, id: &EmployeeId) -> StoreResult<()>;
}

/// A store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl PayrollStore for NullStore {
    fn save_employee(&mut self, _employee: &Employee) -> StoreResult<()> {
        Ok(())
    }

    fn save_payslip(&mut self, _payslip: &Payslip) -> StoreResult<()> {
        Ok(())
    }

    fn delete_employee(&mut self, _id: &EmployeeId) -> StoreResult<()> {
        Ok(())
    }
}

fn first_sequence() -> u32 {
    1
}

/// Everything needed to rebuild an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The sequence the allocator will hand out next.
    #[serde(default = "first_sequence")]
    pub next_sequence: u32,
    /// Employees in creation order.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// The current payslip of each employee that has one.
    #[serde(default)]
    pub payslips: Vec<Payslip>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            next_sequence: first_sequence(),
            employees: Vec::new(),
            payslips: Vec::new(),
        }
    }
}

/// A store that rewrites a single JSON document on every change.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash never leaves a half-written document behind. Writes are
/// synchronous and run while the caller holds the engine lock.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonFileStore {
    /// Opens the document at `path`, starting empty if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, snapshot })
    }

    /// The path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The state as last written.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec_pretty(&self.snapshot)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PayrollStore for JsonFileStore {
    fn save_employee(&mut self, employee: &Employee) -> StoreResult<()> {
        let employees = &mut self.snapshot.employees;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => employees.push(employee.clone()),
        }
        let after = u32::from(employee.id.sequence()) + 1;
        self.snapshot.next_sequence = self.snapshot.next_sequence.max(after);
        self.flush()
    }

    fn save_payslip(&mut self, payslip: &Payslip) -> StoreResult<()> {
        let payslips = &mut self.snapshot.payslips;
        match payslips
            .iter_mut()
            .find(|p| p.employee_id == payslip.employee_id)
        {
            Some(existing) => *existing = payslip.clone(),
            None => payslips.push(payslip.clone()),
        }
        self.flush()
    }

    fn delete_employee(&mut self, id: &EmployeeId) -> StoreResult<()> {
        self.snapshot.employees.retain(|e| e.id != *id);
        self.snapshot.payslips.retain(|p| p.employee_id != *id);
        self.flush()
    }
}
