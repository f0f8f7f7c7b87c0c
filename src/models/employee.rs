//! Employee model and related types.
//!
//! This module defines the [`Employee`] record, the structured
//! [`EmployeeId`] it is keyed by, and the closed [`Classification`] and
//! [`DepartmentCode`] sets encoded inside that identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::validation;

/// The employment category governing which pay formula applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Full-time employment; overtime paid at 150%.
    FullTime,
    /// Part-time employment; overtime paid at 125%.
    PartTime,
    /// Contract employment; overtime hours are paid at the regular rate.
    Contract,
    /// Internship; overtime hours are not paid.
    Intern,
}

impl Classification {
    /// All classifications, in identifier-code order.
    pub const ALL: [Classification; 4] = [
        Classification::FullTime,
        Classification::PartTime,
        Classification::Contract,
        Classification::Intern,
    ];

    /// Returns the single-letter code used inside identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use paysphere::models::Classification;
    ///
    /// assert_eq!(Classification::Contract.code(), 'C');
    /// ```
    pub fn code(self) -> char {
        match self {
            Classification::FullTime => 'F',
            Classification::PartTime => 'P',
            Classification::Contract => 'C',
            Classification::Intern => 'I',
        }
    }

    /// Looks up a classification by its code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "F" => Some(Classification::FullTime),
            "P" => Some(Classification::PartTime),
            "C" => Some(Classification::Contract),
            "I" => Some(Classification::Intern),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::FullTime => "Full-time",
            Classification::PartTime => "Part-time",
            Classification::Contract => "Contract",
            Classification::Intern => "Intern",
        };
        f.write_str(label)
    }
}

/// One of the five departments that carry their own rate table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DepartmentCode {
    /// Human Resources.
    #[serde(rename = "HR")]
    Hr,
    /// Information Technology.
    #[serde(rename = "IT")]
    It,
    /// Finance.
    #[serde(rename = "FIN")]
    Fin,
    /// Marketing.
    #[serde(rename = "MKT")]
    Mkt,
    /// Engineering.
    #[serde(rename = "ENG")]
    Eng,
}

impl DepartmentCode {
    /// All department codes.
    pub const ALL: [DepartmentCode; 5] = [
        DepartmentCode::Hr,
        DepartmentCode::It,
        DepartmentCode::Fin,
        DepartmentCode::Mkt,
        DepartmentCode::Eng,
    ];

    /// Returns the short code used inside identifiers.
    pub fn code(self) -> &'static str {
        match self {
            DepartmentCode::Hr => "HR",
            DepartmentCode::It => "IT",
            DepartmentCode::Fin => "FIN",
            DepartmentCode::Mkt => "MKT",
            DepartmentCode::Eng => "ENG",
        }
    }

    /// Returns the full department name.
    pub fn name(self) -> &'static str {
        match self {
            DepartmentCode::Hr => "Human Resources",
            DepartmentCode::It => "Information Technology",
            DepartmentCode::Fin => "Finance",
            DepartmentCode::Mkt => "Marketing",
            DepartmentCode::Eng => "Engineering",
        }
    }

    /// Looks up a department by its short code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dept| dept.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Looks up a department by its full name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use paysphere::models::DepartmentCode;
    ///
    /// assert_eq!(DepartmentCode::from_name("finance"), Some(DepartmentCode::Fin));
    /// assert_eq!(DepartmentCode::from_name("Info. Technology"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dept| dept.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves either a short code or a full department name.
    pub fn resolve(department: &str) -> Option<Self> {
        Self::from_code(department).or_else(|| Self::from_name(department))
    }
}

impl fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The structured employee identifier `DEPT-CLASS-SEQ`, e.g. `IT-F-0003`.
///
/// The textual form is a wire format other tooling may parse; it always
/// matches `^[A-Z]{2,3}-[FPCI]-\d{4}$`.
///
/// # Examples
///
/// ```
/// use paysphere::models::{Classification, DepartmentCode, EmployeeId};
///
/// let id: EmployeeId = "FIN-C-0005".parse().unwrap();
/// assert_eq!(id.department(), DepartmentCode::Fin);
/// assert_eq!(id.classification(), Classification::Contract);
/// assert_eq!(id.sequence(), 5);
/// assert_eq!(id.to_string(), "FIN-C-0005");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId {
    department: DepartmentCode,
    classification: Classification,
    sequence: u16,
}

impl EmployeeId {
    /// Creates an identifier from its parts. `sequence` must be in `1..=9999`.
    pub fn new(
        department: DepartmentCode,
        classification: Classification,
        sequence: u16,
    ) -> EngineResult<Self> {
        if !(1..=validation::MAX_SEQUENCE).contains(&sequence) {
            return Err(EngineError::validation(
                "sequence",
                format!("must be between 1 and {}", validation::MAX_SEQUENCE),
            ));
        }
        Ok(Self {
            department,
            classification,
            sequence,
        })
    }

    /// The department encoded in the identifier.
    pub fn department(&self) -> DepartmentCode {
        self.department
    }

    /// The classification encoded in the identifier.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The numeric sequence suffix.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:04}",
            self.department.code(),
            self.classification.code(),
            self.sequence
        )
    }
}

impl FromStr for EmployeeId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::parse_employee_id(s)
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.to_string()
    }
}

/// An employee record held by the registry.
///
/// The classification is not stored separately; it is always read from the
/// identifier so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, immutable identifier.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Job title.
    pub job_title: String,
    /// Contact email address.
    pub email: String,
    /// Ten-digit local phone number.
    pub phone: String,
    /// Department name as entered (free text).
    pub department: String,
    /// Name of the employee's manager.
    pub manager_name: String,
    /// Hire date, `YYYY-MM-DD`.
    pub hire_date: String,
    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,
}

impl Employee {
    /// Returns the employee's classification.
    pub fn classification(&self) -> Classification {
        self.id.classification()
    }
}

/// Raw field values for creating an employee.
///
/// Nothing here has been validated yet; the registry validates every field
/// before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Department code (`HR`, `IT`, `FIN`, `MKT`, `ENG`). When blank the code
    /// is derived from `department`.
    #[serde(default)]
    pub department_code: String,
    /// Classification code (`F`, `P`, `C`, `I`).
    pub classification_code: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub job_title: String,
    /// Contact email address.
    pub email: String,
    /// Ten-digit local phone number.
    pub phone: String,
    /// Department name.
    pub department: String,
    /// Manager's name.
    pub manager_name: String,
    /// Hire date, `YYYY-MM-DD`.
    pub hire_date: String,
    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,
}

impl From<&Employee> for NewEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            department_code: employee.id.department().code().to_string(),
            classification_code: employee.classification().code().to_string(),
            name: employee.name.clone(),
            job_title: employee.job_title.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            manager_name: employee.manager_name.clone(),
            hire_date: employee.hire_date.clone(),
            birth_date: employee.birth_date.clone(),
        }
    }
}

/// A partial update. `None` or a blank value keeps the current field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    /// New full name.
    pub name: Option<String>,
    /// New job title.
    pub job_title: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New department name.
    pub department: Option<String>,
    /// New manager's name.
    pub manager_name: Option<String>,
    /// New hire date.
    pub hire_date: Option<String>,
    /// New birth date.
    pub birth_date: Option<String>,
}
