//! Field validators for employee records and payslip inputs.
//!
//! Every validator is a total function over its raw input: a value that does
//! not match simply yields [`EngineError::Validation`] (or
//! [`EngineError::InvalidInput`] for payslip numerics). Nothing here panics
//! or has side effects.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Classification, DepartmentCode, EmployeeId, NewEmployee};

/// Largest sequence number an identifier can carry.
pub const MAX_SEQUENCE: u16 = 9999;

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("letters pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

static EMPLOYEE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,3})-([FPCI])-([0-9]{4})$").expect("identifier pattern is valid")
});

/// Validates a department code (`HR`, `IT`, `FIN`, `MKT`, `ENG`), ignoring case.
pub fn validate_department_code(code: &str) -> EngineResult<DepartmentCode> {
    DepartmentCode::from_code(code).ok_or_else(|| {
        EngineError::validation("department_code", "must be one of HR, IT, FIN, MKT or ENG")
    })
}

/// Validates a classification code (`F`, `P`, `C`, `I`), ignoring case.
pub fn validate_classification_code(code: &str) -> EngineResult<Classification> {
    Classification::from_code(code.trim()).ok_or_else(|| {
        EngineError::validation("classification_code", "must be one of F, P, C or I")
    })
}

/// Validates a four-digit sequence string with a value in `1..=9999`.
///
/// # Examples
///
/// ```
/// use paysphere::validation::validate_sequence;
///
/// assert_eq!(validate_sequence("0042").unwrap(), 42);
/// assert!(validate_sequence("0000").is_err());
/// assert!(validate_sequence("42").is_err());
/// ```
pub fn validate_sequence(sequence: &str) -> EngineResult<u16> {
    let invalid = || EngineError::validation("sequence", "must be four digits between 0001 and 9999");

    if sequence.len() != 4 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u16 = sequence.parse().map_err(|_| invalid())?;
    if (1..=MAX_SEQUENCE).contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Validates a free-text field restricted to ASCII letters and spaces.
///
/// Used for names, job titles, department names and manager names. A value
/// of spaces alone is rejected.
pub fn validate_text(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        Err(EngineError::validation(field, "cannot be blank"))
    } else if LETTERS_AND_SPACES.is_match(value) {
        Ok(())
    } else {
        Err(EngineError::validation(field, "use letters and spaces only"))
    }
}

/// Validates an email address of the form `local@domain.tld`.
pub fn validate_email(email: &str) -> EngineResult<()> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(EngineError::validation("email", "must look like name@domain.tld"))
    }
}

/// Validates a phone number of exactly ten digits without separators.
pub fn validate_phone(phone: &str) -> EngineResult<()> {
    if PHONE.is_match(phone) {
        Ok(())
    } else {
        Err(EngineError::validation("phone", "must be exactly 10 digits"))
    }
}

/// Validates the `YYYY-MM-DD` shape of a date.
///
/// Only the format is checked; `2020-13-40` is accepted.
pub fn validate_date(field: &str, date: &str) -> EngineResult<()> {
    if DATE.is_match(date) {
        Ok(())
    } else {
        Err(EngineError::validation(field, "must use the YYYY-MM-DD format"))
    }
}

/// Rejects a negative payslip input.
pub fn validate_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        Err(EngineError::InvalidInput {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Parses and validates a full identifier such as `ENG-C-0010`.
pub fn parse_employee_id(id: &str) -> EngineResult<EmployeeId> {
    let captures = EMPLOYEE_ID
        .captures(id)
        .ok_or_else(|| EngineError::validation("id", "must match DEPT-CLASS-NNNN"))?;

    let department = DepartmentCode::from_code(&captures[1]).ok_or_else(|| {
        EngineError::validation("id", "department must be one of HR, IT, FIN, MKT or ENG")
    })?;
    let classification = validate_classification_code(&captures[2])?;
    let sequence = validate_sequence(&captures[3])
        .map_err(|_| EngineError::validation("id", "sequence must be between 0001 and 9999"))?;

    EmployeeId::new(department, classification, sequence)
}

/// Validates every field of a create request, in declaration order.
///
/// Returns the department and classification the identifier will carry.
/// The first failing field is reported.
pub fn validate_new_employee(
    fields: &NewEmployee,
) -> EngineResult<(DepartmentCode, Classification)> {
    let department_code = if fields.department_code.trim().is_empty() {
        DepartmentCode::from_name(&fields.department).ok_or_else(|| {
            EngineError::validation(
                "department_code",
                "could not be derived from the department name",
            )
        })?
    } else {
        validate_department_code(&fields.department_code)?
    };
    let classification = validate_classification_code(&fields.classification_code)?;

    validate_text("name", &fields.name)?;
    validate_text("job_title", &fields.job_title)?;
    validate_email(&fields.email)?;
    validate_phone(&fields.phone)?;
    validate_text("department", &fields.department)?;
    validate_text("manager_name", &fields.manager_name)?;
    validate_date("hire_date", &fields.hire_date)?;
    validate_date("birth_date", &fields.birth_date)?;

    Ok((department_code, classification))
}
