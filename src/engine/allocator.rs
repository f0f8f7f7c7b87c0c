//! Employee identifier allocation.
//!
//! One monotonic sequence counter is shared by every department and
//! classification. A sequence number, once issued, is never issued again,
//! even after the employee holding it is deleted.

use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{Classification, DepartmentCode, EmployeeId};
use crate::validation::MAX_SEQUENCE;

/// Issues `DEPT-CLASS-SEQ` identifiers and guards their uniqueness.
#[derive(Debug, Clone)]
pub struct IdentifierAllocator {
    next_sequence: u32,
    issued: BTreeSet<u16>,
}

impl Default for IdentifierAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierAllocator {
    /// Creates an allocator whose first identifier has sequence `0001`.
    pub fn new() -> Self {
        Self {
            next_sequence: 1,
            issued: BTreeSet::new(),
        }
    }

    /// The sequence number the next allocation will use.
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// Returns true if `sequence` has ever been issued or claimed.
    pub fn is_issued(&self, sequence: u16) -> bool {
        self.issued.contains(&sequence)
    }

    /// Allocates the next identifier for a department and classification.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierExhausted` once sequence `9999` has been used.
    ///
    /// # Examples
    ///
    /// ```
    /// use paysphere::engine::IdentifierAllocator;
    /// use paysphere::models::{Classification, DepartmentCode};
    ///
    /// let mut allocator = IdentifierAllocator::new();
    /// let first = allocator.allocate(DepartmentCode::Hr, Classification::FullTime).unwrap();
    /// let second = allocator.allocate(DepartmentCode::It, Classification::Intern).unwrap();
    /// assert_eq!(first.to_string(), "HR-F-0001");
    /// assert_eq!(second.to_string(), "IT-I-0002");
    /// ```
    pub fn allocate(
        &mut self,
        department: DepartmentCode,
        classification: Classification,
    ) -> EngineResult<EmployeeId> {
        let sequence = u16::try_from(self.next_sequence)
            .ok()
            .filter(|seq| *seq <= MAX_SEQUENCE)
            .ok_or(EngineError::IdentifierExhausted)?;

        let id = EmployeeId::new(department, classification, sequence)?;
        self.issued.insert(sequence);
        self.next_sequence += 1;
        Ok(id)
    }

    /// Claims a caller-supplied identifier.
    ///
    /// The identifier collides when its sequence suffix has already been
    /// issued under any department or classification. On success the counter
    /// moves past the claimed sequence so it is never allocated later.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` on a collision.
    pub fn claim(&mut self, id: EmployeeId) -> EngineResult<()> {
        let sequence = id.sequence();
        if self.issued.contains(&sequence) {
            return Err(EngineError::DuplicateIdentifier { id: id.to_string() });
        }

        self.issued.insert(sequence);
        self.next_sequence = self.next_sequence.max(u32::from(sequence) + 1);
        Ok(())
    }

    /// Ensures the counter is at least `next_sequence`.
    ///
    /// Used when restoring state whose deleted identifiers are no longer
    /// visible but must stay retired.
    pub fn advance_to(&mut self, next_sequence: u32) {
        self.next_sequence = self.next_sequence.max(next_sequence);
    }
}
