//! Closed result types for operations whose status codes carry meaning.

/// Result of deleting one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 200 or 204.
    Deleted,
    /// 404: nothing to delete, which still leaves the object absent.
    AlreadyAbsent,
    /// Any other status. The object may or may not still exist.
    Failed { status: u16 },
}

impl DeleteOutcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 | 204 => DeleteOutcome::Deleted,
            404 => DeleteOutcome::AlreadyAbsent,
            status => DeleteOutcome::Failed { status },
        }
    }

    /// The object is known to be absent afterwards.
    pub fn is_success(&self) -> bool {
        !matches!(self, DeleteOutcome::Failed { .. })
    }
}

/// Whether an object exists, as far as a listing could tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Present,
    Absent,
    /// The listing failed, so nothing is known.
    Unknown,
}

impl Existence {
    pub fn is_present(&self) -> bool {
        matches!(self, Existence::Present)
    }
}
