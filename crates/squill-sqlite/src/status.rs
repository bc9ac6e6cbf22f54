//! Upsert outcome reporting.

/// Immutable record of an upsert outcome.
///
/// Exactly one of `created`/`updated` is true on success; both false
/// signals that neither phase had any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOrUpdateStatus {
    /// A new row was inserted.
    pub created: bool,
    /// One or more existing rows were updated.
    pub updated: bool,
    /// Rows changed by the UPDATE phase, `-1` when not applicable.
    pub rows_changed: i64,
    /// Generated id from the INSERT phase, `-1` when none.
    pub insert_id: i64,
}

impl CreateOrUpdateStatus {
    /// Outcome of a successful UPDATE phase.
    #[must_use]
    pub fn updated(rows_changed: i64) -> Self {
        Self {
            created: false,
            updated: true,
            rows_changed,
            insert_id: -1,
        }
    }

    /// Outcome of a successful INSERT phase.
    #[must_use]
    pub fn created(insert_id: i64) -> Self {
        Self {
            created: true,
            updated: false,
            rows_changed: -1,
            insert_id,
        }
    }

    /// Outcome when neither phase had any effect.
    #[must_use]
    pub fn no_effect() -> Self {
        Self {
            created: false,
            updated: false,
            rows_changed: -1,
            insert_id: -1,
        }
    }

    /// Returns true when either phase succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.created || self.updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_exactly_one_flag() {
        let s = CreateOrUpdateStatus::updated(3);
        assert!(s.updated && !s.created && s.succeeded());
        assert_eq!(s.rows_changed, 3);
        assert_eq!(s.insert_id, -1);

        let s = CreateOrUpdateStatus::created(7);
        assert!(s.created && !s.updated && s.succeeded());
        assert_eq!(s.insert_id, 7);
        assert_eq!(s.rows_changed, -1);

        let s = CreateOrUpdateStatus::no_effect();
        assert!(!s.succeeded());
    }
}
