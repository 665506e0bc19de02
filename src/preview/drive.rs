//! Summary of a drive shown in place of a file preview

use super::format::bytes_to_readable;

/// Capacity and usage of a drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveSummary {
    pub name: String,
    pub drive_type: String,
    pub file_system: String,
    pub capacity: u64,
    pub free_space: u64,
    pub used_space: u64,
}

impl DriveSummary {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        drive_type: impl Into<String>,
        file_system: impl Into<String>,
        capacity: u64,
        free_space: u64,
    ) -> Self {
        Self {
            name: name.into(),
            drive_type: drive_type.into(),
            file_system: file_system.into(),
            capacity,
            free_space,
            used_space: capacity.saturating_sub(free_space),
        }
    }

    #[must_use]
    pub fn capacity_text(&self) -> String {
        bytes_to_readable(self.capacity, false)
    }

    #[must_use]
    pub fn free_space_text(&self) -> String {
        bytes_to_readable(self.free_space, false)
    }

    #[must_use]
    pub fn used_space_text(&self) -> String {
        bytes_to_readable(self.used_space, false)
    }

    /// Fraction of the capacity in use
    ///
    /// `None` when there is nothing to show: zero capacity or zero usage.
    #[must_use]
    pub fn used_ratio(&self) -> Option<f64> {
        if self.capacity == 0 || self.used_space == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.used_space as f64 / self.capacity as f64;
        Some(ratio.min(1.0))
    }
}
