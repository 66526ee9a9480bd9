//! Hand-over of settings snapshots from another execution context.

use crate::settings::AttitudeSettings;
use core::cell::RefCell;
use critical_section::Mutex;

/// A single-slot mailbox for [`AttitudeSettings`].
///
/// Posting replaces any snapshot not yet taken, so the estimator always sees
/// the latest complete settings.
pub struct SettingsMailbox {
    slot: Mutex<RefCell<Option<AttitudeSettings>>>,
}

impl SettingsMailbox {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Posts a settings snapshot. Safe to call from interrupt context.
    pub fn post(&self, settings: AttitudeSettings) {
        critical_section::with(|cs| {
            self.slot.borrow_ref_mut(cs).replace(settings);
        });
    }

    /// Takes the pending snapshot, if any.
    pub fn take(&self) -> Option<AttitudeSettings> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())
    }

    /// Whether a snapshot is waiting.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow_ref(cs).is_some())
    }
}

impl Default for SettingsMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_snapshot_wins() {
        let mailbox = SettingsMailbox::new();
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take(), None);

        mailbox.post(AttitudeSettings {
            accel_kp: 0.1,
            ..Default::default()
        });
        mailbox.post(AttitudeSettings {
            accel_kp: 0.2,
            ..Default::default()
        });
        assert!(mailbox.is_pending());

        let taken = mailbox.take().expect("a snapshot was posted");
        assert_eq!(taken.accel_kp, 0.2);
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_post_from_static() {
        static MAILBOX: SettingsMailbox = SettingsMailbox::new();

        MAILBOX.post(AttitudeSettings::default());
        assert_eq!(MAILBOX.take(), Some(AttitudeSettings::default()));
    }
}
