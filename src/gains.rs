//! Selection of the fusion gains for each cycle.

use crate::calibration::{CalibrationState, FusionGains};
use crate::time::Ticks;

/// Gains used while leveling: fast convergence of attitude and gyro bias.
pub const LEVELING_GAINS: FusionGains = FusionGains {
    kp: 1.0,
    ki: 0.9,
    yaw_bias_rate: 0.23,
    accel_alpha: 0.0,
    accel_filter_enabled: false,
};

/// Leveling starts once the run time exceeds this value, in milliseconds.
///
/// Samples taken before this point are dominated by sensor start-up transients.
pub const WARM_UP_START: Ticks = 100;

/// Leveling ends once the run time reaches this value, in milliseconds.
pub const WARM_UP_END: Ticks = 7000;

/// The arming state of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmingState {
    #[default]
    Disarmed,
    /// The arming sequence is in progress.
    Arming,
    Armed,
}

/// The flight status relevant to the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightStatus {
    pub armed: ArmingState,
    /// The commanded throttle.
    pub throttle: f32,
}

impl FlightStatus {
    /// Whether the vehicle is fully armed.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed == ArmingState::Armed
    }
}

/// The gain profile in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainProfile {
    /// Fixed aggressive gains to null the gyro bias before flight.
    Leveling,
    /// The gains configured in the settings.
    Normal,
}

/// Switches between the leveling and the configured gains.
#[derive(Debug, Clone)]
pub struct GainScheduler {
    active: FusionGains,
    profile: GainProfile,
}

impl GainScheduler {
    /// Creates a scheduler that starts out on the configured gains.
    pub fn new(calibration: &CalibrationState) -> Self {
        Self {
            active: *calibration.gains(),
            profile: GainProfile::Normal,
        }
    }

    /// Determines the profile for the given run time and flight status.
    pub fn profile_for(elapsed: Ticks, status: &FlightStatus, zero_during_arming: bool) -> GainProfile {
        if elapsed > WARM_UP_START && elapsed < WARM_UP_END {
            return GainProfile::Leveling;
        }

        if zero_during_arming && status.armed == ArmingState::Arming {
            return GainProfile::Leveling;
        }

        GainProfile::Normal
    }

    /// Evaluates the profile for this cycle and returns the gains to use.
    ///
    /// The configured gains are reloaded once on the transition back to [`GainProfile::Normal`].
    pub fn update(
        &mut self,
        elapsed: Ticks,
        status: &FlightStatus,
        calibration: &CalibrationState,
    ) -> &FusionGains {
        let profile = Self::profile_for(elapsed, status, calibration.flags().zero_during_arming);

        match profile {
            GainProfile::Leveling => {
                if self.profile != GainProfile::Leveling {
                    log::debug!("leveling at {} ms", elapsed);
                }
                self.active.kp = LEVELING_GAINS.kp;
                self.active.ki = LEVELING_GAINS.ki;
                self.active.yaw_bias_rate = LEVELING_GAINS.yaw_bias_rate;
                self.active.accel_filter_enabled = LEVELING_GAINS.accel_filter_enabled;
            }
            GainProfile::Normal if self.profile == GainProfile::Leveling => {
                let configured = calibration.gains();
                self.active.kp = configured.kp;
                self.active.ki = configured.ki;
                self.active.yaw_bias_rate = configured.yaw_bias_rate;
                if self.active.accel_alpha > 0.0 {
                    self.active.accel_filter_enabled = true;
                }
                log::debug!("configured gains restored at {} ms", elapsed);
            }
            GainProfile::Normal => {}
        }

        self.profile = profile;
        &self.active
    }

    /// Takes over the gains of a replaced calibration.
    pub fn on_settings_replaced(&mut self, calibration: &CalibrationState) {
        self.active = *calibration.gains();
    }

    /// The profile selected by the last update.
    pub fn profile(&self) -> GainProfile {
        self.profile
    }

    /// The gains selected by the last update.
    pub fn active(&self) -> &FusionGains {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AttitudeSettings;

    const DISARMED: FlightStatus = FlightStatus {
        armed: ArmingState::Disarmed,
        throttle: 0.0,
    };

    const ARMING: FlightStatus = FlightStatus {
        armed: ArmingState::Arming,
        throttle: 0.0,
    };

    #[test]
    fn test_profile_rules() {
        assert_eq!(GainScheduler::profile_for(50, &DISARMED, true), GainProfile::Normal);
        assert_eq!(GainScheduler::profile_for(100, &DISARMED, true), GainProfile::Normal);
        assert_eq!(GainScheduler::profile_for(101, &DISARMED, true), GainProfile::Leveling);
        assert_eq!(GainScheduler::profile_for(500, &DISARMED, false), GainProfile::Leveling);
        assert_eq!(GainScheduler::profile_for(6999, &DISARMED, false), GainProfile::Leveling);
        assert_eq!(GainScheduler::profile_for(7000, &DISARMED, true), GainProfile::Normal);
        assert_eq!(GainScheduler::profile_for(10_000, &DISARMED, true), GainProfile::Normal);
        assert_eq!(GainScheduler::profile_for(10_000, &ARMING, true), GainProfile::Leveling);
        assert_eq!(GainScheduler::profile_for(10_000, &ARMING, false), GainProfile::Normal);
    }

    #[test]
    fn test_leveling_in_warm_up_window() {
        let calibration = CalibrationState::default();
        let mut scheduler = GainScheduler::new(&calibration);

        let gains = *scheduler.update(500, &DISARMED, &calibration);
        assert_eq!(scheduler.profile(), GainProfile::Leveling);
        assert_eq!(gains.kp, 1.0);
        assert_eq!(gains.ki, 0.9);
        assert_eq!(gains.yaw_bias_rate, 0.23);
        assert!(!gains.accel_filter_enabled);
    }

    #[test]
    fn test_configured_gains_after_warm_up() {
        let calibration = CalibrationState::from_settings(&AttitudeSettings {
            accel_kp: 0.05,
            accel_ki: 0.0001,
            accel_tau: 0.1,
            ..Default::default()
        });
        let mut scheduler = GainScheduler::new(&calibration);

        scheduler.update(2000, &DISARMED, &calibration);
        assert!(!scheduler.active().accel_filter_enabled);

        let gains = *scheduler.update(10_000, &DISARMED, &calibration);
        assert_eq!(scheduler.profile(), GainProfile::Normal);
        assert_eq!(gains.kp, 0.05);
        assert_eq!(gains.ki, 0.0001);
        assert!(gains.accel_filter_enabled);
    }

    #[test]
    fn test_reload_is_edge_triggered() {
        let calibration = CalibrationState::default();
        let mut scheduler = GainScheduler::new(&calibration);
        scheduler.update(2000, &DISARMED, &calibration);
        scheduler.update(8000, &DISARMED, &calibration);

        // Changes made while in the normal profile stick until the next leveling phase.
        scheduler.active.kp = 0.3;
        let gains = *scheduler.update(8010, &DISARMED, &calibration);
        assert_eq!(gains.kp, 0.3);
    }

    #[test]
    fn test_leveling_while_arming() {
        let calibration = CalibrationState::default();
        let mut scheduler = GainScheduler::new(&calibration);

        scheduler.update(10_000, &ARMING, &calibration);
        assert_eq!(scheduler.profile(), GainProfile::Leveling);
        assert_eq!(scheduler.active().kp, 1.0);

        scheduler.update(10_010, &DISARMED, &calibration);
        assert_eq!(scheduler.profile(), GainProfile::Normal);
        assert_eq!(scheduler.active().kp, calibration.gains().kp);
    }
}
