//! Running-state resolution
//!
//! Maps the effective system mode (and, under Auto, the reported running
//! mode) to the fixed-shape running-state record controllers read.

use super::{RunningMode, RunningState, SystemMode};

/// Resolve the running-state record for a mode pair
///
/// Dry reports heat+fan, FanOnly reports fan, Off and Sleep report nothing
/// active. Auto delegates to the running mode. Combinations outside the
/// table resolve to all-off.
pub fn resolve_running_state(system_mode: SystemMode, running_mode: RunningMode) -> RunningState {
    match system_mode {
        SystemMode::Heat | SystemMode::EmergencyHeat => RunningState::heat(),
        SystemMode::Cool | SystemMode::Precooling => RunningState::cool(),
        SystemMode::Dry => RunningState::dry(),
        SystemMode::FanOnly => RunningState::fan_only(),
        SystemMode::Off | SystemMode::Sleep => RunningState::ALL_OFF,
        SystemMode::Auto => match running_mode {
            RunningMode::Heat => RunningState::heat(),
            RunningMode::Cool => RunningState::cool(),
            RunningMode::Off => RunningState::ALL_OFF,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(SystemMode::Heat, RunningState::heat())]
    #[case(SystemMode::EmergencyHeat, RunningState::heat())]
    #[case(SystemMode::Cool, RunningState::cool())]
    #[case(SystemMode::Precooling, RunningState::cool())]
    #[case(SystemMode::Dry, RunningState::dry())]
    #[case(SystemMode::FanOnly, RunningState::fan_only())]
    #[case(SystemMode::Off, RunningState::ALL_OFF)]
    #[case(SystemMode::Sleep, RunningState::ALL_OFF)]
    fn test_mapping_table(#[case] mode: SystemMode, #[case] expected: RunningState) {
        // Running mode must not influence non-Auto rows
        assert_eq!(resolve_running_state(mode, RunningMode::Off), expected);
        assert_eq!(resolve_running_state(mode, RunningMode::Heat), expected);
        assert_eq!(resolve_running_state(mode, RunningMode::Cool), expected);
    }

    #[rstest]
    #[case(RunningMode::Heat, RunningState::heat())]
    #[case(RunningMode::Cool, RunningState::cool())]
    #[case(RunningMode::Off, RunningState::ALL_OFF)]
    fn test_auto_delegates_to_running_mode(
        #[case] running: RunningMode,
        #[case] expected: RunningState,
    ) {
        assert_eq!(resolve_running_state(SystemMode::Auto, running), expected);
    }

    #[rstest]
    #[case(SystemMode::Heat)]
    #[case(SystemMode::Cool)]
    #[case(SystemMode::Dry)]
    #[case(SystemMode::FanOnly)]
    #[case(SystemMode::Auto)]
    fn test_at_most_one_primary_flag(#[case] mode: SystemMode) {
        let state = resolve_running_state(mode, RunningMode::Heat);
        assert!(state.primary_flag_count() <= 1);
        // Stage flags are never set
        assert!(!state.heat_stage2 && !state.cool_stage2);
        assert!(!state.fan_stage2 && !state.fan_stage3);
    }
}
