//! Vessel cloak state machine.
//!
//! UNCLOAKED -> CLOAKING -> CLOAKED -> UNCLOAKING -> UNCLOAKED. Both transition
//! states last `CLOAK_TRANSITION_TICKS`. A sonar pulse keeps the vessel from
//! entering CLOAKING until its own timer runs out, whatever the cloak state.

use antwar_core::components::Cloak;
use antwar_core::constants::*;
use antwar_core::enums::CloakState;

/// Advance one tick. `engaged` means the vessel wants to fire this tick.
///
/// Returns the new state when it changed.
pub fn tick(cloak: &mut Cloak, engaged: bool) -> Option<CloakState> {
    cloak.sonar_timer = cloak.sonar_timer.saturating_sub(1);
    let before = cloak.state;

    match cloak.state {
        CloakState::Cloaking => {
            cloak.timer = cloak.timer.saturating_sub(1);
            if cloak.timer == 0 {
                cloak.state = CloakState::Cloaked;
            }
        }
        CloakState::Uncloaking => {
            cloak.timer = cloak.timer.saturating_sub(1);
            if cloak.timer == 0 {
                cloak.state = CloakState::Uncloaked;
                cloak.idle_ticks = 0;
            }
        }
        CloakState::Cloaked => {
            if engaged {
                start_uncloaking(cloak);
            }
        }
        CloakState::Uncloaked => {
            if engaged {
                cloak.idle_ticks = 0;
            } else {
                cloak.idle_ticks = cloak.idle_ticks.saturating_add(1);
                if cloak.idle_ticks >= CLOAK_REARM_TICKS && cloak.sonar_timer == 0 {
                    cloak.state = CloakState::Cloaking;
                    cloak.timer = CLOAK_TRANSITION_TICKS;
                }
            }
        }
    }

    (cloak.state != before).then_some(cloak.state)
}

/// Any damage while cloaked or cloaking forces a full-length uncloak.
pub fn on_damage(cloak: &mut Cloak) -> bool {
    match cloak.state {
        CloakState::Cloaked | CloakState::Cloaking => {
            start_uncloaking(cloak);
            true
        }
        CloakState::Uncloaked | CloakState::Uncloaking => false,
    }
}

/// Anti-submarine detection: block re-cloaking for a while.
pub fn on_sonar_pulse(cloak: &mut Cloak) {
    cloak.sonar_timer = SONAR_PULSE_TICKS;
}

/// Cloaked, cloaking, or not yet fully uncloaked.
pub fn is_hidden(cloak: &Cloak) -> bool {
    cloak.state != CloakState::Uncloaked
}

/// A vessel may only fire while fully uncloaked.
pub fn can_fire(cloak: &Cloak) -> bool {
    cloak.state == CloakState::Uncloaked
}

fn start_uncloaking(cloak: &mut Cloak) {
    cloak.state = CloakState::Uncloaking;
    cloak.timer = CLOAK_TRANSITION_TICKS;
    cloak.idle_ticks = 0;
}
