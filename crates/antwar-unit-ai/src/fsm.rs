//! Unit mission finite state machine.
//!
//! Pure transition table over `Mission`. The ECS systems observe the world,
//! reduce what they saw to a `MissionEvent`, and ask this table for the next
//! mission. No ECS dependency; operates on plain data.

use antwar_core::enums::Mission;

/// A direct order from the player, a team script or a trigger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Move,
    Attack,
    Hunt,
    Guard,
    AreaGuard,
    Sleep,
    /// Stop whatever the unit is doing and guard in place.
    Stop,
}

impl Order {
    fn mission(self) -> Mission {
        match self {
            Order::Move => Mission::Move,
            Order::Attack => Mission::Attack,
            Order::Hunt => Mission::Hunt,
            Order::Guard | Order::Stop => Mission::Guard,
            Order::AreaGuard => Mission::AreaGuard,
            Order::Sleep => Mission::Sleep,
        }
    }
}

/// Something a unit observed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionEvent {
    /// A hostile is within the acquisition radius.
    HostileSighted,
    /// The current target is dead or gone; for hunters, nothing is left to hunt.
    TargetLost,
    /// The target is within weapon range.
    TargetInRange,
    /// The target is beyond weapon range.
    TargetOutOfRange { mobile: bool },
    /// The final path cell was reached.
    Arrived,
    /// No path exists to the goal.
    PathFailed,
    Ordered(Order),
    /// Hit points reached zero.
    Killed,
}

/// Next mission for `(mission, event)`, or `None` when the mission is unchanged.
pub fn transition(mission: Mission, event: MissionEvent) -> Option<Mission> {
    use Mission::*;
    use MissionEvent::*;

    let next = match (mission, event) {
        (Die, _) => return None,
        (_, Killed) => Die,
        (_, Ordered(order)) => order.mission(),

        (Guard | AreaGuard, HostileSighted) => Attack,
        (Guard | AreaGuard, _) => return None,

        (Move, Arrived | PathFailed) => Guard,
        (Move, _) => return None,

        (Attack, TargetLost) => Guard,
        (Attack, TargetOutOfRange { mobile: true }) => Hunt,
        (Attack, TargetOutOfRange { mobile: false }) => Guard,
        (Attack, _) => return None,

        (Hunt, TargetInRange) => Attack,
        (Hunt, TargetLost) => Guard,
        (Hunt, _) => return None,

        (Sleep, _) => return None,
    };
    (next != mission).then_some(next)
}

/// Whether a unit on this mission looks for hostiles on its own.
pub fn scans_for_hostiles(mission: Mission) -> bool {
    matches!(mission, Mission::Guard | Mission::AreaGuard | Mission::Hunt)
}
