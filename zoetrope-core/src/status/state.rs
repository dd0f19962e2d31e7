//! Sidebar state and its transitions

/// Split-link connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Heartbeats from the central half are arriving on schedule
    Connected,
    /// No heartbeat within the timeout
    Disconnected,
}

/// Battery charge state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Charge in percent, 0..=100
    pub percent: u8,
    /// True while the charger reports an active charge cycle
    pub charging: bool,
}

/// Status changes observed by the firmware tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// Battery measurement or charger state changed
    Battery(BatteryStatus),
    /// Split link came up or timed out
    Link(LinkState),
}

/// Aggregate sidebar state
///
/// Starts pessimistic - empty battery, link down - until the first
/// measurements arrive, matching what the panel should show while the
/// hardware is still settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusState {
    pub battery: BatteryStatus,
    pub link: LinkState,
}

impl Default for StatusState {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusState {
    pub const fn new() -> Self {
        Self {
            battery: BatteryStatus {
                percent: 0,
                charging: false,
            },
            link: LinkState::Disconnected,
        }
    }

    /// Apply one event, returning the next state
    ///
    /// The caller compares old and new state to decide whether the
    /// sidebar needs a redraw; an event that changes nothing yields an
    /// equal state.
    pub fn apply(self, event: StatusEvent) -> Self {
        match event {
            StatusEvent::Battery(battery) => Self { battery, ..self },
            StatusEvent::Link(link) => Self { link, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_battery(percent: u8, charging: bool) -> StatusEvent {
        StatusEvent::Battery(BatteryStatus { percent, charging })
    }

    #[test]
    fn test_initial_state_is_pessimistic() {
        let state = StatusState::new();
        assert_eq!(state.battery.percent, 0);
        assert!(!state.battery.charging);
        assert_eq!(state.link, LinkState::Disconnected);
    }

    #[test]
    fn test_battery_event_leaves_link_alone() {
        let state = StatusState::new().apply(StatusEvent::Link(LinkState::Connected));
        let state = state.apply(make_battery(72, true));

        assert_eq!(state.battery.percent, 72);
        assert!(state.battery.charging);
        assert_eq!(state.link, LinkState::Connected);
    }

    #[test]
    fn test_link_event_leaves_battery_alone() {
        let state = StatusState::new().apply(make_battery(31, false));
        let state = state.apply(StatusEvent::Link(LinkState::Connected));
        assert_eq!(state.battery.percent, 31);

        let state = state.apply(StatusEvent::Link(LinkState::Disconnected));
        assert_eq!(state.link, LinkState::Disconnected);
        assert_eq!(state.battery.percent, 31);
    }

    #[test]
    fn test_no_change_event_yields_equal_state() {
        let state = StatusState::new().apply(make_battery(50, false));
        let same = state.apply(make_battery(50, false));
        assert_eq!(state, same);

        let same = state.apply(StatusEvent::Link(LinkState::Disconnected));
        assert_eq!(state, same);
    }
}
