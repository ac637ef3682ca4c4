//! Network link state machine
//!
//! Tracks the path from power-on to a usable wall clock. The renderer
//! only cares about the first entry into [`LinkState::Ready`].

use super::events::LinkEvent;

/// Association attempts before giving up and returning to `Disconnected`
pub const MAX_CONNECT_ATTEMPTS: u8 = 5;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No association in progress
    #[default]
    Disconnected,
    /// Associating with the access point
    Connecting {
        /// 1-based attempt number
        attempt: u8,
    },
    /// IP address obtained
    Connected,
    /// Waiting for the time service
    TimeSyncing,
    /// Wall clock usable (synchronized or fallback applied)
    Ready,
}

impl LinkState {
    /// Check if the network is up
    pub fn is_online(&self) -> bool {
        matches!(
            self,
            LinkState::Connected | LinkState::TimeSyncing | LinkState::Ready
        )
    }

    /// Check if rendering can start
    pub fn is_ready(&self) -> bool {
        matches!(self, LinkState::Ready)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            // Association
            (Disconnected, Start) => Connecting { attempt: 1 },
            (Connecting { attempt }, AssociationFailed) if attempt < MAX_CONNECT_ATTEMPTS => {
                Connecting {
                    attempt: attempt + 1,
                }
            }
            (Connecting { .. }, AssociationFailed) => Disconnected,
            (Connecting { .. }, GotIp) => Connected,

            // Time sync
            (Connected, SyncStarted) => TimeSyncing,

            // A synced clock means the network got through, even if
            // association events arrived out of order. The sync wait also
            // expires with or without a network; the fallback time makes
            // the clock usable either way
            (_, TimeSynced) | (_, SyncTimedOut) => Ready,

            // Link loss before the clock is usable restarts association
            (Connected, Lost) | (TimeSyncing, Lost) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = LinkState::Disconnected
            .transition(LinkEvent::Start)
            .transition(LinkEvent::GotIp)
            .transition(LinkEvent::SyncStarted);
        assert_eq!(state, LinkState::TimeSyncing);
        assert!(state.is_online());
        assert!(!state.is_ready());

        let state = state.transition(LinkEvent::TimeSynced);
        assert_eq!(state, LinkState::Ready);
    }

    #[test]
    fn test_retry_until_limit() {
        let mut state = LinkState::Disconnected.transition(LinkEvent::Start);
        for attempt in 2..=MAX_CONNECT_ATTEMPTS {
            state = state.transition(LinkEvent::AssociationFailed);
            assert_eq!(state, LinkState::Connecting { attempt });
        }
        state = state.transition(LinkEvent::AssociationFailed);
        assert_eq!(state, LinkState::Disconnected);
    }

    #[test]
    fn test_sync_timeout_reaches_ready_offline() {
        let states = [
            LinkState::Disconnected,
            LinkState::Connecting { attempt: 3 },
            LinkState::Connected,
            LinkState::TimeSyncing,
        ];

        for state in states {
            assert_eq!(state.transition(LinkEvent::SyncTimedOut), LinkState::Ready);
        }
    }

    #[test]
    fn test_time_synced_reaches_ready_from_any_state() {
        let states = [
            LinkState::Disconnected,
            LinkState::Connecting { attempt: 2 },
            LinkState::Connected,
            LinkState::TimeSyncing,
            LinkState::Ready,
        ];

        for state in states {
            let next = state.transition(LinkEvent::TimeSynced);
            assert_eq!(next, LinkState::Ready);
            assert!(next.is_online());
        }
    }

    #[test]
    fn test_ready_survives_link_loss() {
        let state = LinkState::Ready.transition(LinkEvent::Lost);
        assert_eq!(state, LinkState::Ready);

        let state = LinkState::TimeSyncing.transition(LinkEvent::Lost);
        assert_eq!(state, LinkState::Disconnected);
    }

    #[test]
    fn test_unexpected_events_ignored() {
        assert_eq!(
            LinkState::Disconnected.transition(LinkEvent::GotIp),
            LinkState::Disconnected
        );
        assert_eq!(
            LinkState::Ready.transition(LinkEvent::Start),
            LinkState::Ready
        );
    }

    #[test]
    fn test_event_classification() {
        assert!(LinkEvent::GotIp.is_association());
        assert!(LinkEvent::SyncTimedOut.is_time_sync());
        assert!(!LinkEvent::Lost.is_time_sync());
    }
}
