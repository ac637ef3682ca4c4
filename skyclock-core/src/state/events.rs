//! Events that drive the network link state machine

/// Events reported by the network stack and the time-sync task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    // Association events
    /// Station started, first association attempt begins
    Start,
    /// Association attempt failed
    AssociationFailed,
    /// DHCP lease obtained
    GotIp,
    /// Link dropped after being up
    Lost,

    // Time synchronization events
    /// SNTP request issued
    SyncStarted,
    /// Wall clock set from the network
    TimeSynced,
    /// Sync wait expired, fallback time applied
    SyncTimedOut,
}

impl LinkEvent {
    /// Check if this event comes from the WiFi association path
    pub fn is_association(&self) -> bool {
        matches!(
            self,
            LinkEvent::Start | LinkEvent::AssociationFailed | LinkEvent::GotIp | LinkEvent::Lost
        )
    }

    /// Check if this event comes from the time-sync path
    pub fn is_time_sync(&self) -> bool {
        matches!(
            self,
            LinkEvent::SyncStarted | LinkEvent::TimeSynced | LinkEvent::SyncTimedOut
        )
    }
}
