//! Link task
//!
//! Folds association and time-sync events into the [`LinkState`] machine
//! and wakes the renderer on the first entry into `Ready`.

use defmt::*;
use skyclock_core::state::{LinkEvent, LinkState};

use crate::channels::{LINK_EVENTS, LINK_READY, LINK_STATE};

#[embassy_executor::task]
pub async fn link_task() {
    info!("Link task started");

    let mut state = LinkState::default();

    loop {
        let event = LINK_EVENTS.receive().await;
        let next = state.transition(event);

        if next == state {
            debug!("Link: {:?} ignored in {:?}", event, state);
            continue;
        }

        info!("Link: {:?} -> {:?} ({:?})", state, next, event);
        if let (LinkState::Connecting { attempt }, LinkEvent::AssociationFailed) = (next, event) {
            warn!("Association failed, attempt {}", attempt);
        }
        if event == LinkEvent::AssociationFailed && next == LinkState::Disconnected {
            warn!("Association attempts exhausted");
        }

        LINK_STATE.lock(|cell| cell.set(next));
        if next.is_ready() && !state.is_ready() {
            LINK_READY.signal(());
        }
        state = next;
    }
}
