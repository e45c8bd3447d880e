//! Display task
//!
//! Renders the latest published `DisplayState`. Unchanged states are not
//! redrawn; a failed render is retried on the refresh timer.

use defmt::*;
use embassy_time::{with_timeout, Duration};

use imulog_core::display::{DisplayPublisher, DisplayState};

use crate::board::BoardDisplay;
use crate::channels::DISPLAY_STATE;

#[embassy_executor::task]
pub async fn display_task(mut display: BoardDisplay, alert_row: u8, refresh_ms: u32) {
    info!("Display task started");

    if let Err(e) = display.init() {
        error!("Display init failed: {}", e);
    }

    let mut publisher = DisplayPublisher::new(alert_row);
    let mut state = DisplayState::default();
    let refresh = Duration::from_millis(refresh_ms as u64);

    loop {
        match publisher.render(&state, &mut display) {
            Ok(true) => trace!("Display redrawn"),
            Ok(false) => {}
            Err(e) => warn!("Display render failed: {}", e),
        }

        if let Ok(next) = with_timeout(refresh, DISPLAY_STATE.wait()).await {
            state = next;
        }
    }
}
