//! Button edge tasks
//!
//! One task instance per button. Falling edges are timestamped and handed
//! to the debouncer; nothing else happens here.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use imulog_core::input::InputLine;

use crate::channels::INPUTS;

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: Input<'static>, line: InputLine) {
    info!("Button task started: {}", line);

    loop {
        pin.wait_for_falling_edge().await;
        // Truncation wraps every ~49 days; the debouncer compares with wrapping_sub
        let now_ms = Instant::now().as_millis() as u32;
        INPUTS.on_edge(line, now_ms);
        trace!("Edge on {} at {}", line, now_ms);
    }
}
