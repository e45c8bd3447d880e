//! Controller task
//!
//! Owns every collaborator except the display and drives the
//! `MainController` at the configured tick period.

use defmt::*;
use embassy_time::{Duration, Ticker};

use imulog_core::config::LoggerConfig;
use imulog_core::controller::{MainController, Operation};

use crate::board::BoardPeripherals;
use crate::channels::{CAPTURE, INPUTS};

#[embassy_executor::task]
pub async fn controller_task(peripherals: BoardPeripherals, config: LoggerConfig) {
    info!("Controller task started");

    let mut controller = MainController::new(peripherals, &CAPTURE, &INPUTS, config);

    match controller.boot().await {
        Ok(()) => info!("Motion sensor reset"),
        Err(e) => warn!("Motion sensor reset failed: {}", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));
    let mut sensor_ok = true;

    loop {
        ticker.next().await;

        let actions = controller.tick().await;
        for op in &actions {
            info!("Operation done: {}", op);
            if *op == Operation::Capture {
                if let Some(name) = controller.last_log() {
                    info!("Last capture file: {}", name);
                }
            }
        }

        // Only log transitions to keep RTT quiet on a missing sensor
        match controller.latest_sample() {
            Ok(sample) => {
                if !sensor_ok {
                    info!("Motion sensor back");
                }
                sensor_ok = true;
                trace!("Sample: {}", sample);
            }
            Err(e) => {
                if sensor_ok {
                    warn!("Motion sensor read failed: {}", e);
                }
                sensor_ok = false;
            }
        }
    }
}
