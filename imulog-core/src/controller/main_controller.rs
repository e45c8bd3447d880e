//! Fixed-cadence control loop

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use super::operation::{Operation, Trigger};
use super::services::Services;
use crate::capture::{CaptureError, CaptureFlags, CaptureOutcome, CaptureReport, CaptureSession};
use crate::config::LoggerConfig;
use crate::console::CommandDispatcher;
use crate::display::DisplayState;
use crate::input::InputDebouncer;
use crate::traits::{
    Console, Feedback, MotionSensor, RawMotion, RealTimeClock, Rgb, SensorError, StatusSink,
    Storage,
};

/// Prompt printed after every digit shortcut or button operation
pub const SHORTCUT_PROMPT: &str = "Choose a command (8 = help): ";

/// Operations performed during one tick, in order
pub type TickActions = Vec<Operation, 3>;

/// Everything the controller drives
pub struct Peripherals<S, M, C, F, O, P, D> {
    pub storage: S,
    pub sensor: M,
    pub clock: C,
    pub feedback: F,
    pub console: O,
    pub status: P,
    pub delay: D,
}

/// Top-level controller
///
/// Runs on the primary context. Edge handlers on other contexts only touch
/// `capture` and `inputs`; display output leaves through the `StatusSink`.
pub struct MainController<'a, S, M, C, F, O, P, D> {
    services: Services<S, C, O>,
    sensor: M,
    feedback: F,
    status: P,
    delay: D,
    dispatcher: CommandDispatcher,
    capture: &'a CaptureFlags,
    inputs: &'a InputDebouncer<'a>,
    config: LoggerConfig,
    latest: Result<RawMotion, SensorError>,
}

impl<'a, S, M, C, F, O, P, D> MainController<'a, S, M, C, F, O, P, D>
where
    S: Storage,
    M: MotionSensor,
    C: RealTimeClock,
    F: Feedback,
    O: Console,
    P: StatusSink,
    D: DelayNs,
{
    pub fn new(
        peripherals: Peripherals<S, M, C, F, O, P, D>,
        capture: &'a CaptureFlags,
        inputs: &'a InputDebouncer<'a>,
        config: LoggerConfig,
    ) -> Self {
        let Peripherals {
            storage,
            sensor,
            clock,
            feedback,
            console,
            status,
            delay,
        } = peripherals;
        Self {
            services: Services::new(storage, clock, console),
            sensor,
            feedback,
            status,
            delay,
            dispatcher: CommandDispatcher::new(),
            capture,
            inputs,
            config: config.sanitized(),
            latest: Ok(RawMotion::default()),
        }
    }

    /// Power-on sequence
    ///
    /// Shows "Initializing" with red and green lit for the settle time, then
    /// resets the sensor, prints help, turns the LEDs off and brings up the
    /// menu. A sensor reset failure is returned after the menu is up.
    pub async fn boot(&mut self) -> Result<(), SensorError> {
        self.status.publish(&DisplayState::alert("Initializing"));
        self.feedback.set_leds(Rgb::YELLOW);
        self.delay.delay_ms(self.config.boot_settle_ms).await;
        let reset = self.sensor.reset();

        self.services.print_help();
        let _ = write!(self.services.console, "\n{}", SHORTCUT_PROMPT);
        self.feedback.set_leds(Rgb::OFF);

        self.status.publish(&DisplayState::menu());
        reset
    }

    /// One loop iteration
    pub async fn tick(&mut self) -> TickActions {
        let mut actions = TickActions::new();

        self.latest = self.sensor.read_raw();

        if let Some(byte) = self.services.console.read_byte() {
            match Operation::from_shortcut(byte) {
                // Digits mid-line are command text, not shortcuts
                Some(op) if self.dispatcher.is_idle() => {
                    self.perform(op, Trigger::Shortcut).await;
                    let _ = actions.push(op);
                }
                _ => self.dispatcher.on_byte(byte, &mut self.services),
            }
        }

        if self.inputs.take_press() {
            self.perform(Operation::Capture, Trigger::Button).await;
            let _ = actions.push(Operation::Capture);
        }

        if self.inputs.take_toggle() {
            let op = if self.services.mounted {
                Operation::Unmount
            } else {
                Operation::Mount
            };
            self.perform(op, Trigger::Button).await;
            let _ = actions.push(op);
        }

        actions
    }

    /// Run one operation with its display, LED and tone feedback
    pub async fn perform(&mut self, op: Operation, trigger: Trigger) {
        if op == Operation::Help {
            self.services.print_help();
            let _ = write!(self.services.console, "\n{}", SHORTCUT_PROMPT);
            return;
        }

        let _ = writeln!(self.services.console, "\n{}", op.banner());
        self.status.publish(&DisplayState::alert(op.label()));
        if let Some(leds) = op.busy_leds() {
            self.feedback.set_leds(leds);
        }
        if let Some(tone) = op.tone(trigger) {
            self.feedback.beep(tone);
        }

        match op {
            Operation::Mount => {
                let result = self.services.mount(None);
                self.report(result);
                self.delay.delay_ms(self.config.mount_settle_ms).await;
            }
            Operation::Unmount => {
                let result = self.services.unmount(None);
                self.report(result);
            }
            Operation::List => {
                let result = self.services.list(None);
                self.report(result);
            }
            Operation::ShowLast => {
                // Failures are already on the console
                let _ = self.services.show_last();
            }
            Operation::FreeSpace => {
                let result = self.services.free_space(None);
                self.report(result);
            }
            Operation::Capture => {
                let _ = self.capture().await;
            }
            Operation::Format => {
                let result = self.services.format(None);
                self.report(result);
            }
            Operation::Help => {}
        }

        self.feedback.set_leds(Rgb::GREEN);
        if let Some(epilogue) = op.epilogue() {
            let _ = writeln!(self.services.console, "\n{}", epilogue);
        }
        let _ = write!(self.services.console, "\n{}", SHORTCUT_PROMPT);
        self.status.publish(&DisplayState::menu());
    }

    /// Run a capture session and report its outcome on the console
    pub async fn capture(&mut self) -> Result<CaptureReport, CaptureError> {
        let _ = writeln!(
            self.services.console,
            "Capturing data. Wait for completion..."
        );
        let session = CaptureSession::new(self.capture, &self.config);
        let result = session
            .run(&mut self.services.storage, &mut self.sensor, &mut self.delay)
            .await;

        let console = &mut self.services.console;
        match &result {
            Ok(report) => {
                let kind = match report.outcome {
                    CaptureOutcome::Completed => "Complete",
                    CaptureOutcome::Cancelled => {
                        let _ = writeln!(console, "\n[INFO] Capture stopped by user.");
                        "Partial"
                    }
                };
                let _ = writeln!(console, "\n{} data saved to {}.\n", kind, report.name);
                self.services.last_log = Some(report.name.clone());
            }
            // A second start while running is not an error for the operator
            Err(CaptureError::AlreadyRunning) => {}
            Err(e) => {
                let _ = writeln!(console, "\n[ERROR] {}", e);
            }
        }
        result
    }

    fn report<E: core::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            let _ = writeln!(self.services.console, "{}", e);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.services.is_mounted()
    }

    pub fn last_log(&self) -> Option<&str> {
        self.services.last_log()
    }

    /// Reading taken at the start of the latest tick
    pub fn latest_sample(&self) -> Result<RawMotion, SensorError> {
        self.latest
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayMode;
    use crate::testing::{
        MockClock, MockConsole, MockDelay, MockFeedback, MockSensor, MockStatus, RamStorage,
    };
    use crate::traits::{DateTime, Tone};
    use crate::input::InputLine;
    use embassy_futures::block_on;

    type TestController<'a> = MainController<
        'a,
        RamStorage,
        MockSensor,
        MockClock,
        MockFeedback,
        MockConsole,
        MockStatus,
        MockDelay,
    >;

    fn controller<'a>(
        flags: &'a CaptureFlags,
        inputs: &'a InputDebouncer<'a>,
        storage: RamStorage,
    ) -> TestController<'a> {
        let peripherals = Peripherals {
            storage,
            sensor: MockSensor::default(),
            clock: MockClock::default(),
            feedback: MockFeedback::default(),
            console: MockConsole::default(),
            status: MockStatus::default(),
            delay: MockDelay::default(),
        };
        MainController::new(peripherals, flags, inputs, LoggerConfig::default())
    }

    /// Type `text` and tick until the console input is drained
    fn type_and_run(c: &mut TestController<'_>, text: &str) {
        c.services.console.type_str(text);
        while !c.services.console.input.is_empty() {
            block_on(c.tick());
        }
    }

    fn output<'b>(c: &'b TestController<'_>) -> &'b str {
        &c.services.console.output
    }

    #[test]
    fn test_boot_sequence() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        block_on(c.boot()).unwrap();

        assert_eq!(c.status.published[0], DisplayState::alert("Initializing"));
        assert_eq!(c.status.published.last(), Some(&DisplayState::menu()));
        assert_eq!(c.feedback.leds, [Rgb::YELLOW, Rgb::OFF]);
        assert_eq!(c.delay.total_ms, 5000);
        assert_eq!(c.sensor.resets, 1);
        assert!(output(&c).contains("Type '8' to show available commands"));
        assert!(output(&c).contains("setrtc <DD> <MM> <YY> <hh> <mm> <ss>"));
    }

    #[test]
    fn test_mount_shortcut() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        c.services.console.type_str("1");
        let actions = block_on(c.tick());

        assert_eq!(actions.as_slice(), [Operation::Mount]);
        assert!(c.is_mounted());
        assert_eq!(c.feedback.beeps, [Tone::new(50, 1, 250)]);
        assert_eq!(c.feedback.leds, [Rgb::YELLOW, Rgb::GREEN]);
        assert_eq!(c.delay.total_ms, 100);
        assert_eq!(
            c.status.published,
            [DisplayState::alert("Mounting SD"), DisplayState::menu()]
        );
        assert!(output(&c).contains("SD ( 0: ) mounted"));
        assert!(output(&c).ends_with(SHORTCUT_PROMPT));
    }

    #[test]
    fn test_shortcut_after_crlf_line() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        type_and_run(&mut c, "help\r\n");
        c.services.console.type_str("1");
        let actions = block_on(c.tick());

        assert_eq!(actions.as_slice(), [Operation::Mount]);
        assert!(c.is_mounted());
    }

    #[test]
    fn test_failed_mount_stays_unmounted() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut storage = RamStorage::default();
        storage.fail_mount = true;
        let mut c = controller(&flags, &inputs, storage);

        type_and_run(&mut c, "1");

        assert!(!c.is_mounted());
        assert!(output(&c).contains("Storage error: I/O error"));
    }

    #[test]
    fn test_ls_empty_directory() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::mounted());

        type_and_run(&mut c, "ls\r");

        let out = output(&c);
        assert!(out.contains("Directory Listing: /\n"));
        assert!(!out.contains("not found"));
        assert!(!out.contains("[size="));
        assert!(out.ends_with("\n> "));
    }

    #[test]
    fn test_ls_entries() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut storage = RamStorage::mounted();
        storage.insert("log_000.csv", "id\n");
        let mut c = controller(&flags, &inputs, storage);

        type_and_run(&mut c, "ls\r");
        assert!(output(&c).contains("log_000.csv [writable file] [size=3]"));
    }

    #[test]
    fn test_digits_inside_a_line_are_text() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut storage = RamStorage::mounted();
        storage.insert("log_001.csv", "id,ax\n1,2\n");
        let mut c = controller(&flags, &inputs, storage);

        type_and_run(&mut c, "cat log_001.csv\r");

        assert!(output(&c).contains("id,ax\n1,2\n"));
        assert!(c.feedback.beeps.is_empty());
        assert!(c.status.published.is_empty());
    }

    #[test]
    fn test_setrtc() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        type_and_run(&mut c, "setrtc 15 03\r");
        assert_eq!(c.services.clock.now, None);
        assert!(output(&c).contains("Missing argument"));

        type_and_run(&mut c, "setrtc 15 03 24 10 30 00\r");
        assert_eq!(
            c.services.clock.now,
            Some(DateTime::new(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert!(output(&c).contains("Clock set to 2024-03-15 10:30:00"));
    }

    #[test]
    fn test_unknown_drive() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        type_and_run(&mut c, "mount 9:\r");
        assert!(output(&c).contains("Unknown logical drive \"9:\""));
        assert!(!c.is_mounted());
    }

    #[test]
    fn test_getfree_alignment() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::mounted());

        type_and_run(&mut c, "getfree\r");
        assert!(output(&c).contains("      1024 KiB total drive space.\n      1024 KiB available."));
    }

    #[test]
    fn test_button_capture_then_show_last() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::mounted());

        inputs.on_edge(InputLine::Primary, 1_000);
        let actions = block_on(c.tick());

        assert_eq!(actions.as_slice(), [Operation::Capture]);
        assert_eq!(c.last_log(), Some("log_000.csv"));
        assert!(output(&c).contains("Complete data saved to log_000.csv."));
        assert_eq!(c.feedback.beeps, [Tone::new(50, 1, 1200)]);
        assert!(!flags.is_running());
        let rows = c.services.storage.contents("log_000.csv").unwrap();
        assert_eq!(rows.lines().count(), 129);

        type_and_run(&mut c, "4");
        let out = output(&c);
        assert!(out.contains("Contents of log_000.csv:\nid,ax,ay,az,gx,gy,gz,temp\n"));
        assert!(out.contains("Finished reading log_000.csv."));
    }

    #[test]
    fn test_show_last_without_capture() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::mounted());

        type_and_run(&mut c, "4");
        assert!(output(&c).contains("No capture has been made"));
        assert_eq!(c.feedback.leds.last(), Some(&Rgb::GREEN));
    }

    #[test]
    fn test_capture_without_card_reports_error() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        type_and_run(&mut c, "6");
        assert!(output(&c).contains("[ERROR] could not open the file for writing"));
        assert_eq!(c.last_log(), None);
        assert_eq!(c.status.published.last().map(|s| s.mode), Some(DisplayMode::Idle));
    }

    #[test]
    fn test_toggle_button_mounts_and_unmounts() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        inputs.on_edge(InputLine::Secondary, 1_000);
        assert_eq!(block_on(c.tick()).as_slice(), [Operation::Mount]);
        assert!(c.is_mounted());

        inputs.on_edge(InputLine::Secondary, 2_000);
        assert_eq!(block_on(c.tick()).as_slice(), [Operation::Unmount]);
        assert!(!c.is_mounted());

        assert_eq!(
            c.feedback.beeps,
            [Tone::new(50, 1, 500), Tone::new(50, 2, 500)]
        );
    }

    #[test]
    fn test_failed_unmount_stays_mounted() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut storage = RamStorage::mounted();
        storage.fail_unmount = true;
        let mut c = controller(&flags, &inputs, storage);
        type_and_run(&mut c, "1");
        assert!(c.is_mounted());

        type_and_run(&mut c, "2");
        assert!(c.is_mounted());
        assert!(c.services.storage.mounted);
        assert!(output(&c).contains("Storage error: I/O error"));
        assert!(!output(&c).contains("unmounted"));

        c.services.storage.fail_unmount = false;
        type_and_run(&mut c, "2");
        assert!(!c.is_mounted());
        assert!(output(&c).contains("SD ( 0: ) unmounted"));
    }

    #[test]
    fn test_shortcut_and_button_share_mount_state() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        type_and_run(&mut c, "1");
        inputs.on_edge(InputLine::Secondary, 1_000);
        assert_eq!(block_on(c.tick()).as_slice(), [Operation::Unmount]);
    }

    #[test]
    fn test_tick_keeps_latest_sample() {
        let flags = CaptureFlags::new();
        let inputs = InputDebouncer::new(&flags);
        let mut c = controller(&flags, &inputs, RamStorage::default());

        let actions = block_on(c.tick());
        assert!(actions.is_empty());
        assert_eq!(c.latest_sample().map(|s| s.accel[0]), Ok(1));

        c.sensor.fail_after = Some(1);
        block_on(c.tick());
        assert_eq!(c.latest_sample(), Err(SensorError::Bus));
    }
}
