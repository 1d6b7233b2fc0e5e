use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// What a call to [`Countdown::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not running; nothing happened
    Stopped,
    /// Still running; `ticked` is true when at least one second elapsed
    Running { ticked: bool },
    /// Reached zero on this call. Reported once per start.
    Expired,
}

/// A cancellable one-second countdown driven by the event loop's ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    carry: Duration,
    running: bool,
}

impl Countdown {
    /// A stopped countdown showing `seconds`
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            carry: Duration::ZERO,
            running: false,
        }
    }

    /// Arms the countdown, replacing whatever was running before
    pub fn start(&mut self, seconds: u32) {
        self.cancel();
        self.remaining = seconds;
        self.carry = Duration::ZERO;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn advance(&mut self, elapsed: Duration) -> CountdownTick {
        if !self.running {
            return CountdownTick::Stopped;
        }

        self.carry += elapsed;
        let mut ticked = false;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.remaining = self.remaining.saturating_sub(1);
            ticked = true;

            if self.remaining == 0 {
                self.cancel();
                return CountdownTick::Expired;
            }
        }

        CountdownTick::Running { ticked }
    }
}
