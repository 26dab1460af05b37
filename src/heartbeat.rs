//! The heartbeat emitter: a fixed line on stdout every interval until the
//! shutdown token fires.

use crate::shutdown::ShutdownToken;
use log::{debug, info};
use std::io::{self, Write};
use tokio::time::{sleep, Duration};

/// Line written once the emitter has observed cancellation.
pub const SHUTDOWN_MESSAGE: &str = "Received interrupt signal. Exiting...";

/// Writes a fixed liveness line on every tick until cancelled.
///
/// The emitter checks its [`ShutdownToken`] at the top of each iteration.
/// A cancellation that lands mid-sleep wakes it early, so it exits within one
/// interval. Depending on timing one more line may still be written; that is
/// accepted rather than suppressed.
pub struct Heartbeat<W> {
    writer: W,
    message: String,
    interval: Duration,
}

impl<W: Write> Heartbeat<W> {
    /// Creates an emitter that writes `message` to `writer` every `interval`.
    pub fn new(writer: W, message: impl Into<String>, interval: Duration) -> Self {
        Self {
            writer,
            message: message.into(),
            interval,
        }
    }

    /// Runs until the token is cancelled, then writes [`SHUTDOWN_MESSAGE`].
    ///
    /// Every line is flushed as soon as it is written. The writer is handed
    /// back so callers can inspect what was emitted.
    pub async fn run(mut self, mut shutdown: ShutdownToken) -> io::Result<W> {
        debug!("[Heartbeat] started with interval {:?}.", self.interval);
        let mut beats: u64 = 0;

        while !shutdown.is_cancelled() {
            writeln!(self.writer, "{}", self.message)?;
            self.writer.flush()?;
            beats += 1;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!("[Heartbeat] woken by shutdown.");
                }
                _ = sleep(self.interval) => {}
            }
        }

        writeln!(self.writer, "{}", SHUTDOWN_MESSAGE)?;
        self.writer.flush()?;
        info!("[Heartbeat] stopped after {} beats.", beats);
        Ok(self.writer)
    }
}
