//! Timer-driven page advancement.
//!
//! The timer lives in a spawned tokio task owned by an [`AutoplayHandle`].
//! Dropping the handle cancels the task, so a timer can never outlive the
//! pagination state it was started for.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

pub struct Autoplay;

impl Autoplay {
    /// Starts ticking every `every`, first tick one full period from now.
    ///
    /// Returns `None` when there is nothing to rotate through
    /// (`total_pages <= 1`). Must be called from within a tokio runtime.
    pub fn start<F>(every: Duration, total_pages: usize, mut tick: F) -> Option<AutoplayHandle>
    where
        F: FnMut() + Send + 'static,
    {
        if total_pages <= 1 || every.is_zero() {
            return None;
        }

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            // a late tick is not followed by a burst of catch-up ticks
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick();
            }
        });

        tracing::debug!(?every, total_pages, "Autoplay started");
        Some(AutoplayHandle { task })
    }
}

#[derive(Debug)]
pub struct AutoplayHandle {
    task: JoinHandle<()>,
}

impl AutoplayHandle {
    pub fn stop(self) {
        // Drop does the work
    }
}

impl Drop for AutoplayHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Autoplay stopped");
    }
}
