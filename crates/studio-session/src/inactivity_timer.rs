use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// A single sliding deadline. `touch` pushes the deadline one window past
/// now; when the deadline passes untouched the expiry callback runs once.
///
/// Dropping the timer cancels it.
#[derive(Debug)]
pub(crate) struct InactivityTimer {
    generation: u64,
    window: Duration,
    deadline: Arc<Mutex<Instant>>,
    handle: JoinHandle<()>,
}

impl InactivityTimer {
    /// Must be called from within a tokio runtime.
    pub(crate) fn start<F>(generation: u64, window: Duration, on_expire: F) -> Self
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let deadline = Arc::new(Mutex::new(Instant::now() + window));
        let task_deadline = Arc::clone(&deadline);

        let handle = tokio::spawn(async move {
            loop {
                let current = *task_deadline.lock().unwrap_or_else(|e| e.into_inner());
                if Instant::now() >= current {
                    break;
                }
                sleep_until(current).await;
            }
            on_expire(generation);
        });

        Self {
            generation,
            window,
            deadline,
            handle,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn touch(&self) {
        *self.deadline.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now() + self.window;
    }

    pub(crate) fn remaining(&self) -> Duration {
        let deadline = *self.deadline.lock().unwrap_or_else(|e| e.into_inner());
        deadline.saturating_duration_since(Instant::now())
    }
}

impl Drop for InactivityTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
