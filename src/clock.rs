//! Live destination clock
//!
//! At most one clock task runs at a time. Starting a clock aborts the task
//! that is currently running before the new one is installed, so ticks from
//! an old schedule never reach the surface after a new one starts.

use crate::render::{RenderCommand, RenderSurface};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Identifier of a started clock task
pub type ClockTaskId = u64;

/// Format an instant as 12-hour wall-clock time in `tz`, e.g. `3:07:09 PM`
#[must_use]
pub fn format_wall_clock(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%-I:%M:%S %p").to_string()
}

/// What a running clock displays
#[derive(Debug, Clone, PartialEq)]
pub enum ClockDisplay {
    Single { label: String, tz: Tz },
    Multi(Vec<(String, Tz)>),
}

impl ClockDisplay {
    /// Multi-country display, keeping the first pair for each label
    #[must_use]
    pub fn multi(pairs: impl IntoIterator<Item = (String, Tz)>) -> Self {
        let mut unique: Vec<(String, Tz)> = Vec::new();
        for (label, tz) in pairs {
            if !unique.iter().any(|(seen, _)| *seen == label) {
                unique.push((label, tz));
            }
        }
        Self::Multi(unique)
    }

    /// Text shown at `now`
    #[must_use]
    pub fn text_at(&self, now: DateTime<Utc>) -> String {
        match self {
            ClockDisplay::Single { label, tz } => {
                format!("Local time in {label}: {}", format_wall_clock(now, *tz))
            }
            ClockDisplay::Multi(pairs) => pairs
                .iter()
                .map(|(label, tz)| format!("{label}: {}", format_wall_clock(now, *tz)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

struct ClockTask {
    id: ClockTaskId,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct SchedulerState {
    current: Option<ClockTask>,
    next_id: ClockTaskId,
}

/// Owns the single repeating clock task
pub struct ClockScheduler {
    surface: Arc<dyn RenderSurface>,
    tick: Duration,
    state: Mutex<SchedulerState>,
}

impl ClockScheduler {
    #[must_use]
    pub fn new(surface: Arc<dyn RenderSurface>, tick: Duration) -> Self {
        Self {
            surface,
            tick,
            state: Mutex::new(SchedulerState::default()),
        }
    }

    /// Show one country's time, refreshed every tick
    pub fn start_single(&self, label: impl Into<String>, tz: Tz) -> Option<ClockTaskId> {
        self.start(ClockDisplay::Single {
            label: label.into(),
            tz,
        })
    }

    /// Show several countries' times, one line each, deduplicated by label
    pub fn start_multi(
        &self,
        pairs: impl IntoIterator<Item = (String, Tz)>,
    ) -> Option<ClockTaskId> {
        self.start(ClockDisplay::multi(pairs))
    }

    /// Replace the running clock (if any) with `display`.
    ///
    /// Outside a tokio runtime the current time is shown once and no task is
    /// scheduled; the result is then `None`.
    pub fn start(&self, display: ClockDisplay) -> Option<ClockTaskId> {
        let runtime = Handle::try_current().ok();

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = state.current.take() {
            debug!("Cancelling clock task {}", previous.id);
            previous.handle.abort();
        }

        self.surface
            .render(RenderCommand::SetClock(Some(display.text_at(Utc::now()))));

        let Some(runtime) = runtime else {
            warn!("No tokio runtime available, clock shown once without refresh");
            return None;
        };

        let surface = Arc::clone(&self.surface);
        let tick = self.tick;
        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + tick, tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                surface.render(RenderCommand::SetClock(Some(display.text_at(Utc::now()))));
            }
        });

        state.next_id += 1;
        let id = state.next_id;
        state.current = Some(ClockTask { id, handle });
        info!("Started clock task {}", id);
        Some(id)
    }

    /// Stop the running clock. Returns whether a task was cancelled.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.current.take() {
            Some(task) => {
                task.handle.abort();
                info!("Stopped clock task {}", task.id);
                true
            }
            None => false,
        }
    }

    /// Id of the running clock task
    #[must_use]
    pub fn active_task(&self) -> Option<ClockTaskId> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .as_ref()
            .map(|task| task.id)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active_task().is_some()
    }
}

impl Drop for ClockScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
