//! Replays a recorded session: one JSON [`Action`] per line.

use std::io::BufRead;
use std::rc::Rc;

use crate::kernel::error::{Result, SessionError};
use crate::kernel::services::ports::{NullPersistenceAdapter, SessionConfig};
use crate::kernel::{Action, ManualClock, SessionSnapshot, Store};

pub struct ReplayOutcome {
    pub snapshot: SessionSnapshot,
    pub dispatched: usize,
    pub changed: usize,
}

/// Blank lines and lines starting with `#` are skipped. The clock advances by
/// one millisecond per action so recency follows line order.
pub fn replay<R: BufRead>(reader: R, config: SessionConfig) -> Result<ReplayOutcome> {
    let clock = Rc::new(ManualClock::new(0));
    let mut store = Store::with_parts(
        config,
        Box::new(Rc::clone(&clock)),
        Box::new(NullPersistenceAdapter),
    );

    let mut dispatched = 0;
    let mut changed = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: Action = serde_json::from_str(trimmed).map_err(|source| {
            SessionError::Action {
                line: idx + 1,
                source,
            }
        })?;

        clock.advance(1);
        let result = store.dispatch(action);
        dispatched += 1;
        if result.state_changed {
            changed += 1;
        }
    }

    tracing::info!(dispatched, changed, "replay finished");
    Ok(ReplayOutcome {
        snapshot: store.snapshot(),
        dispatched,
        changed,
    })
}

#[cfg(test)]
#[path = "../tests/unit/replay.rs"]
mod tests;
