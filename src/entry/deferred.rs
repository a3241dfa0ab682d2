//! Work postponed to the next turn of the host event loop.
//!
//! Every task records the engine generation it was scheduled under. Destroying
//! or rebinding the engine bumps the generation, so stale tasks are dropped
//! when they come up instead of touching a control that is no longer bound.

use std::collections::VecDeque;

/// Postponed engine work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Pick the focused field from the caret, then re-render
    LocateCaret,
    /// Re-apply the selection of the focused field
    ShowField,
    /// Parse text that a paste has placed in the control
    ParsePasted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    task: DeferredTask,
    generation: u64,
}

/// FIFO of deferred tasks guarded by a liveness generation
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    queue: VecDeque<Scheduled>,
    generation: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn schedule(&mut self, task: DeferredTask) {
        self.queue.push_back(Scheduled {
            task,
            generation: self.generation,
        });
    }

    /// Invalidate everything scheduled so far
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Take the tasks due now, in scheduling order, dropping stale ones
    pub fn take_due(&mut self) -> Vec<DeferredTask> {
        let generation = self.generation;
        self.queue
            .drain(..)
            .filter_map(|scheduled| {
                if scheduled.generation == generation {
                    Some(scheduled.task)
                } else {
                    tracing::debug!(
                        "Dropping stale deferred task {:?} (generation {} != {})",
                        scheduled.task,
                        scheduled.generation,
                        generation
                    );
                    None
                }
            })
            .collect()
    }
}
