//! Keyed, cancellable deferred tasks over a logical millisecond clock.
//!
//! The scheduler never runs callbacks itself. Owners pull due keys with
//! `pop_due` and dispatch them, which keeps every mutation on the caller's
//! event loop.

use crate::model::note::NoteId;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Purpose of one deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKey {
    /// Next one-second tick of the auto-seal countdown.
    CountdownTick,
    /// Completion of the burn animation for one note.
    BurnAnimation(NoteId),
}

impl Display for TaskKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CountdownTick => write!(f, "countdown"),
            Self::BurnAnimation(note_id) => write!(f, "burnAnimation:{note_id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTask {
    deadline_ms: u64,
    sequence: u64,
}

/// Deferred task table.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_sequence: u64,
    tasks: BTreeMap<TaskKey, ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical time reached by the last `advance_to`/`pop_due`.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arms `key` to fire `delay_ms` from now.
    ///
    /// Re-arming an existing key replaces its deadline.
    pub fn schedule_after(&mut self, key: TaskKey, delay_ms: u64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks.insert(
            key,
            ScheduledTask {
                deadline_ms: self.now_ms.saturating_add(delay_ms),
                sequence,
            },
        );
    }

    /// Disarms `key`. Returns whether it was armed.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        self.tasks.remove(&key).is_some()
    }

    pub fn is_scheduled(&self, key: TaskKey) -> bool {
        self.tasks.contains_key(&key)
    }

    /// Deadline of `key` in logical milliseconds, if armed.
    pub fn deadline_of(&self, key: TaskKey) -> Option<u64> {
        self.tasks.get(&key).map(|task| task.deadline_ms)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Removes and returns the earliest task due at or before `until_ms`.
    ///
    /// Logical time moves to the task deadline so work scheduled by the
    /// handler is measured from the moment the task fired.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKey> {
        let (key, task) = self
            .tasks
            .iter()
            .filter(|(_, task)| task.deadline_ms <= until_ms)
            .min_by_key(|(_, task)| (task.deadline_ms, task.sequence))
            .map(|(key, task)| (*key, *task))?;
        self.tasks.remove(&key);
        self.now_ms = self.now_ms.max(task.deadline_ms);
        Some(key)
    }

    /// Moves logical time forward without firing anything.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::{Scheduler, TaskKey};
    use crate::model::note::NoteId;

    #[test]
    fn pops_in_deadline_then_sequence_order() {
        let first = NoteId::generate();
        let second = NoteId::generate();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(TaskKey::BurnAnimation(first), 1_500);
        scheduler.schedule_after(TaskKey::CountdownTick, 1_000);
        scheduler.schedule_after(TaskKey::BurnAnimation(second), 1_500);

        assert_eq!(scheduler.pop_due(2_000), Some(TaskKey::CountdownTick));
        assert_eq!(scheduler.now_ms(), 1_000);
        assert_eq!(scheduler.pop_due(2_000), Some(TaskKey::BurnAnimation(first)));
        assert_eq!(scheduler.pop_due(2_000), Some(TaskKey::BurnAnimation(second)));
        assert_eq!(scheduler.pop_due(2_000), None);
    }

    #[test]
    fn tasks_not_yet_due_stay_armed() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(TaskKey::CountdownTick, 1_000);
        assert_eq!(scheduler.pop_due(999), None);
        assert!(scheduler.is_scheduled(TaskKey::CountdownTick));
    }

    #[test]
    fn rearm_replaces_deadline_and_cancel_disarms() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(TaskKey::CountdownTick, 1_000);
        scheduler.advance_to(600);
        scheduler.schedule_after(TaskKey::CountdownTick, 1_000);
        assert_eq!(scheduler.deadline_of(TaskKey::CountdownTick), Some(1_600));
        assert_eq!(scheduler.len(), 1);

        assert!(scheduler.cancel(TaskKey::CountdownTick));
        assert!(!scheduler.cancel(TaskKey::CountdownTick));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn task_keys_render_by_purpose() {
        let note_id = NoteId::generate();
        assert_eq!(TaskKey::CountdownTick.to_string(), "countdown");
        assert_eq!(
            TaskKey::BurnAnimation(note_id).to_string(),
            format!("burnAnimation:{note_id}")
        );
    }
}
