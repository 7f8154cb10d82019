mod message;
mod timer;

use crate::{
    repos::{INoteRepo, IReminderRepo},
    services::INotifier,
    system::ISys,
};
use chrono::Duration as CivilDuration;
use dashmap::{mapref::entry::Entry, DashMap};
use message::{compose_reminder_body, REMINDER_SUBJECT};
use mynote_domain::{date::civil_to_timestamp_millis, NaiveDateTime, Reminder, Tz, ID};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use timer::Timer;
use tracing::{debug, error, info, warn};

/// One occurrence in the chain of a reminder. Occurrences are counted
/// from `anchor` so that calendar clamping never accumulates.
#[derive(Debug, Clone, Copy)]
struct Occurrence {
    anchor: NaiveDateTime,
    index: u32,
    at: NaiveDateTime,
}

#[derive(Debug)]
enum SlotState {
    Armed(Timer),
    /// The notification for the current generation has been dispatched
    Firing,
}

/// Registry entry for a single reminder identity. Every transition of a
/// slot happens while holding its map entry, and the entry is never held
/// across an await.
struct Slot {
    generation: u64,
    state: SlotState,
    reminder: Reminder,
    occurrence: Occurrence,
    /// Held by a fire task for its whole delivery and rearm. Inherited
    /// when the slot is rearmed so that fires of one identity never overlap.
    delivery_lock: Arc<tokio::sync::Mutex<()>>,
}

struct SchedulerInner {
    slots: DashMap<ID, Slot>,
    generation: AtomicU64,
    reminders: Arc<dyn IReminderRepo>,
    notes: Arc<dyn INoteRepo>,
    notifier: Arc<dyn INotifier>,
    sys: Arc<dyn ISys>,
    tz: Tz,
}

/// Keeps one cancelable in-process timer per armed `Reminder` and
/// delivers the notification when it expires.
///
/// Firing follows `UNARMED -> ARMED -> FIRING -> (ARMED | UNARMED)`:
/// - `arm` supersedes whatever is pending for the identity
/// - `cancel` removes a pending timer, or stops the rearm of a fire
///   that has already dispatched its notification
/// - after a fire a recurring reminder is armed at its next occurrence
///   as long as that occurrence lies in the future
///
/// The stored `Reminder` is reloaded before every fire. A reminder that
/// is no longer stored is dropped from the registry without a delivery.
#[derive(Clone)]
pub struct ReminderScheduler {
    inner: Arc<SchedulerInner>,
}

impl ReminderScheduler {
    pub fn new(
        reminders: Arc<dyn IReminderRepo>,
        notes: Arc<dyn INoteRepo>,
        notifier: Arc<dyn INotifier>,
        sys: Arc<dyn ISys>,
        tz: Tz,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                slots: DashMap::new(),
                generation: AtomicU64::new(0),
                reminders,
                notes,
                notifier,
                sys,
                tz,
            }),
        }
    }

    /// Schedules `reminder` to fire at `at`, replacing any pending timer
    /// for the same reminder. Later occurrences are counted from `at`.
    pub fn arm(&self, reminder: &Reminder, at: NaiveDateTime) {
        let occurrence = Occurrence {
            anchor: at,
            index: 0,
            at,
        };
        self.arm_occurrence(reminder.clone(), occurrence);
    }

    /// Arms the first occurrence of `reminder` strictly after now.
    /// Returns `None` and leaves the reminder unarmed if there is none.
    pub fn arm_next_occurrence(&self, reminder: &Reminder) -> Option<NaiveDateTime> {
        let now = self.inner.sys.get_timestamp_millis();
        let (index, at) = reminder.next_occurrence_after(now, &self.inner.tz)?;
        let occurrence = Occurrence {
            anchor: reminder.reminder_time,
            index,
            at,
        };
        self.arm_occurrence(reminder.clone(), occurrence);
        Some(at)
    }

    /// Makes sure no future fire happens for `reminder_id` until it is
    /// armed again. A fire that already dispatched its notification
    /// completes, but is not rearmed.
    pub fn cancel(&self, reminder_id: &ID) {
        if let Entry::Occupied(mut entry) = self.inner.slots.entry(*reminder_id) {
            let firing = matches!(entry.get().state, SlotState::Firing);
            if firing {
                entry.get_mut().generation = self.next_generation();
                debug!("Canceled reminder {} while it was firing", reminder_id);
            } else if let SlotState::Armed(timer) = entry.remove().state {
                timer.cancel();
                debug!("Canceled reminder {}", reminder_id);
            }
        }
    }

    /// When the reminder is going to fire next, if it is armed
    pub fn next_fire(&self, reminder_id: &ID) -> Option<NaiveDateTime> {
        let slot = self.inner.slots.get(reminder_id)?;
        match slot.state {
            SlotState::Armed(_) => Some(slot.occurrence.at),
            SlotState::Firing => None,
        }
    }

    /// Every armed reminder together with its next fire time
    pub fn pending(&self) -> Vec<(ID, NaiveDateTime)> {
        self.inner
            .slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Armed(_)))
            .map(|slot| (*slot.key(), slot.occurrence.at))
            .collect()
    }

    /// Stops every armed timer. Fires that are delivering finish without
    /// being rearmed.
    pub fn shutdown(&self) {
        let ids = self
            .inner
            .slots
            .iter()
            .map(|slot| *slot.key())
            .collect::<Vec<_>>();
        for id in &ids {
            self.cancel(id);
        }
        info!("Reminder scheduler stopped, {} reminders canceled", ids.len());
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn arm_occurrence(&self, reminder: Reminder, occurrence: Occurrence) {
        let generation = self.next_generation();
        match self.inner.slots.entry(reminder.id) {
            Entry::Occupied(mut entry) => {
                self.rearm_slot(entry.get_mut(), reminder, occurrence, generation);
            }
            Entry::Vacant(entry) => {
                debug!("Arming reminder {} at {}", reminder.id, occurrence.at);
                let timer = self.start_timer(reminder.id, generation, &occurrence);
                entry.insert(Slot {
                    generation,
                    state: SlotState::Armed(timer),
                    reminder,
                    occurrence,
                    delivery_lock: Default::default(),
                });
            }
        }
    }

    fn rearm_slot(
        &self,
        slot: &mut Slot,
        reminder: Reminder,
        occurrence: Occurrence,
        generation: u64,
    ) {
        debug!("Arming reminder {} at {}", reminder.id, occurrence.at);
        let timer = self.start_timer(reminder.id, generation, &occurrence);
        let previous = std::mem::replace(&mut slot.state, SlotState::Armed(timer));
        if let SlotState::Armed(previous) = previous {
            previous.cancel();
        }
        slot.generation = generation;
        slot.reminder = reminder;
        slot.occurrence = occurrence;
    }

    fn start_timer(&self, reminder_id: ID, generation: u64, occurrence: &Occurrence) -> Timer {
        let now = self.inner.sys.get_timestamp_millis();
        let delay = (self.fire_timestamp(&occurrence.at) - now).max(0) as u64;
        let scheduler = self.clone();
        Timer::start(Duration::from_millis(delay), async move {
            scheduler.fire(reminder_id, generation).await;
        })
    }

    /// Absolute time of a civil occurrence. A wall-clock time skipped by
    /// a DST transition fires one hour later.
    fn fire_timestamp(&self, at: &NaiveDateTime) -> i64 {
        let tz = &self.inner.tz;
        civil_to_timestamp_millis(at, tz)
            .or_else(|| civil_to_timestamp_millis(&(*at + CivilDuration::hours(1)), tz))
            .unwrap_or_else(|| self.inner.sys.get_timestamp_millis())
    }

    async fn fire(self, reminder_id: ID, generation: u64) {
        let delivery_lock = match self.inner.slots.get(&reminder_id) {
            Some(slot) if slot.generation == generation => slot.delivery_lock.clone(),
            _ => return,
        };
        let _delivering = delivery_lock.lock().await;

        let stored = match self.inner.reminders.find(&reminder_id).await {
            Ok(Some(reminder)) => Some(reminder),
            Ok(None) => {
                info!("Reminder {} is no longer stored and is not fired", reminder_id);
                self.inner
                    .slots
                    .remove_if(&reminder_id, |_, slot| slot.generation == generation);
                return;
            }
            Err(e) => {
                warn!(
                    "Unable to reload reminder {}, firing the armed copy: {:?}",
                    reminder_id, e
                );
                None
            }
        };

        // Point of no return, from here on the notification goes out
        let (reminder, occurrence) = match self.inner.slots.get_mut(&reminder_id) {
            Some(mut slot) if slot.generation == generation => {
                slot.state = SlotState::Firing;
                if let Some(stored) = stored {
                    slot.reminder = stored;
                }
                (slot.reminder.clone(), slot.occurrence)
            }
            _ => return,
        };

        info!("Firing reminder {} for {}", reminder_id, occurrence.at);
        self.deliver(&reminder, &occurrence).await;
        let next = self.following_occurrence(&reminder, &occurrence);

        if let Entry::Occupied(mut entry) = self.inner.slots.entry(reminder_id) {
            if entry.get().generation != generation {
                // Rearmed while firing keeps the new timer, canceled while
                // firing leaves nothing behind
                if let SlotState::Firing = entry.get().state {
                    entry.remove();
                }
                return;
            }
            match next {
                Some(next) => {
                    let generation = self.next_generation();
                    self.rearm_slot(entry.get_mut(), reminder, next, generation);
                }
                None => {
                    entry.remove();
                }
            }
        }
    }

    async fn deliver(&self, reminder: &Reminder, occurrence: &Occurrence) {
        let note = match self.inner.notes.find(&reminder.note_id).await {
            Some(note) => note,
            None => {
                error!(
                    "Unable to deliver reminder {}: note {} was not found",
                    reminder.id, reminder.note_id
                );
                return;
            }
        };
        let body = compose_reminder_body(&note, &occurrence.at);
        if let Err(e) = self
            .inner
            .notifier
            .deliver(&note.user_id, REMINDER_SUBJECT, &body)
            .await
        {
            error!("Failed to deliver reminder {}: {:?}", reminder.id, e);
        }
    }

    fn following_occurrence(
        &self,
        reminder: &Reminder,
        occurrence: &Occurrence,
    ) -> Option<Occurrence> {
        let frequency = reminder.recurrence()?;
        let index = occurrence.index.checked_add(1)?;
        let at = frequency.nth_after(&occurrence.anchor, index)?;
        if self.fire_timestamp(&at) <= self.inner.sys.get_timestamp_millis() {
            warn!(
                "Next occurrence {} of reminder {} is not in the future, the reminder is left unarmed",
                at, reminder.id
            );
            return None;
        }
        Some(Occurrence {
            anchor: occurrence.anchor,
            index,
            at,
        })
    }
}
