use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Scheduled { generation: u64 },
    Replaced { generation: u64, superseded: u64 },
}

#[derive(Debug)]
struct Pending<T> {
    generation: u64,
    due: Duration,
    task: T,
}

// Times are offsets on a caller-supplied monotonic clock.
#[derive(Debug)]
pub struct UpdateScheduler<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    last_generation: u64,
}

impl<T> UpdateScheduler<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Duration, task: T) -> ScheduleAction {
        self.last_generation += 1;
        let generation = self.last_generation;
        let previous = self.pending.replace(Pending {
            generation,
            due: now + self.delay,
            task,
        });

        match previous {
            Some(superseded) => ScheduleAction::Replaced {
                generation,
                superseded: superseded.generation,
            },
            None => ScheduleAction::Scheduled { generation },
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take_due(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref().is_some_and(|pending| now >= pending.due) {
            return self.pending.take().map(|pending| pending.task);
        }
        None
    }
}
