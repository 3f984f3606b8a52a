//! Host-time timer queue
//!
//! Replaces browser `setTimeout`/`setInterval` with an owned queue polled
//! from the frame callback. Because the queue lives inside the loop that
//! owns the simulator, dropping or clearing it cancels every pending
//! callback; nothing can fire against a torn-down field.

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// One of the start-up splashes.
    Seed,
    /// The periodic ambient splash.
    Ambient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u32);

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
    kind: TimerKind,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u32,
    // Reused by `fire_due`.
    scratch: Vec<(f64, TimerId, TimerKind)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            due_ms,
            period_ms,
            kind,
        });
        id
    }

    /// Fire once at `due_ms`.
    pub fn schedule_once(&mut self, due_ms: f64, kind: TimerKind) -> TimerId {
        self.push(due_ms, None, kind)
    }

    /// Fire at `first_due_ms` and then every `period_ms`.
    pub fn schedule_every(&mut self, first_due_ms: f64, period_ms: f64, kind: TimerKind) -> TimerId {
        self.push(first_due_ms, Some(period_ms.max(f64::EPSILON)), kind)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Append the kinds of all timers due at `now_ms` to `out`, earliest
    /// first (ties in scheduling order).
    ///
    /// One-shot timers are removed. A repeating timer fires at most once per
    /// call; if the host fell behind by more than a period, its next due
    /// time restarts from `now_ms` instead of replaying the backlog.
    pub fn fire_due(&mut self, now_ms: f64, out: &mut Vec<TimerKind>) {
        let due = &mut self.scratch;
        due.clear();
        due.extend(
            self.timers
                .iter()
                .filter(|t| t.due_ms <= now_ms)
                .map(|t| (t.due_ms, t.id, t.kind)),
        );
        if due.is_empty() {
            return;
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        out.extend(due.drain(..).map(|(_, _, kind)| kind));

        self.timers.retain_mut(|t| {
            if t.due_ms > now_ms {
                return true;
            }
            match t.period_ms {
                Some(period) => {
                    let next = t.due_ms + period;
                    t.due_ms = if next <= now_ms { now_ms + period } else { next };
                    true
                }
                None => false,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        q.schedule_once(100.0, TimerKind::Seed);
        let mut out = Vec::new();

        q.fire_due(99.0, &mut out);
        assert!(out.is_empty());
        q.fire_due(100.0, &mut out);
        assert_eq!(out, vec![TimerKind::Seed]);
        assert!(q.is_empty());

        out.clear();
        q.fire_due(1000.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn repeating_timer_keeps_its_cadence() {
        let mut q = TimerQueue::new();
        q.schedule_every(2000.0, 2000.0, TimerKind::Ambient);
        let mut out = Vec::new();
        for now in [1999.0, 2000.0, 3000.0, 4001.0, 5999.0, 6000.0] {
            q.fire_due(now, &mut out);
        }
        assert_eq!(out.len(), 3);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn late_frame_does_not_replay_backlog() {
        let mut q = TimerQueue::new();
        q.schedule_every(100.0, 100.0, TimerKind::Ambient);
        let mut out = Vec::new();
        q.fire_due(1050.0, &mut out);
        assert_eq!(out.len(), 1);
        out.clear();
        q.fire_due(1100.0, &mut out);
        assert!(out.is_empty());
        q.fire_due(1150.0, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn due_timers_fire_in_time_order() {
        let mut q = TimerQueue::new();
        q.schedule_once(300.0, TimerKind::Ambient);
        q.schedule_once(0.0, TimerKind::Seed);
        let mut out = Vec::new();
        q.fire_due(500.0, &mut out);
        assert_eq!(out, vec![TimerKind::Seed, TimerKind::Ambient]);
    }

    #[test]
    fn cancel_and_clear_remove_timers() {
        let mut q = TimerQueue::new();
        let a = q.schedule_once(10.0, TimerKind::Seed);
        q.schedule_every(10.0, 10.0, TimerKind::Ambient);
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.len(), 1);
        q.clear();
        let mut out = Vec::new();
        q.fire_due(1.0e9, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn firing_reuses_its_buffer() {
        let mut q = TimerQueue::new();
        q.schedule_every(0.0, 10.0, TimerKind::Ambient);
        q.schedule_every(5.0, 10.0, TimerKind::Seed);
        let mut out = Vec::new();

        q.fire_due(5.0, &mut out);
        let capacity = q.scratch.capacity();
        let ptr = q.scratch.as_ptr();
        for n in 1..100 {
            q.fire_due(5.0 + 10.0 * n as f64, &mut out);
        }
        assert_eq!(out.len(), 200);
        assert!(q.scratch.is_empty());
        assert_eq!(q.scratch.capacity(), capacity);
        assert_eq!(q.scratch.as_ptr(), ptr);
    }
}
