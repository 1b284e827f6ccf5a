/// A single pending deferred task, polled against the frame clock.
///
/// Scheduling while a task is pending replaces it. At most one task is ever
/// outstanding, so repeated requests never stack.
#[derive(Debug)]
pub(crate) struct Deferred<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    due_at: f64,
    payload: T,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    pub(crate) fn schedule(&mut self, now: f64, delay_secs: f64, payload: T) -> bool {
        self.pending
            .replace(Pending {
                due_at: now + delay_secs.max(0.0),
                payload,
            })
            .is_some()
    }

    pub(crate) fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn poll(&mut self, now: f64) -> Option<T> {
        if !self.pending.as_ref().is_some_and(|pending| now >= pending.due_at) {
            return None;
        }
        self.pending.take().map(|pending| pending.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut task = Deferred::default();
        task.schedule(1.0, 0.5, "fit");

        assert_eq!(task.poll(1.2), None);
        assert_eq!(task.poll(1.5), Some("fit"));
        assert_eq!(task.poll(2.0), None);
        assert!(!task.is_pending());
    }

    #[test]
    fn newer_request_supersedes_pending_one() {
        let mut task = Deferred::default();
        assert!(!task.schedule(0.0, 0.1, 1));
        assert!(task.schedule(0.05, 0.1, 2));

        assert_eq!(task.poll(0.12), None);
        assert_eq!(task.poll(0.14), None);
        assert_eq!(task.poll(0.16), Some(2));
        assert_eq!(task.poll(10.0), None);
    }

    #[test]
    fn cancel_drops_pending_task() {
        let mut task = Deferred::default();
        task.schedule(0.0, 0.1, ());
        assert!(task.is_pending());
        assert!(task.cancel());
        assert!(!task.cancel());
        assert_eq!(task.poll(1.0), None);
    }
}
