use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::models::Job;

/// Simulated network latency for a reload.
pub const REFRESH_DELAY: Duration = Duration::from_millis(800);

struct Completion {
    generation: u64,
    jobs: Vec<Job>,
}

/// Reloads the job collection on a worker thread. Every request bumps a
/// generation counter; a completion tagged with anything but the latest
/// generation was superseded and is dropped on arrival, so overlapping
/// refreshes cannot race each other into the store.
pub struct Refresher {
    generation: u64,
    pending: bool,
    delay: Duration,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Refresher {
    pub fn new() -> Self {
        Self::with_delay(REFRESH_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generation: 0,
            pending: false,
            delay,
            tx,
            rx,
        }
    }

    /// Kicks off a reload; `load` produces the fresh job collection once
    /// the simulated latency elapses.
    pub fn request<F>(&mut self, load: F)
    where
        F: FnOnce() -> Vec<Job> + Send + 'static,
    {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            // The receiver outlives workers except during shutdown, where
            // dropping the result is exactly what we want.
            let _ = tx.send(Completion {
                generation,
                jobs: load(),
            });
        });
    }

    /// True from request until the matching completion lands. Stale
    /// completions do not clear this; the newest request is still out.
    pub fn in_flight(&self) -> bool {
        self.pending
    }

    /// Drains arrived completions, returning the fresh collection if the
    /// current generation has landed. Never blocks.
    pub fn poll(&mut self) -> Option<Vec<Job>> {
        let mut landed = None;
        while let Ok(completion) = self.rx.try_recv() {
            if completion.generation == self.generation {
                self.pending = false;
                landed = Some(completion.jobs);
            }
            // else: superseded, discard
        }
        landed
    }
}

impl Default for Refresher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use std::time::Instant;

    fn poll_until(refresher: &mut Refresher, timeout: Duration) -> Option<Vec<Job>> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(jobs) = refresher.poll() {
                return Some(jobs);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn refresh_lands_and_clears_busy() {
        let mut refresher = Refresher::with_delay(Duration::ZERO);
        assert!(!refresher.in_flight());

        refresher.request(seed::jobs);
        assert!(refresher.in_flight());

        let jobs = poll_until(&mut refresher, Duration::from_secs(2)).unwrap();
        assert_eq!(jobs.len(), seed::jobs().len());
        assert!(!refresher.in_flight());
    }

    #[test]
    fn superseded_refresh_is_discarded() {
        let mut refresher = Refresher::with_delay(Duration::ZERO);

        // First request is slow, second is instant; whatever order the
        // completions arrive in, only the second may land.
        refresher.request(|| {
            thread::sleep(Duration::from_millis(50));
            vec![]
        });
        refresher.request(seed::jobs);

        thread::sleep(Duration::from_millis(150));
        let jobs = refresher.poll().unwrap();
        assert_eq!(jobs.len(), seed::jobs().len());
        assert!(!refresher.in_flight());

        // Nothing further trickles in from the stale worker.
        thread::sleep(Duration::from_millis(50));
        assert!(refresher.poll().is_none());
    }

    #[test]
    fn transitions_keep_applying_while_a_refresh_is_pending() {
        use crate::store::Store;

        let mut store = Store::new(seed::snapshot());
        let mut refresher = Refresher::with_delay(Duration::from_millis(50));
        refresher.request(seed::jobs);

        let top = store.jobs()[0].id;
        store.delete_job(top);
        assert!(store.find_job(top).is_none());

        let jobs = poll_until(&mut refresher, Duration::from_secs(2)).unwrap();
        store.replace_jobs(jobs);
        // The landed refresh supersedes the session's deletions.
        assert!(store.find_job(top).is_some());
    }

    #[test]
    fn poll_without_request_is_quiet() {
        let mut refresher = Refresher::new();
        assert!(refresher.poll().is_none());
        assert!(!refresher.in_flight());
    }
}
