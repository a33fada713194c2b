use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::domain::{sample_todos, Todo};

/// Outcome of polling a [`SeedLoader`].
#[derive(Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded(Vec<Todo>),
    /// The loader went away without delivering anything
    Disconnected,
}

/// Delivers the initial todo items from a background thread.
///
/// The event loop keeps drawing the loading indicator while
/// [`poll`](SeedLoader::poll) reports [`LoadStatus::Pending`].
pub struct SeedLoader {
    receiver: Receiver<Vec<Todo>>,
    handle: Option<JoinHandle<()>>,
}

impl SeedLoader {
    /// Starts loading the sample set after `delay`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the loader thread cannot be spawned.
    pub fn spawn(delay: Duration) -> io::Result<Self> {
        Self::spawn_with(delay, sample_todos)
    }

    /// Runs `load` on a background thread after `delay`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the loader thread cannot be spawned.
    pub fn spawn_with<F>(delay: Duration, load: F) -> io::Result<Self>
    where
        F: FnOnce() -> Vec<Todo> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("seed-loader".to_string())
            .spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                let seed = load();
                log::info!("Seed loader produced {} todos", seed.len());
                if sender.send(seed).is_err() {
                    log::debug!("Seed loader finished after the receiver was dropped");
                }
            })?;

        log::info!("Seed loader started with {:?} delay", delay);
        Ok(Self {
            receiver,
            handle: Some(handle),
        })
    }

    /// Checks for the seed without blocking.
    pub fn poll(&mut self) -> LoadStatus {
        match self.receiver.try_recv() {
            Ok(seed) => {
                self.join();
                LoadStatus::Loaded(seed)
            }
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.join();
                LoadStatus::Disconnected
            }
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Seed loader thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;
    use std::time::Instant;

    fn wait_for(loader: &mut SeedLoader) -> LoadStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match loader.poll() {
                LoadStatus::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5))
                }
                status => return status,
            }
        }
    }

    #[test]
    fn test_loader_delivers_sample_set() {
        let mut loader = SeedLoader::spawn(Duration::ZERO).unwrap();
        match wait_for(&mut loader) {
            LoadStatus::Loaded(seed) => {
                let ids: Vec<TodoId> = seed.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![TodoId(1), TodoId(2), TodoId(3)]);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_loader_is_pending_during_delay() {
        let mut loader = SeedLoader::spawn(Duration::from_secs(2)).unwrap();
        assert_eq!(loader.poll(), LoadStatus::Pending);
    }

    #[test]
    fn test_loader_reports_disconnect_on_panic() {
        let mut loader = SeedLoader::spawn_with(Duration::ZERO, || panic!("no seed")).unwrap();
        assert_eq!(wait_for(&mut loader), LoadStatus::Disconnected);
    }

    #[test]
    fn test_loader_custom_seed() {
        let mut loader = SeedLoader::spawn_with(Duration::ZERO, Vec::new).unwrap();
        assert_eq!(wait_for(&mut loader), LoadStatus::Loaded(Vec::new()));
    }
}
