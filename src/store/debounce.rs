//! Restartable single-shot delay.
//!
//! Every schedule cancels the previously pending job and restarts the
//! timer, so a burst of calls runs exactly one job after the burst
//! settles. Dropping the debouncer flushes any pending job immediately,
//! which is what lets short-lived CLI invocations still take their
//! snapshot on exit.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Job = Box<dyn FnOnce() + Send>;

enum Message {
    Schedule(Job),
    Shutdown,
}

pub struct Debouncer {
    sender: Sender<Message>,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel::<Message>();

        let handle = thread::spawn(move || {
            let mut pending: Option<Job> = None;
            loop {
                let message = if pending.is_some() {
                    match receiver.recv_timeout(delay) {
                        Ok(message) => Some(message),
                        Err(RecvTimeoutError::Timeout) => {
                            if let Some(job) = pending.take() {
                                job();
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => None,
                    }
                } else {
                    receiver.recv().ok()
                };

                match message {
                    // A new job replaces the pending one and restarts the
                    // timer from zero.
                    Some(Message::Schedule(job)) => pending = Some(job),
                    Some(Message::Shutdown) | None => {
                        if let Some(job) = pending.take() {
                            job();
                        }
                        break;
                    }
                }
            }
        });

        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Replace any pending job and restart the delay.
    pub fn schedule<F: FnOnce() + Send + 'static>(&self, job: F) {
        // A send failure means the worker is gone; nothing useful to do.
        let _ = self.sender.send(Message::Schedule(Box::new(job)));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        let _ = self.sender.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
