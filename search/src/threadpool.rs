use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Sender};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed pool of worker threads draining a shared job channel. The search
/// dispatches one job per root move; recursion inside a job stays sequential.
pub struct ThreadPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool with the given number of workers, at least one.
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = unbounded::<Job>();

        let workers = (0..size.max(1))
            .map(|_| {
                let receiver = receiver.clone();
                thread::spawn(move || {
                    while let Ok(job) = receiver.recv() {
                        job();
                    }
                })
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Creates a pool with one worker per available hardware thread.
    pub fn with_hardware_threads() -> Self {
        let threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self::new(threads)
    }

    /// Submits a job for execution on one of the workers.
    pub fn execute<F: FnOnce() + Send + 'static>(&self, job: F) {
        self.sender
            .as_ref()
            .expect("pool is shutting down")
            .send(Box::new(job))
            .expect("workers are gone");
    }
}

impl Drop for ThreadPool {
    /// Closes the channel and waits for the workers to finish their last jobs.
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            worker.join().unwrap();
        }
    }
}
