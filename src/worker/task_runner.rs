//! Task runner - main worker loop

use crate::broker::{PollOutcome, TaskSource};
use crate::error::{ErrorKind, Result};
use crate::worker::{TaskProcessor, WorkerConfig, WorkerStats};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What a single loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// No message (poll timeout or end of partition)
    Idle,
    /// A response was published
    Completed,
    /// The message was dropped without a response
    Discarded(ErrorKind),
}

/// Task runner that polls the request topic and processes messages one by one
pub struct TaskRunner {
    config: WorkerConfig,
    source: Box<dyn TaskSource>,
    processor: TaskProcessor,
    shutdown: Arc<AtomicBool>,
    stats: WorkerStats,
}

impl TaskRunner {
    /// Create a new task runner
    pub fn new(config: WorkerConfig, source: Box<dyn TaskSource>, processor: TaskProcessor) -> Self {
        Self {
            config,
            source,
            processor,
            shutdown: Arc::new(AtomicBool::new(false)),
            stats: WorkerStats::default(),
        }
    }

    /// Get a handle to signal shutdown
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// Main worker loop
    ///
    /// Runs until shutdown is signaled or the broker fails. The source is
    /// closed exactly once on either path before this returns. A broker
    /// failure is returned as `Err` so the process can decide whether to restart.
    pub async fn run(mut self) -> Result<WorkerStats> {
        info!("Starting translation worker...");
        info!("Poll timeout: {:?}", self.config.poll_timeout);
        info!("Response topic: {}", self.config.response_topic);

        let result = self.run_loop().await;
        self.source.close();

        info!(
            received = self.stats.received,
            completed = self.stats.completed,
            malformed = self.stats.malformed,
            invalid = self.stats.invalid,
            failed = self.stats.failed,
            discarded = self.stats.discarded(),
            "Worker stopped"
        );

        result.map(|()| self.stats)
    }

    async fn run_loop(&mut self) -> Result<()> {
        loop {
            // Only checked between messages, never mid-translation
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Shutdown signal received, stopping worker...");
                return Ok(());
            }

            if let Err(e) = self.process_next().await {
                error!("Consumer error: {}", e);
                return Err(e);
            }
        }
    }

    /// Poll once and handle whatever arrived
    ///
    /// Returns:
    /// - Ok(Idle) if nothing arrived
    /// - Ok(Completed) if a response was published
    /// - Ok(Discarded(kind)) if the message was dropped
    /// - Err on a broker failure (fatal)
    pub async fn process_next(&mut self) -> Result<Iteration> {
        let payload = match self.source.poll(self.config.poll_timeout).await? {
            PollOutcome::NoMessage => return Ok(Iteration::Idle),
            PollOutcome::EndOfPartition => {
                debug!("End of partition, waiting for new messages");
                return Ok(Iteration::Idle);
            }
            PollOutcome::Message(payload) => payload,
        };

        self.stats.received += 1;

        match self.processor.process(&payload).await {
            Ok(response) => {
                self.stats.completed += 1;
                info!("Sent response for request {}", response.id);
                Ok(Iteration::Completed)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                let kind = e.kind();
                self.stats.record_discard(kind);
                match kind {
                    ErrorKind::MalformedMessage | ErrorKind::InvalidRequest => {
                        warn!(kind = %kind, "Discarding message: {}", e)
                    }
                    _ => error!(kind = %kind, "Failed to process message: {}", e),
                }
                Ok(Iteration::Discarded(kind))
            }
        }
    }

    /// Handle a single poll and exit (for testing with --once)
    pub async fn run_once(mut self) -> Result<Iteration> {
        info!("Running worker in single-message mode...");
        let result = self.process_next().await;
        self.source.close();
        result
    }
}

/// Setup signal handlers for graceful shutdown
pub fn setup_signal_handler(shutdown: Arc<AtomicBool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, finishing current message before shutdown...");
                shutdown.store(true, Ordering::Relaxed);
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });
}
