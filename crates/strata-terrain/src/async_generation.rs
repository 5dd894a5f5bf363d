//! Asynchronous chunk generation on a fixed worker pool.
//!
//! Workers share one [`Generator`] (and with it one column cache), pull tasks
//! from a bounded queue, and deliver finished chunks through a bounded result
//! channel. Cancelled tasks are skipped before generation and their results
//! dropped after it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use dashmap::DashMap;
use strata_voxel::{Chunk, ChunkCoord};

use crate::generator::Generator;

/// A request to generate a single chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationTask {
    /// The chunk to generate.
    pub coord: ChunkCoord,
    /// Ordering hint for the host's submission queue, typically the squared
    /// distance to spawn. The pool runs tasks in submission order and does
    /// not read this field.
    pub priority: u64,
}

/// A fully generated chunk ready for insertion into the world.
#[derive(Debug)]
pub struct GeneratedChunk {
    /// The coordinate matching the original task.
    pub coord: ChunkCoord,
    /// The generated cells.
    pub chunk: Chunk,
    /// Generation time in microseconds.
    pub generation_time_us: u64,
}

/// Rejected submissions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The task queue is at capacity.
    #[error("generation queue full, chunk ({}, {}) rejected", .0.x, .0.z)]
    QueueFull(ChunkCoord),
    /// Every worker has exited.
    #[error("generation workers have shut down")]
    Disconnected,
}

/// Task plus its cancellation flag.
struct PendingTask {
    task: GenerationTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages asynchronous chunk generation across a thread pool.
pub struct AsyncChunkGenerator {
    task_sender: Sender<PendingTask>,
    result_receiver: Receiver<GeneratedChunk>,
    active_tasks: Arc<DashMap<ChunkCoord, Arc<AtomicBool>>>,
    in_flight: Arc<AtomicU64>,
}

impl AsyncChunkGenerator {
    /// Spawn `thread_count` workers generating with `generator`.
    ///
    /// At most `max_concurrent * 2` tasks wait in the queue; completed chunks
    /// buffer up to `result_capacity` before workers block.
    pub fn new(
        generator: Arc<Generator>,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> std::io::Result<Self> {
        let (task_sender, task_receiver) = bounded::<PendingTask>(max_concurrent.max(1) * 2);
        let (result_sender, result_receiver) = bounded::<GeneratedChunk>(result_capacity.max(1));
        let in_flight = Arc::new(AtomicU64::new(0));

        for index in 0..thread_count.max(1) {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let generator = Arc::clone(&generator);

            std::thread::Builder::new()
                .name(format!("strata-gen-{index}"))
                .spawn(move || {
                    while let Ok(pending) = receiver.recv() {
                        if pending.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let coord = pending.task.coord;
                        let start = std::time::Instant::now();
                        let chunk = generator.generate(coord.x, coord.z);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !pending.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(GeneratedChunk {
                                coord,
                                chunk,
                                generation_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })?;
        }

        tracing::debug!("Started {} generation workers", thread_count.max(1));

        Ok(Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        })
    }

    /// Pool sized to the machine, leaving two cores for the host.
    pub fn with_defaults(generator: Arc<Generator>) -> std::io::Result<Self> {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 2).max(1);
        Self::new(generator, threads, 64, 128)
    }

    /// Queue a chunk for background generation.
    pub fn submit(&self, task: GenerationTask) -> Result<(), SubmitError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(task.coord, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        self.task_sender
            .try_send(PendingTask { task, cancelled })
            .map_err(|e| {
                self.in_flight.fetch_sub(1, Ordering::Relaxed);
                self.active_tasks.remove(&task.coord);
                match e {
                    TrySendError::Full(_) => SubmitError::QueueFull(task.coord),
                    TrySendError::Disconnected(_) => SubmitError::Disconnected,
                }
            })
    }

    /// Cancel a pending or running task. A no-op once the task has completed.
    pub fn cancel(&self, coord: &ChunkCoord) {
        if let Some((_, cancelled)) = self.active_tasks.remove(coord) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Take every completed chunk out of the result channel.
    pub fn drain_results(&self) -> Vec<GeneratedChunk> {
        let mut results = Vec::new();
        while let Ok(generated) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&generated.coord);
            results.push(generated);
        }
        results
    }

    /// Number of tasks queued or executing.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a task for `coord` has been submitted and not yet drained.
    pub fn is_pending(&self, coord: &ChunkCoord) -> bool {
        self.active_tasks.contains_key(coord)
    }
}
