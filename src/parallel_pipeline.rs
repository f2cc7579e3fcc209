// THEORY:
// `ParallelComparator` produces exactly the same `DifferenceReport` as the synchronous
// `ImageComparator`, but spreads the work over a pool of tokio worker tasks.
//
// Work unit: one row of chunk pairs. The caller slices both frames into rows, a single
// dispatcher hands rows to workers round-robin, and every row carries its own oneshot
// reply channel. Replies are awaited in row order with `join_all`, so the ΔE map is
// assembled in the same row-major order regardless of which worker finished first.
//
// Lifecycle: the pool must be created inside a tokio runtime. Dropping the comparator
// closes the task channel, which ends the dispatcher and then every worker; `shutdown`
// does the same and waits for them to finish.

use crate::core_modules::chunk::chunk::Chunk;
use crate::core_modules::formula::Formula;
use crate::core_modules::grid_manager::GridManager;
use crate::core_modules::lab::lab::Weights;
use crate::core_modules::numeric::DeltaE;
use crate::error::{CompareError, CompareResult};
use crate::pipeline::{
    ComparisonConfig, DifferenceReport, check_chunk_size, check_dimensions, compare_chunks,
};
use futures::future::join_all;
use image::RgbaImage;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

pub struct RowTask {
    pub row: u32,
    pub pairs: Vec<(Chunk, Chunk)>,
    pub result_sender: oneshot::Sender<Vec<DeltaE>>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<RowTask>,
    dispatcher: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(worker_count: usize, formula: Formula, weights: Weights) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<RowTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<RowTask>())
            .unzip();

        let dispatcher = tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                trace!(
                    row = task.row,
                    chunks = task.pairs.len(),
                    worker = worker_idx,
                    "dispatching chunk row"
                );
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        let workers = worker_receivers
            .into_iter()
            .map(|mut worker_receiver| {
                tokio::spawn(async move {
                    while let Some(task) = worker_receiver.recv().await {
                        let deltas = task
                            .pairs
                            .iter()
                            .map(|(reference, sample)| {
                                compare_chunks(reference, sample, formula, &weights)
                            })
                            .collect();
                        let _ = task.result_sender.send(deltas);
                    }
                })
            })
            .collect();

        Self {
            task_sender,
            dispatcher,
            workers,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn submit(
        &self,
        row: u32,
        pairs: Vec<(Chunk, Chunk)>,
    ) -> CompareResult<oneshot::Receiver<Vec<DeltaE>>> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(RowTask {
                row,
                pairs,
                result_sender,
            })
            .map_err(|_| CompareError::WorkerUnavailable)?;
        Ok(result_receiver)
    }

    pub async fn shutdown(self) {
        drop(self.task_sender);
        let _ = self.dispatcher.await;
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

pub struct ParallelComparator {
    config: ComparisonConfig,
    worker_pool: WorkerPool,
}

impl ParallelComparator {
    /// One worker per logical CPU.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since the worker tasks are spawned here.
    pub fn new(config: ComparisonConfig) -> CompareResult<Self> {
        Self::with_workers(config, num_cpus::get())
    }

    /// Starts `worker_count` workers (at least one).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn with_workers(config: ComparisonConfig, worker_count: usize) -> CompareResult<Self> {
        check_chunk_size(&config)?;
        let worker_pool = WorkerPool::new(worker_count, config.formula, config.weights);
        debug!(?config, workers = worker_pool.worker_count(), "parallel comparator ready");
        Ok(Self {
            config,
            worker_pool,
        })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.worker_pool.worker_count()
    }

    pub async fn compare(
        &self,
        reference: &RgbaImage,
        sample: &RgbaImage,
    ) -> CompareResult<DifferenceReport> {
        check_dimensions(reference, sample)?;
        self.compare_raw(
            reference.width(),
            reference.height(),
            reference.as_raw(),
            sample.as_raw(),
        )
        .await
    }

    pub async fn compare_raw(
        &self,
        width: u32,
        height: u32,
        reference: &[u8],
        sample: &[u8],
    ) -> CompareResult<DifferenceReport> {
        let grid = GridManager::new(
            width,
            height,
            self.config.chunk_width,
            self.config.chunk_height,
        )?;
        grid.check_frame(reference)?;
        grid.check_frame(sample)?;

        let mut receivers = Vec::with_capacity(grid.grid_height() as usize);
        for chunk_y in 0..grid.grid_height() {
            let pairs = grid
                .extract_row(reference, chunk_y)
                .into_iter()
                .zip(grid.extract_row(sample, chunk_y))
                .collect();
            receivers.push(self.worker_pool.submit(chunk_y, pairs)?);
        }

        let mut chunk_deltas = Vec::with_capacity(grid.chunk_count());
        for row in join_all(receivers).await {
            chunk_deltas.extend(row.map_err(|_| CompareError::WorkerUnavailable)?);
        }

        Ok(DifferenceReport::from_deltas(
            &self.config,
            grid.grid_width(),
            grid.grid_height(),
            chunk_deltas,
        ))
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}
