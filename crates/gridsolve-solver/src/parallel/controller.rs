use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use log::{debug, trace};
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{ExecutionStatus, Slice};
use crate::search::Interrupt;

/// How slices are mapped onto worker tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// One task per slice, each processing exactly the slice it claims.
    OneSlicePerTask,
    /// A fixed pool of tasks, each claiming slices until none are left.
    FixedNumberOfTasks {
        /// Number of tasks, and of worker threads.
        task_count: usize,
    },
}

/// Shared stop request for a parallel run.
///
/// Clones share the same flag, so a handle kept by the caller can stop a
/// run from another thread. Workers poll the flag between branches and
/// return what they have found so far.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    /// Creates a flag that is not set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag.
    pub fn interrupt(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once the flag has been set.
    #[must_use]
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Interrupt for InterruptFlag {
    #[inline]
    fn is_interrupted(&self) -> bool {
        InterruptFlag::is_interrupted(self)
    }
}

/// Handle to a slice claimed with
/// [`SliceExecutionController::take_slice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceId(usize);

impl SliceId {
    /// Returns the slice's position in creation order.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Runs a set of [`Slice`]s on a pool of worker tasks.
///
/// A controller is filled with slices while in `Initialization`, then
/// [`process_all_slices`](Self::process_all_slices) runs the workers and
/// blocks until every one of them has returned. Workers claim slices with
/// [`take_slice`](Self::take_slice); each slice is handed out at most once.
/// Operations called in the wrong state panic.
///
/// # Examples
///
/// ```
/// use gridsolve_solver::{ExecutionMode, SliceExecutionController};
///
/// let mut controller = SliceExecutionController::new(ExecutionMode::FixedNumberOfTasks {
///     task_count: 2,
/// });
/// for n in 1..=10_u64 {
///     controller.create_slice(n);
/// }
/// controller.process_all_slices(|controller| {
///     while let Some(id) = controller.take_slice() {
///         let n = controller.start_slice(id);
///         controller.finish_slice(id, n * n);
///     }
/// })?;
///
/// assert!(controller.status().is_finished());
/// assert_eq!(controller.into_results().into_iter().sum::<u64>(), 385);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct SliceExecutionController<S, T> {
    mode: ExecutionMode,
    status: ExecutionStatus,
    slices: Vec<Mutex<Slice<S, T>>>,
    // Slices before this index have been taken; the rest are queued.
    next: AtomicUsize,
    interrupt: InterruptFlag,
}

impl<S, T> Default for SliceExecutionController<S, T> {
    fn default() -> Self {
        Self::new(ExecutionMode::OneSlicePerTask)
    }
}

impl<S, T> SliceExecutionController<S, T> {
    /// Creates an empty controller with its own interrupt flag.
    ///
    /// # Panics
    ///
    /// Panics if `mode` asks for zero fixed tasks.
    #[must_use]
    pub fn new(mode: ExecutionMode) -> Self {
        Self::with_interrupt(mode, InterruptFlag::new())
    }

    /// Creates an empty controller that observes `interrupt`.
    ///
    /// # Panics
    ///
    /// Panics if `mode` asks for zero fixed tasks.
    #[must_use]
    pub fn with_interrupt(mode: ExecutionMode, interrupt: InterruptFlag) -> Self {
        assert_valid_mode(mode);
        Self {
            mode,
            status: ExecutionStatus::Initialization,
            slices: Vec::new(),
            next: AtomicUsize::new(0),
            interrupt,
        }
    }

    /// Returns the scheduling mode.
    #[must_use]
    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Changes the scheduling mode.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is in `Initialization`, or if `mode`
    /// asks for zero fixed tasks.
    pub fn set_mode(&mut self, mode: ExecutionMode) {
        self.assert_status(ExecutionStatus::Initialization, "change the mode");
        assert_valid_mode(mode);
        self.mode = mode;
    }

    /// Returns the controller state.
    #[must_use]
    #[inline]
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns the number of slices created so far.
    #[must_use]
    #[inline]
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Returns the number of slices not yet claimed by a worker.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.slices.len() - self.taken_count()
    }

    /// Returns the number of slices claimed by a worker.
    #[must_use]
    pub fn taken_count(&self) -> usize {
        self.next.load(Ordering::Acquire).min(self.slices.len())
    }

    /// Returns the number of worker tasks a run spawns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        match self.mode {
            ExecutionMode::OneSlicePerTask => self.slices.len(),
            ExecutionMode::FixedNumberOfTasks { task_count } => task_count,
        }
    }

    /// Returns the interrupt flag workers poll.
    #[must_use]
    #[inline]
    pub fn interrupt_flag(&self) -> &InterruptFlag {
        &self.interrupt
    }

    /// Asks running workers to stop early.
    pub fn interrupt(&self) {
        debug!("interrupt requested");
        self.interrupt.interrupt();
    }

    /// Returns `true` once an interrupt has been requested.
    #[must_use]
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_interrupted()
    }

    /// Queues a new pending slice holding `input`.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is in `Initialization`.
    pub fn create_slice(&mut self, input: S) {
        self.enqueue_slice(Slice::new(input));
    }

    /// Queues an existing pending slice.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is in `Initialization` and the slice is
    /// `Pending`.
    pub fn enqueue_slice(&mut self, slice: Slice<S, T>) {
        self.assert_status(ExecutionStatus::Initialization, "add slices");
        assert!(
            slice.status().is_pending(),
            "cannot enqueue a slice that is {}",
            slice.status()
        );
        self.slices.push(Mutex::new(slice));
    }

    /// Runs `worker` once per task and waits for every task to return.
    ///
    /// The controller is `InProgress` while workers run, and ends
    /// `Interrupted` if an interrupt was requested by then, `Finished`
    /// otherwise. A task that panics still counts as returned; the panic is
    /// propagated once every task is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker threads cannot be started. The
    /// controller stays in `Initialization` in that case.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is in `Initialization`.
    pub fn process_all_slices<F>(&mut self, worker: F) -> Result<(), rayon::ThreadPoolBuildError>
    where
        F: Fn(&Self) + Sync,
        S: Send,
        T: Send,
    {
        self.assert_status(ExecutionStatus::Initialization, "start processing");

        let task_count = self.task_count();
        let threads = match self.mode {
            ExecutionMode::OneSlicePerTask => 0,
            ExecutionMode::FixedNumberOfTasks { task_count } => task_count,
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("gridsolve-worker-{i}"))
            .build()?;

        debug!(
            "processing {} slices with {task_count} tasks on {} threads",
            self.slices.len(),
            pool.current_num_threads()
        );
        self.status = ExecutionStatus::InProgress;

        let countdown = Countdown::new(task_count);
        let this = &*self;
        let worker = &worker;
        let countdown = &countdown;
        pool.in_place_scope(|scope| {
            for _ in 0..task_count {
                scope.spawn(move |_| {
                    let _signal = countdown.signal_on_drop();
                    worker(this);
                });
            }
            countdown.wait();
        });

        self.status = if self.is_interrupted() {
            ExecutionStatus::Interrupted
        } else {
            ExecutionStatus::Finished
        };
        debug!("slice processing {}", self.status);
        Ok(())
    }

    /// Claims the next queued slice, or returns `None` if none are left.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is `InProgress`.
    pub fn take_slice(&self) -> Option<SliceId> {
        self.assert_status(ExecutionStatus::InProgress, "take slices");
        let index = self.next.fetch_add(1, Ordering::AcqRel);
        (index < self.slices.len()).then_some(SliceId(index))
    }

    /// Starts a claimed slice and returns its input.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is `InProgress` and the slice is
    /// `Pending`.
    pub fn start_slice(&self, id: SliceId) -> S {
        self.assert_status(ExecutionStatus::InProgress, "start slices");
        self.lock(id).start()
    }

    /// Records the result of a started slice.
    ///
    /// The slice becomes `Interrupted` if an interrupt has been requested,
    /// `Finished` otherwise.
    ///
    /// # Panics
    ///
    /// Panics unless the controller and the slice are `InProgress`.
    pub fn finish_slice(&self, id: SliceId, result: T) {
        self.assert_status(ExecutionStatus::InProgress, "finish slices");
        let mut slice = self.lock(id);
        if self.is_interrupted() {
            slice.interrupt(result);
        } else {
            slice.finish(result);
        }
        trace!("slice {} {}", id.index(), slice.status());
    }

    /// Returns the state of every slice in creation order.
    #[must_use]
    pub fn slice_statuses(&self) -> Vec<ExecutionStatus> {
        self.slices
            .iter()
            .map(|slice| {
                slice
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .status()
            })
            .collect()
    }

    /// Consumes the controller and returns the result of every settled
    /// slice in creation order.
    ///
    /// # Panics
    ///
    /// Panics unless the controller is `Finished` or `Interrupted`.
    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        assert!(
            self.status.is_settled(),
            "cannot collect results in the {} state",
            self.status
        );
        self.slices
            .into_iter()
            .map(|slice| slice.into_inner().unwrap_or_else(PoisonError::into_inner))
            .filter(|slice| slice.status().is_settled())
            .map(Slice::into_result)
            .collect()
    }

    fn lock(&self, id: SliceId) -> MutexGuard<'_, Slice<S, T>> {
        self.slices[id.0]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[track_caller]
    fn assert_status(&self, expected: ExecutionStatus, action: &str) {
        assert!(
            self.status == expected,
            "cannot {action} in the {} state",
            self.status
        );
    }
}

fn assert_valid_mode(mode: ExecutionMode) {
    assert!(
        mode != ExecutionMode::FixedNumberOfTasks { task_count: 0 },
        "fixed-task mode needs at least one task"
    );
}

/// Blocks a thread until a fixed number of signals have arrived.
#[derive(Debug)]
struct Countdown {
    remaining: Mutex<usize>,
    zero: Condvar,
}

impl Countdown {
    fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            zero: Condvar::new(),
        }
    }

    fn signal(&self) {
        let mut remaining = self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        assert!(*remaining > 0, "countdown signalled too often");
        *remaining -= 1;
        if *remaining == 0 {
            self.zero.notify_all();
        }
    }

    /// Returns a guard that signals when dropped, unwinding included.
    fn signal_on_drop(&self) -> CountdownSignal<'_> {
        CountdownSignal(self)
    }

    fn wait(&self) {
        let mut remaining = self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *remaining > 0 {
            remaining = self
                .zero
                .wait(remaining)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

struct CountdownSignal<'a>(&'a Countdown);

impl Drop for CountdownSignal<'_> {
    fn drop(&mut self) {
        self.0.signal();
    }
}
