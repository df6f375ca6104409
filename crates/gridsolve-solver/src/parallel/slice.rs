/// Lifecycle state of a [`Slice`] or a
/// [`SliceExecutionController`](super::SliceExecutionController).
///
/// Slices move from `Pending` through `InProgress` to `Finished` or
/// `Interrupted`. Controllers start in `Initialization` instead of
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum ExecutionStatus {
    /// A controller is still accepting slices.
    #[display("initialization")]
    Initialization,
    /// A slice is queued and has not been claimed.
    #[display("pending")]
    Pending,
    /// Work is running.
    #[display("in progress")]
    InProgress,
    /// Work ran to completion.
    #[display("finished")]
    Finished,
    /// Work stopped early because of an interrupt; results are partial.
    #[display("interrupted")]
    Interrupted,
}

impl ExecutionStatus {
    /// Returns `true` for the two terminal states.
    #[must_use]
    #[inline]
    pub fn is_settled(self) -> bool {
        self.is_finished() || self.is_interrupted()
    }
}

/// A unit of parallel work: an input, a lifecycle, and eventually a result.
///
/// Every transition checks the current state and panics when called out of
/// order.
///
/// # Examples
///
/// ```
/// use gridsolve_solver::{ExecutionStatus, Slice};
///
/// let mut slice: Slice<u32, u64> = Slice::new(21);
/// let input = slice.start();
/// slice.finish(u64::from(input) * 2);
///
/// assert_eq!(slice.status(), ExecutionStatus::Finished);
/// assert_eq!(slice.result(), &42);
/// ```
#[derive(Debug)]
pub struct Slice<S, T> {
    input: Option<S>,
    status: ExecutionStatus,
    result: Option<T>,
}

impl<S, T> Slice<S, T> {
    /// Creates a pending slice holding `input`.
    #[must_use]
    pub fn new(input: S) -> Self {
        Self {
            input: Some(input),
            status: ExecutionStatus::Pending,
            result: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    #[inline]
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns the input of a slice that has not been started.
    #[must_use]
    pub fn input(&self) -> Option<&S> {
        self.input.as_ref()
    }

    /// Moves the slice to `InProgress` and hands out its input.
    ///
    /// # Panics
    ///
    /// Panics unless the slice is `Pending`.
    pub fn start(&mut self) -> S {
        assert!(
            self.status.is_pending(),
            "cannot start a slice that is {}",
            self.status
        );
        self.status = ExecutionStatus::InProgress;
        match self.input.take() {
            Some(input) => input,
            None => unreachable!("pending slice without input"),
        }
    }

    /// Records a complete result.
    ///
    /// # Panics
    ///
    /// Panics unless the slice is `InProgress`.
    pub fn finish(&mut self, result: T) {
        self.settle(ExecutionStatus::Finished, result);
    }

    /// Records a partial result cut short by an interrupt.
    ///
    /// # Panics
    ///
    /// Panics unless the slice is `InProgress`.
    pub fn interrupt(&mut self, result: T) {
        self.settle(ExecutionStatus::Interrupted, result);
    }

    fn settle(&mut self, status: ExecutionStatus, result: T) {
        assert!(
            self.status.is_in_progress(),
            "cannot settle a slice that is {}",
            self.status
        );
        self.status = status;
        self.result = Some(result);
    }

    /// Returns the recorded result.
    ///
    /// # Panics
    ///
    /// Panics unless the slice is `Finished` or `Interrupted`.
    #[must_use]
    pub fn result(&self) -> &T {
        match &self.result {
            Some(result) if self.status.is_settled() => result,
            _ => panic!("slice has no result while {}", self.status),
        }
    }

    /// Consumes the slice and returns its result.
    ///
    /// # Panics
    ///
    /// Panics unless the slice is `Finished` or `Interrupted`.
    #[must_use]
    pub fn into_result(self) -> T {
        match self.result {
            Some(result) if self.status.is_settled() => result,
            _ => panic!("slice has no result while {}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_finished() {
        let mut slice: Slice<&str, usize> = Slice::new("abc");
        assert!(slice.status().is_pending());
        assert_eq!(slice.input(), Some(&"abc"));

        let input = slice.start();
        assert!(slice.status().is_in_progress());
        assert_eq!(slice.input(), None);

        slice.finish(input.len());
        assert!(slice.status().is_finished());
        assert_eq!(slice.into_result(), 3);
    }

    #[test]
    fn test_lifecycle_interrupted() {
        let mut slice: Slice<(), usize> = Slice::new(());
        slice.start();
        slice.interrupt(7);
        assert!(slice.status().is_interrupted());
        assert!(slice.status().is_settled());
        assert_eq!(slice.result(), &7);
    }

    #[test]
    #[should_panic(expected = "cannot start a slice that is in progress")]
    fn test_start_twice_panics() {
        let mut slice: Slice<(), ()> = Slice::new(());
        slice.start();
        slice.start();
    }

    #[test]
    #[should_panic(expected = "cannot settle a slice that is pending")]
    fn test_finish_before_start_panics() {
        let mut slice: Slice<(), ()> = Slice::new(());
        slice.finish(());
    }

    #[test]
    #[should_panic(expected = "cannot settle a slice that is finished")]
    fn test_finish_twice_panics() {
        let mut slice: Slice<(), ()> = Slice::new(());
        slice.start();
        slice.finish(());
        slice.interrupt(());
    }

    #[test]
    #[should_panic(expected = "slice has no result while in progress")]
    fn test_result_before_settled_panics() {
        let mut slice: Slice<(), ()> = Slice::new(());
        slice.start();
        let _result = slice.result();
    }
}
