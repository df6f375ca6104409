use gridsolve_core::CoreError;

/// Errors returned by the solver entry points.
///
/// A puzzle without solutions is not an error; it is reported as `None` or
/// a count of `0`.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// The puzzle description itself is malformed.
    #[display("invalid puzzle: {_0}")]
    Core(#[from] CoreError),
    /// The alphabet does not have one symbol per grid column.
    #[display("alphabet has {alphabet_len} symbols but the grid edge is {edge}")]
    AlphabetMismatch {
        /// Number of symbols in the alphabet.
        alphabet_len: usize,
        /// Edge length of the grid shape.
        edge: usize,
    },
    /// A fixed-task schedule was requested with no tasks.
    #[display("fixed-task scheduling needs at least one task")]
    ZeroTaskCount,
    /// The worker thread pool could not be started.
    #[display("failed to start worker threads: {_0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
