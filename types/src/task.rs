use std::fmt;
use std::sync::Arc;

/// A zero-argument unit of work handed to a dispatcher.
///
/// Tasks are shared handles: cloning a `Task` clones the handle, not the
/// closure. A recording dispatcher keeps one clone in its log and runs
/// another, so the same task may legitimately run more than once.
#[derive(Clone)]
pub struct Task(Arc<dyn Fn() + Send + Sync>);

impl Task {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A task that does nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn run(&self) {
        (self.0)();
    }

    /// Whether both handles point at the same closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Task) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Task(..)")
    }
}

impl<F> From<F> for Task
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
