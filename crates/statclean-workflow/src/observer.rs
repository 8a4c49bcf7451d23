use crate::state::WorkflowSnapshot;

/// Receives a snapshot after every call that changed workflow state.
///
/// Observers run synchronously inside the mutating call. When the controller
/// sits behind a `WorkflowHandle` its lock is held, so an observer must not
/// call back into the same handle.
pub trait WorkflowObserver: Send + Sync {
    fn on_change(&self, snapshot: &WorkflowSnapshot);
}

impl<F> WorkflowObserver for F
where
    F: Fn(&WorkflowSnapshot) + Send + Sync,
{
    fn on_change(&self, snapshot: &WorkflowSnapshot) {
        self(snapshot);
    }
}
