//! Presentation-layer callbacks.

/// Receives list snapshots and user-facing error messages.
pub trait ListObserver<T> {
    /// Called after every load, create, delete and toggle.
    fn on_list_changed(&mut self, list: &[T]);
    /// Called once per failed store operation.
    fn on_error(&mut self, message: &str);
}

impl<T, O: ListObserver<T> + ?Sized> ListObserver<T> for &mut O {
    fn on_list_changed(&mut self, list: &[T]) {
        (**self).on_list_changed(list);
    }

    fn on_error(&mut self, message: &str) {
        (**self).on_error(message);
    }
}

/// Observer for headless callers that read lists from return values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<T> ListObserver<T> for NoopObserver {
    fn on_list_changed(&mut self, _list: &[T]) {}

    fn on_error(&mut self, _message: &str) {}
}

/// Observer that keeps every snapshot and error it receives.
#[derive(Debug, Clone)]
pub struct RecordingObserver<T> {
    pub snapshots: Vec<Vec<T>>,
    pub errors: Vec<String>,
}

impl<T> RecordingObserver<T> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn last_snapshot(&self) -> Option<&[T]> {
        self.snapshots.last().map(Vec::as_slice)
    }

    /// Removes and returns recorded errors.
    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ListObserver<T> for RecordingObserver<T> {
    fn on_list_changed(&mut self, list: &[T]) {
        self.snapshots.push(list.to_vec());
    }

    fn on_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
