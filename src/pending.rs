use std::sync::mpsc::{self, Receiver, TryRecvError};

/// State of a background job as seen from the UI thread.
pub enum Poll<T> {
    Waiting,
    Done(T),
    /// The worker went away without answering (it panicked).
    Lost,
}

/// A store call running on a worker thread. The UI polls it every frame and
/// the worker requests a repaint when it finishes, so the result is picked up
/// even if the view that started it has been closed.
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn(ctx: &egui::Context, job: impl FnOnce() -> T + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(job());
            ctx.request_repaint();
        });
        Self { rx }
    }

    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(value) => Poll::Done(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Lost,
        }
    }
}
