use std::{pin::Pin, task::Context};

use futures::Future;

pub type BoxFuture<T> = futures::future::BoxFuture<'static, T>;

/// Future polled once per frame with a noop waker. The egui event loop keeps
/// repainting, so no waker wiring is needed.
pub struct AsyncTask<T>(BoxFuture<T>);

impl<T> AsyncTask<T> {
    pub fn new(future: BoxFuture<T>) -> Self {
        Self(future)
    }

    /// Returns the result exactly once, when the future completes.
    pub fn data(&mut self) -> Option<T> {
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(&waker);
        match Pin::new(&mut self.0).poll(&mut cx) {
            std::task::Poll::Ready(r) => Some(r),
            std::task::Poll::Pending => None,
        }
    }
}

/// Like [`AsyncTask`], but keeps the completed value so every later frame can
/// borrow it (used for upload results rendered in the menu).
pub enum AsyncRefTask<T> {
    Pending(AsyncTask<T>),
    Ready(T),
}

impl<T> AsyncRefTask<T> {
    pub fn new(future: BoxFuture<T>) -> Self {
        Self::Pending(AsyncTask::new(future))
    }

    pub fn new_ready(value: T) -> Self {
        Self::Ready(value)
    }

    pub fn data(&mut self) -> Option<&mut T> {
        if let AsyncRefTask::Pending(task) = self {
            match task.data() {
                Some(value) => *self = Self::Ready(value),
                None => return None,
            }
        }
        match self {
            AsyncRefTask::Ready(value) => Some(value),
            AsyncRefTask::Pending(_) => unreachable!("resolved above"),
        }
    }
}
