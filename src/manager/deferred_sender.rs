use std::fmt::Debug;

use flume::{Sender, TrySendError};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SingleOrMany<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> From<T> for SingleOrMany<T> {
    fn from(msg: T) -> Self {
        SingleOrMany::Single(msg)
    }
}

impl<T> From<Vec<T>> for SingleOrMany<T> {
    fn from(msgs: Vec<T>) -> Self {
        SingleOrMany::Many(msgs)
    }
}

impl<T> SingleOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            SingleOrMany::Single(msg) => vec![msg],
            SingleOrMany::Many(msgs) => msgs,
        }
    }
}

/// Collects the messages of one operation and sends them together when dropped
#[derive(Debug)]
pub struct DeferredSender<T>
where
    T: Debug + Send + Sync + 'static,
{
    sender: MessageSender<T>,
    buffer: Vec<T>,
}

impl<T> DeferredSender<T>
where
    T: Debug + Send + Sync + 'static,
{
    pub fn new(sender: MessageSender<T>) -> Self {
        Self { sender, buffer: vec![] }
    }

    pub fn queue(&mut self, message: T) {
        self.buffer.push(message);
    }
}

#[derive(Debug)]
pub struct MessageSender<T> {
    sender: Sender<SingleOrMany<T>>,
}

impl<T> Clone for MessageSender<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T> MessageSender<T>
where
    T: Debug + Send + Sync + 'static,
{
    pub fn new(sender: Sender<SingleOrMany<T>>) -> Self {
        Self { sender }
    }

    /// Never blocks, a full queue drops the message
    pub fn send(&self, message: impl Into<SingleOrMany<T>>) {
        let message = message.into();
        debug!("send: {message:?}");
        match self.sender.try_send(message) {
            Ok(_) => {}
            Err(TrySendError::Full(message)) => {
                warn!("unable to send, queue is full, dropping: {message:?}");
            }
            Err(e) => {
                error!("unable to send message to the frontend: {e:?}");
            }
        }
    }
}

impl<T> Drop for DeferredSender<T>
where
    T: Debug + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let mut msgs = std::mem::take(&mut self.buffer);
        match msgs.len() {
            0 => {}
            1 => {
                if let Some(msg) = msgs.pop() {
                    self.sender.send(SingleOrMany::Single(msg))
                }
            }
            _ => self.sender.send(SingleOrMany::Many(msgs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_sender_flushes_on_drop() {
        let (sender, receiver) = flume::bounded(10);
        let sender = MessageSender::new(sender);

        {
            let mut deferred = DeferredSender::new(sender.clone());
            deferred.queue(1);
            deferred.queue(2);
            assert!(receiver.is_empty());
        }

        assert_eq!(receiver.try_recv(), Ok(SingleOrMany::Many(vec![1, 2])));

        {
            let mut deferred = DeferredSender::new(sender.clone());
            deferred.queue(3);
        }

        assert_eq!(receiver.try_recv(), Ok(SingleOrMany::Single(3)));

        // nothing queued, nothing sent
        drop(DeferredSender::<i32>::new(sender));
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_full_queue_does_not_block() {
        let (sender, receiver) = flume::bounded(1);
        let sender = MessageSender::new(sender);

        sender.send(1);
        sender.send(2);

        assert_eq!(receiver.try_recv().map(SingleOrMany::into_vec), Ok(vec![1]));
        assert!(receiver.is_empty());
    }
}
