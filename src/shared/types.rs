use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::ws::message::Message;

pub type StdResult<T, E> = std::result::Result<T, E>;

pub type MessageReceiver = UnboundedReceiver<Message>;
pub type MessageSender = UnboundedSender<Message>;
