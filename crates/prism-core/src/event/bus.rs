// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// An unbounded event channel owned by the consumer that drains it.
///
/// Producers either call [`publish`](Self::publish) directly or keep a
/// [`sender`](Self::sender) clone. Events come out in publish order.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event, logging an error if the receiver is gone.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns the receiver end of the channel.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every event queued so far, without blocking.
    pub fn drain(&self) -> flume::TryIter<'_, T> {
        self.receiver.try_iter()
    }

    /// Number of events waiting to be drained.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Resized { width: u32, height: u32 },
        KeyPressed { key_code: u32 },
        Closed,
    }

    #[test]
    fn test_new_bus_is_empty() {
        let bus = EventBus::<TestEvent>::new();
        assert!(bus.is_empty());
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_drain_preserves_publish_order() {
        let bus = EventBus::new();
        let sender = bus.sender();

        bus.publish(TestEvent::Resized {
            width: 1,
            height: 1,
        });
        sender.send(TestEvent::KeyPressed { key_code: 7 }).unwrap();
        bus.publish(TestEvent::Closed);
        assert_eq!(bus.len(), 3);

        let events: Vec<_> = bus.drain().collect();
        assert_eq!(
            events,
            vec![
                TestEvent::Resized {
                    width: 1,
                    height: 1
                },
                TestEvent::KeyPressed { key_code: 7 },
                TestEvent::Closed,
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn test_send_from_thread() {
        let bus = EventBus::new();
        let sender = bus.sender();
        std::thread::spawn(move || sender.send(TestEvent::Closed).unwrap())
            .join()
            .unwrap();
        assert_eq!(bus.drain().next(), Some(TestEvent::Closed));
    }
}
