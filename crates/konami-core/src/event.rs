#![forbid(unsafe_code)]

//! Cheat events and the listener bus that publishes them.
//!
//! Every fired cheat produces one [`CheatEvent`]. Listeners are called
//! synchronously, in the order they subscribed, from inside the keystroke
//! call that fired the cheat. Channel subscribers receive a clone of each
//! event and are dropped from the bus once their receiver goes away.

use std::fmt;
use std::sync::mpsc;

use crate::cheat::Cheat;

/// What a fired cheat did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheatEventKind {
    /// The activation code fired; regular cheats work from now on.
    Activation,
    /// The deactivation code fired; regular cheats are gated from now on.
    Deactivation,
    /// A regular cheat fired.
    CheatTriggered,
}

impl CheatEventKind {
    /// Whether this is the activation or deactivation kind.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Activation | Self::Deactivation)
    }

    /// Stable upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activation => "ACTIVATION",
            Self::Deactivation => "DEACTIVATION",
            Self::CheatTriggered => "CHEAT_TRIGGERED",
        }
    }
}

impl fmt::Display for CheatEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a fired cheat.
#[derive(Debug, Clone)]
pub struct CheatEvent {
    /// What kind of cheat fired.
    pub kind: CheatEventKind,
    /// The cheat that fired.
    pub cheat: Cheat,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CheatEvent) + Send>;

enum Sink {
    Callback(Listener),
    Channel(mpsc::Sender<CheatEvent>),
}

/// Ordered list of event subscribers.
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<(ListenerId, Sink)>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CheatEvent) + Send + 'static,
    {
        self.push(Sink::Callback(Box::new(listener)))
    }

    /// Add a channel subscriber and return its receiving end.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<CheatEvent> {
        let (tx, rx) = mpsc::channel();
        self.push(Sink::Channel(tx));
        rx
    }

    /// Remove a subscriber. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every subscriber in subscription order.
    pub fn emit(&mut self, event: &CheatEvent) {
        self.sinks.retain_mut(|(_, sink)| match sink {
            Sink::Callback(listener) => {
                listener(event);
                true
            }
            // A dropped receiver disconnects the channel.
            Sink::Channel(tx) => tx.send(event.clone()).is_ok(),
        });
    }

    fn push(&mut self, sink: Sink) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.sinks.push((id, sink));
        id
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn event(code: &str, kind: CheatEventKind) -> CheatEvent {
        CheatEvent {
            kind,
            cheat: Cheat::new(code).with_message("m"),
        }
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            bus.subscribe(move |ev| log.lock().unwrap().push(format!("{tag}:{}", ev.cheat.code())));
        }

        bus.emit(&event("abc", CheatEventKind::CheatTriggered));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:abc", "second:abc", "third:abc"]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();
        let c = Arc::clone(&count);
        let id = bus.subscribe(move |_| *c.lock().unwrap() += 1);

        bus.emit(&event("a", CheatEventKind::CheatTriggered));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&event("a", CheatEventKind::CheatTriggered));

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn channel_receives_events() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe_channel();

        bus.emit(&event("on", CheatEventKind::Activation));
        let got = rx.try_recv().unwrap();
        assert_eq!(got.kind, CheatEventKind::Activation);
        assert_eq!(got.cheat.code(), "on");
    }

    #[test]
    fn dropped_channel_is_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe_channel();
        bus.subscribe(|_| {});
        assert_eq!(bus.len(), 2);

        drop(rx);
        bus.emit(&event("x", CheatEventKind::CheatTriggered));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn kind_names() {
        assert_eq!(CheatEventKind::Activation.to_string(), "ACTIVATION");
        assert_eq!(CheatEventKind::Deactivation.as_str(), "DEACTIVATION");
        assert_eq!(CheatEventKind::CheatTriggered.as_str(), "CHEAT_TRIGGERED");
        assert!(CheatEventKind::Activation.is_special());
        assert!(!CheatEventKind::CheatTriggered.is_special());
    }
}
