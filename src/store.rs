use std::collections::HashMap;
use std::sync::{mpsc, Arc, Weak};
use uuid::Uuid;

use crate::error::{Error, ErrorKind, Result};
use crate::event::EventRecord;
use crate::month_key::MonthKey;

/// Value carried by every publication. `None` means there is no list for the
/// month that was published.
pub type EventList = Option<Vec<EventRecord>>;

/// Events bucketed per month, with a replay-latest notification channel.
///
/// Every subscriber owns the receiving end of its own channel. A new
/// subscriber first receives the most recent publication and afterwards each
/// publication made while it is alive.
#[derive(Default)]
pub struct EventStore {
    events: HashMap<MonthKey, Vec<EventRecord>>,
    latest: EventList,
    subscribers: Vec<Subscriber>,
}

struct Subscriber {
    tx: mpsc::Sender<EventList>,
    // Dead once the matching `Subscription` is dropped.
    alive: Weak<()>,
}

pub struct Subscription {
    rx: mpsc::Receiver<EventList>,
    last_seen: EventList,
    _alive: Arc<()>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Appends `record` to the list under `key` and publishes that list.
    pub fn record_event(&mut self, key: MonthKey, record: EventRecord) -> Result<()> {
        if record.month_key() != key {
            return Err(Error::new(
                ErrorKind::KeyMismatch,
                &format!("'{}' is dated for {}, not {}", record.name(), record.month_key(), key),
            ));
        }

        log::info!("Recording event '{}' under {}", record.name(), key);

        let list = self.events.entry(key).or_insert_with(Vec::new);
        list.push(record);
        let published = Some(list.clone());

        self.publish(published);
        Ok(())
    }

    /// Removes the record with `id` from the list under `key` and publishes
    /// what remains.
    pub fn remove_event(&mut self, key: &MonthKey, id: &Uuid) -> Option<EventRecord> {
        let list = self.events.get_mut(key)?;
        let pos = list.iter().position(|record| record.id() == id)?;
        let removed = list.remove(pos);
        let published = Some(list.clone());

        log::info!("Removed event '{}' from {}", removed.name(), key);

        self.publish(published);
        Some(removed)
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.subscribers.retain(|subscriber| subscriber.alive.strong_count() > 0);

        let (tx, rx) = mpsc::channel();
        let alive = Arc::new(());

        // A fresh receiver is connected, so this send cannot fail.
        let _ = tx.send(self.latest.clone());
        self.subscribers.push(Subscriber {
            tx,
            alive: Arc::downgrade(&alive),
        });

        log::debug!("New subscriber, {} in total", self.subscribers.len());

        Subscription {
            rx,
            last_seen: None,
            _alive: alive,
        }
    }

    /// Re-publishes whatever is stored under `key`, e.g. after the displayed
    /// month changed.
    pub fn notify_active_month(&mut self, key: &MonthKey) {
        log::debug!("Active month is now {}", key);

        let published = self.events.get(key).cloned();
        self.publish(published);
    }

    pub fn events(&self, key: &MonthKey) -> Option<&[EventRecord]> {
        self.events.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MonthKey> {
        self.events.keys()
    }

    pub fn len(&self, key: &MonthKey) -> usize {
        self.events.get(key).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.events.values().all(Vec::is_empty)
    }

    pub fn latest(&self) -> &EventList {
        &self.latest
    }

    fn publish(&mut self, list: EventList) {
        self.subscribers.retain(|subscriber| subscriber.tx.send(list.clone()).is_ok());
        self.latest = list;
    }
}

impl Subscription {
    /// Next pending publication, if any.
    pub fn try_next(&mut self) -> Option<EventList> {
        let list = self.rx.try_recv().ok()?;
        self.last_seen = list.clone();
        Some(list)
    }

    /// Drains every pending publication.
    pub fn iter_pending(&mut self) -> impl Iterator<Item = EventList> + '_ {
        std::iter::from_fn(move || self.try_next())
    }

    /// Drains pending publications and returns the newest value seen so far.
    pub fn latest(&mut self) -> &EventList {
        while self.try_next().is_some() {}
        &self.last_seen
    }
}
