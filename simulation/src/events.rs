//! Structured events emitted by the yearly stages.
//!
//! The core never formats text. Sinks registered on the [`EventHub`] decide
//! how (and whether) to render each event.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::components::{CavemanId, DeathCause};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Foraging,
    Sharing,
    Aging,
    Pairing,
    Reproduction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EventKind {
    StageStarted { stage: Stage },
    Foraged { id: CavemanId, gained: u32, eaten: f64, hunger: f64 },
    Shared {
        donor: CavemanId,
        recipient: CavemanId,
        amount: f64,
        recipient_hunger: f64,
        relationship: f64,
    },
    Died { id: CavemanId, cause: DeathCause, age: u32 },
    Paired { female: CavemanId, male: CavemanId, relationship: f64 },
    ReproductionRate { mean_hunger: f64, rate: f64 },
    Born { child: CavemanId, mother: CavemanId, father: CavemanId },
    Extinct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub year: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Consumer of simulation events (narration, analytics, tests).
pub trait EventSink {
    fn record(&mut self, event: &Event);
}

/// Bounded in-memory log; the oldest events are dropped first.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Up to `count` most recent events, oldest first.
    pub fn get_recent(&self, count: usize) -> Vec<Event> {
        let skip = self.events.len().saturating_sub(count);
        self.events.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: &Event) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());
    }
}

/// Stamps events with the current year, keeps the log and fans out to sinks.
pub struct EventHub {
    year: u32,
    log: EventLog,
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventHub {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            year: 0,
            log: EventLog::new(log_capacity),
            sinks: Vec::new(),
        }
    }

    pub fn set_year(&mut self, year: u32) {
        self.year = year;
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

impl EventSink for EventHub {
    fn record(&mut self, event: &Event) {
        self.log.record(event);
        for sink in &mut self.sinks {
            sink.record(event);
        }
    }
}

/// Stage-side emitter: anything that can take an [`EventKind`].
pub trait Emit {
    fn emit(&mut self, kind: EventKind);
}

impl Emit for EventHub {
    fn emit(&mut self, kind: EventKind) {
        let event = Event { year: self.year, kind };
        self.record(&event);
    }
}

/// Collects kinds only. Handy for driving a single stage in tests.
impl Emit for Vec<EventKind> {
    fn emit(&mut self, kind: EventKind) {
        self.push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Capture(Rc<RefCell<Vec<Event>>>);

    impl EventSink for Capture {
        fn record(&mut self, event: &Event) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_log_drops_oldest() {
        let mut log = EventLog::new(2);
        for year in 1..=3 {
            log.record(&Event { year, kind: EventKind::Extinct });
        }
        assert_eq!(log.len(), 2);
        let years: Vec<u32> = log.get_recent(10).iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2, 3]);
        assert_eq!(log.get_recent(1)[0].year, 3);
    }

    #[test]
    fn test_hub_stamps_year_and_forwards() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new(16);
        hub.add_sink(Box::new(Capture(Rc::clone(&seen))));
        hub.set_year(7);
        hub.emit(EventKind::StageStarted { stage: Stage::Sharing });

        assert_eq!(hub.log().len(), 1);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].year, 7);
    }

    #[test]
    fn test_event_serializes_flat() {
        let event = Event {
            year: 3,
            kind: EventKind::Died { id: CavemanId(4), cause: DeathCause::Hunger, age: 30 },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "died");
        assert_eq!(json["cause"], "hunger");
        assert_eq!(json["year"], 3);
    }
}
