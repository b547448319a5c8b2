//! Crossing events and the renderer-facing event queue.
//!
//! A crossing event is ephemeral: the renderer consumes it for a visual burst
//! at the membrane surface and the aggregator counts it for rate estimation.
//! Events live in a bounded queue with a time-to-live, not an unbounded log.

use glam::Vec3;
use std::collections::VecDeque;

/// Direction of a membrane crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    /// Outside → inside.
    Enter,
    /// Inside → outside.
    Exit,
}

/// One detected membrane crossing.
#[derive(Debug, Clone, Copy)]
pub struct CrossingEvent {
    pub kind: CrossingKind,
    /// Snapshot on the membrane surface along the particle's direction (µm).
    pub position: Vec3,
    /// Outward unit normal at the crossing point.
    pub normal: Vec3,
    /// Seconds since the event was emitted.
    pub age: f32,
}

impl CrossingEvent {
    /// Remaining lifetime as a fraction of `ttl`, for burst fade-out.
    pub fn life_fraction(&self, ttl: f32) -> f32 {
        (1.0 - self.age / ttl.max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

/// Bounded queue of live crossing events with time-to-live eviction.
#[derive(Clone)]
pub struct CrossingLog {
    events: VecDeque<CrossingEvent>,
    capacity: usize,
    ttl: f32,
}

impl CrossingLog {
    pub fn new(capacity: usize, ttl: f32) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    /// Record a fresh crossing. When full, the oldest event is dropped —
    /// stale bursts are expendable, new ones are not.
    pub fn push(&mut self, kind: CrossingKind, position: Vec3, normal: Vec3) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(CrossingEvent {
            kind,
            position,
            normal,
            age: 0.0,
        });
    }

    /// Age every live event by `delta` seconds and evict the expired.
    pub fn advance(&mut self, delta: f32) {
        for event in &mut self.events {
            event.age += delta;
        }
        let ttl = self.ttl;
        while matches!(self.events.front(), Some(e) if e.age >= ttl) {
            self.events.pop_front();
        }
    }

    pub fn ttl(&self) -> f32 {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Live events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CrossingEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_one(log: &mut CrossingLog, kind: CrossingKind) {
        log.push(kind, Vec3::new(12.0, 0.0, 0.0), Vec3::X);
    }

    #[test]
    fn test_capacity_is_hard_bound() {
        let mut log = CrossingLog::new(3, 1.0);
        for _ in 0..10 {
            push_one(&mut log, CrossingKind::Enter);
        }
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_ttl_eviction() {
        let mut log = CrossingLog::new(8, 0.5);
        push_one(&mut log, CrossingKind::Enter);
        log.advance(0.3);
        push_one(&mut log, CrossingKind::Exit);
        assert_eq!(log.len(), 2);

        // First event reaches 0.6s and expires, second is at 0.3s
        log.advance(0.3);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().kind, CrossingKind::Exit);

        log.advance(0.3);
        assert!(log.is_empty());
    }

    #[test]
    fn test_life_fraction_fades() {
        let mut log = CrossingLog::new(4, 1.0);
        push_one(&mut log, CrossingKind::Enter);
        log.advance(0.25);
        let event = log.iter().next().unwrap();
        assert!((event.life_fraction(log.ttl()) - 0.75).abs() < 1e-5);
    }
}
