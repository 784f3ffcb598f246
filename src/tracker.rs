//! MMSI-keyed vessel tracker: turns a stream of decoded AIS messages into a
//! time-ordered table of per-vessel state, with TTL eviction and
//! CREATED/UPDATED/DELETED callbacks.
use crate::errors::{Error, Result};
use crate::messages::extended_class_b_position_report::ExtendedClassBPositionReport;
use crate::messages::navigation::Direction;
use crate::messages::position_report::PositionReport;
use crate::messages::standard_class_b_position_report::StandardClassBPositionReport;
use crate::messages::static_and_voyage_related_data::StaticAndVoyageRelatedData;
use crate::messages::static_data_report::{MessagePart, StaticDataReport};
use crate::messages::types::ShipType;
use crate::messages::AisMessage;
use std::collections::HashMap;

/// Subset of a vessel's state that a single AIS message can contribute.
/// Every field is optional; `update` only overwrites fields the incoming
/// message actually carried.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackFields {
    pub latitude: Option<f32>,
    pub longitude: Option<f32>,
    pub speed: Option<f32>,
    pub course: Option<f32>,
    pub heading: Option<u16>,
    pub turn: Option<f32>,
    pub imo: Option<u32>,
    pub callsign: Option<String>,
    pub shipname: Option<String>,
    pub ship_type: Option<ShipType>,
    pub to_bow: Option<u16>,
    pub to_stern: Option<u16>,
    pub to_port: Option<u16>,
    pub to_starboard: Option<u16>,
    pub destination: Option<String>,
}

impl TrackFields {
    /// Overwrites `self`'s fields with every `Some` value present in `other`.
    fn merge_from(&mut self, other: TrackFields) {
        macro_rules! take_some {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
            };
        }
        take_some!(latitude);
        take_some!(longitude);
        take_some!(speed);
        take_some!(course);
        take_some!(heading);
        take_some!(turn);
        take_some!(imo);
        take_some!(callsign);
        take_some!(shipname);
        take_some!(ship_type);
        take_some!(to_bow);
        take_some!(to_stern);
        take_some!(to_port);
        take_some!(to_starboard);
        take_some!(destination);
    }
}

/// A vessel's last-known state.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub mmsi: u32,
    pub last_updated: i64,
    pub fields: TrackFields,
}

/// Fires when a track is created, updated, or removed from the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackEvent {
    Created,
    Updated,
    Deleted,
}

type Callback = Box<dyn FnMut(&Track, TrackEvent) + Send>;

/// Returns the `(mmsi, fields)` this message contributes to a track, or
/// `None` for message types that carry no trackable vessel state (e.g.
/// binary messages, interrogations, base station reports).
fn project(message: &AisMessage) -> Option<(u32, TrackFields)> {
    match message {
        AisMessage::PositionReport(PositionReport {
            mmsi,
            latitude,
            longitude,
            speed_over_ground,
            course_over_ground,
            true_heading,
            rate_of_turn,
            ..
        }) => Some((
            *mmsi,
            TrackFields {
                latitude: *latitude,
                longitude: *longitude,
                speed: *speed_over_ground,
                course: *course_over_ground,
                heading: *true_heading,
                turn: rate_of_turn.and_then(signed_rate_of_turn),
                ..Default::default()
            },
        )),
        AisMessage::StandardClassBPositionReport(StandardClassBPositionReport {
            mmsi,
            latitude,
            longitude,
            speed_over_ground,
            course_over_ground,
            true_heading,
            ..
        }) => Some((
            *mmsi,
            TrackFields {
                latitude: *latitude,
                longitude: *longitude,
                speed: *speed_over_ground,
                course: *course_over_ground,
                heading: *true_heading,
                ..Default::default()
            },
        )),
        AisMessage::ExtendedClassBPositionReport(ExtendedClassBPositionReport {
            mmsi,
            latitude,
            longitude,
            speed_over_ground,
            course_over_ground,
            true_heading,
            name,
            dimension_to_bow,
            dimension_to_stern,
            dimension_to_port,
            dimension_to_starboard,
            ..
        }) => Some((
            *mmsi,
            TrackFields {
                latitude: *latitude,
                longitude: *longitude,
                speed: *speed_over_ground,
                course: *course_over_ground,
                heading: *true_heading,
                shipname: non_empty(name),
                to_bow: Some(*dimension_to_bow),
                to_stern: Some(*dimension_to_stern),
                to_port: Some(*dimension_to_port),
                to_starboard: Some(*dimension_to_starboard),
                ..Default::default()
            },
        )),
        AisMessage::StaticAndVoyageRelatedData(StaticAndVoyageRelatedData {
            mmsi,
            imo_number,
            callsign,
            vessel_name,
            ship_type,
            dimension_to_bow,
            dimension_to_stern,
            dimension_to_port,
            dimension_to_starboard,
            destination,
            ..
        }) => Some((
            *mmsi,
            TrackFields {
                imo: Some(*imo_number),
                callsign: non_empty(callsign),
                shipname: non_empty(vessel_name),
                ship_type: *ship_type,
                to_bow: Some(*dimension_to_bow),
                to_stern: Some(*dimension_to_stern),
                to_port: Some(*dimension_to_port),
                to_starboard: Some(*dimension_to_starboard),
                destination: non_empty(destination),
                ..Default::default()
            },
        )),
        AisMessage::StaticDataReport(StaticDataReport {
            mmsi, message_part, ..
        }) => match message_part {
            MessagePart::PartA { vessel_name } => Some((
                *mmsi,
                TrackFields {
                    shipname: non_empty(vessel_name),
                    ..Default::default()
                },
            )),
            MessagePart::PartB {
                ship_type,
                callsign,
                dimension_to_bow,
                dimension_to_stern,
                dimension_to_port,
                dimension_to_starboard,
                ..
            } => Some((
                *mmsi,
                TrackFields {
                    callsign: non_empty(callsign),
                    ship_type: *ship_type,
                    to_bow: Some(*dimension_to_bow),
                    to_stern: Some(*dimension_to_stern),
                    to_port: Some(*dimension_to_port),
                    to_starboard: Some(*dimension_to_starboard),
                    ..Default::default()
                },
            )),
            MessagePart::Unknown(_) => None,
        },
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn signed_rate_of_turn(rot: crate::messages::navigation::RateOfTurn) -> Option<f32> {
    let magnitude = rot.rate()?;
    match rot.direction() {
        Some(Direction::Port) => Some(-magnitude),
        Some(Direction::Starboard) => Some(magnitude),
        None => Some(0.0),
    }
}

/// MMSI-keyed store of vessel tracks, kept in insertion order so the
/// most-recently-updated track is always at the tail. TTL cleanup and
/// `n_latest_tracks` both rely on that ordering.
pub struct Tracker {
    tracks: HashMap<u32, Track>,
    order: Vec<u32>,
    ttl_seconds: Option<i64>,
    oldest_timestamp: Option<i64>,
    stream_is_ordered: bool,
    subscribers: HashMap<TrackEvent, Vec<Callback>>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(None, false)
    }
}

impl Tracker {
    /// Creates an empty tracker. `ttl_seconds` of `None` disables eviction.
    /// `stream_is_ordered` enables the `OrderError` check on out-of-order
    /// updates.
    pub fn new(ttl_seconds: Option<i64>, stream_is_ordered: bool) -> Self {
        Tracker {
            tracks: HashMap::new(),
            order: Vec::new(),
            ttl_seconds,
            oldest_timestamp: None,
            stream_is_ordered,
            subscribers: HashMap::new(),
        }
    }

    /// Registers a callback invoked synchronously whenever `event` fires.
    /// Callbacks must not block or re-enter the tracker.
    pub fn subscribe(&mut self, event: TrackEvent, callback: Callback) {
        self.subscribers.entry(event).or_default().push(callback);
    }

    fn fire(&mut self, event: TrackEvent, track: &Track) {
        if let Some(callbacks) = self.subscribers.get_mut(&event) {
            for callback in callbacks.iter_mut() {
                callback(track, event);
            }
        }
    }

    fn move_to_tail(&mut self, mmsi: u32) {
        if let Some(pos) = self.order.iter().position(|&m| m == mmsi) {
            self.order.remove(pos);
        }
        self.order.push(mmsi);
    }

    /// Projects `message` into track state and merges it in, using `ts` (or
    /// the caller-supplied clock reading) as the update timestamp. Runs
    /// `cleanup` afterward.
    pub fn update(&mut self, message: &AisMessage, ts: i64) -> Result<()> {
        let Some((mmsi, fields)) = project(message) else {
            return Ok(());
        };

        match self.tracks.get_mut(&mmsi) {
            None => {
                let track = Track {
                    mmsi,
                    last_updated: ts,
                    fields,
                };
                self.tracks.insert(mmsi, track.clone());
                self.move_to_tail(mmsi);
                self.fire(TrackEvent::Created, &track);
            }
            Some(existing) => {
                if self.stream_is_ordered && ts < existing.last_updated {
                    return Err(Error::OrderError {
                        msg: format!(
                            "update for mmsi {mmsi} at {ts} is older than last_updated {}",
                            existing.last_updated
                        ),
                    });
                }
                existing.fields.merge_from(fields);
                existing.last_updated = ts;
                let updated = existing.clone();
                if self.stream_is_ordered {
                    self.move_to_tail(mmsi);
                }
                self.fire(TrackEvent::Updated, &updated);
            }
        }

        self.oldest_timestamp = Some(match self.oldest_timestamp {
            Some(oldest) => oldest.min(ts),
            None => ts,
        });
        self.cleanup(ts);
        Ok(())
    }

    /// Evicts tracks whose `now - last_updated` exceeds the TTL, scanning
    /// from the oldest entry and stopping at the first survivor. Correct
    /// only because `order` is kept sorted by `last_updated` in ordered
    /// mode; callers running in unordered mode should expect a full scan
    /// every time instead of this short-circuit.
    pub fn cleanup(&mut self, now: i64) {
        let Some(ttl) = self.ttl_seconds else {
            return;
        };
        let Some(oldest) = self.oldest_timestamp else {
            return;
        };
        if now - oldest <= ttl {
            return;
        }

        let mut expired = Vec::new();
        for &mmsi in self.order.iter() {
            let Some(track) = self.tracks.get(&mmsi) else {
                continue;
            };
            if now - track.last_updated > ttl {
                expired.push(mmsi);
            } else {
                self.oldest_timestamp = Some(track.last_updated);
                break;
            }
        }
        for mmsi in expired {
            if let Some(track) = self.tracks.remove(&mmsi) {
                self.order.retain(|&m| m != mmsi);
                self.fire(TrackEvent::Deleted, &track);
            }
        }
        if self.tracks.is_empty() {
            self.oldest_timestamp = None;
        }
    }

    /// Returns the `n` tracks with the largest `last_updated`, most recent
    /// first.
    pub fn n_latest_tracks(&self, n: usize) -> Vec<&Track> {
        if self.stream_is_ordered {
            self.order
                .iter()
                .rev()
                .take(n)
                .filter_map(|mmsi| self.tracks.get(mmsi))
                .collect()
        } else {
            let mut tracks: Vec<&Track> = self.tracks.values().collect();
            tracks.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
            tracks.truncate(n);
            tracks
        }
    }

    /// Point lookup; does not affect ordering.
    pub fn get_track(&self, mmsi: u32) -> Option<&Track> {
        self.tracks.get(&mmsi)
    }

    /// Removes and returns a track, firing `DELETED`.
    pub fn pop_track(&mut self, mmsi: u32) -> Option<Track> {
        let track = self.tracks.remove(&mmsi)?;
        self.order.retain(|&m| m != mmsi);
        self.fire(TrackEvent::Deleted, &track);
        Some(track)
    }

    /// Number of tracks currently held.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::position_report::{NavigationStatus, PositionReport};
    use crate::messages::radio_status::{RadioStatus, SotdmaMessage, SubMessage, SyncState};

    fn position_report(mmsi: u32, lat: f32, lon: f32) -> AisMessage {
        AisMessage::PositionReport(PositionReport {
            message_type: 1,
            repeat_indicator: 0,
            mmsi,
            navigation_status: Some(NavigationStatus::UnderWayUsingEngine),
            rate_of_turn: None,
            speed_over_ground: Some(0.0),
            position_accuracy: crate::messages::navigation::Accuracy::Unaugmented,
            longitude: Some(lon),
            latitude: Some(lat),
            course_over_ground: Some(0.0),
            true_heading: None,
            timestamp: 0,
            maneuver_indicator: None,
            raim: false,
            radio_status: RadioStatus::Sotdma(SotdmaMessage {
                sync_state: SyncState::UtcDirect,
                slot_timeout: 0,
                sub_message: SubMessage::SlotOffset(0),
            }),
        })
    }

    #[test]
    fn first_observation_creates_a_track() {
        let mut tracker = Tracker::new(None, true);
        tracker.update(&position_report(111, 1.0, 2.0), 100).unwrap();
        let track = tracker.get_track(111).unwrap();
        assert_eq!(track.last_updated, 100);
        assert_eq!(track.fields.latitude, Some(1.0));
    }

    #[test]
    fn subsequent_observation_merges_fields() {
        let mut tracker = Tracker::new(None, true);
        tracker.update(&position_report(111, 1.0, 2.0), 100).unwrap();
        tracker.update(&position_report(111, 3.0, 4.0), 101).unwrap();
        let track = tracker.get_track(111).unwrap();
        assert_eq!(track.fields.latitude, Some(3.0));
        assert_eq!(track.last_updated, 101);
    }

    #[test]
    fn ordered_mode_rejects_out_of_order_updates() {
        let mut tracker = Tracker::new(None, true);
        tracker.update(&position_report(111, 1.0, 2.0), 100).unwrap();
        let result = tracker.update(&position_report(111, 3.0, 4.0), 50);
        assert!(matches!(result, Err(Error::OrderError { .. })));
    }

    #[test]
    fn n_latest_tracks_reflects_update_recency() {
        let mut tracker = Tracker::new(None, true);
        tracker.update(&position_report(1, 0.0, 0.0), 100).unwrap(); // A
        tracker.update(&position_report(2, 0.0, 0.0), 101).unwrap(); // B
        tracker.update(&position_report(3, 0.0, 0.0), 102).unwrap(); // C
        let latest: Vec<u32> = tracker
            .n_latest_tracks(2)
            .iter()
            .map(|t| t.mmsi)
            .collect();
        assert_eq!(latest, vec![3, 2]);

        tracker.update(&position_report(1, 0.0, 0.0), 103).unwrap(); // A again
        let latest: Vec<u32> = tracker
            .n_latest_tracks(2)
            .iter()
            .map(|t| t.mmsi)
            .collect();
        assert_eq!(latest, vec![1, 3]);
    }

    #[test]
    fn cleanup_evicts_only_expired_tracks() {
        let mut tracker = Tracker::new(Some(1), true);
        tracker.update(&position_report(1, 0.0, 0.0), 100).unwrap(); // A
        tracker.update(&position_report(2, 0.0, 0.0), 101).unwrap(); // B
        tracker.update(&position_report(3, 0.0, 0.0), 102).unwrap(); // C
        tracker.update(&position_report(1, 0.0, 0.0), 103).unwrap(); // A again

        tracker.cleanup(104);
        assert!(tracker.get_track(2).is_none(), "B should have been evicted");
        assert!(tracker.get_track(1).is_some());
        assert!(tracker.get_track(3).is_some());
    }

    #[test]
    fn pop_track_removes_and_returns() {
        let mut tracker = Tracker::new(None, true);
        tracker.update(&position_report(111, 1.0, 2.0), 100).unwrap();
        let popped = tracker.pop_track(111).unwrap();
        assert_eq!(popped.mmsi, 111);
        assert!(tracker.get_track(111).is_none());
    }

    #[test]
    fn callbacks_fire_for_created_updated_deleted() {
        use std::sync::{Arc, Mutex};
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut tracker = Tracker::new(Some(1), true);
        let events_created = events.clone();
        tracker.subscribe(
            TrackEvent::Created,
            Box::new(move |track, _| events_created.lock().unwrap().push((track.mmsi, "created"))),
        );
        let events_deleted = events.clone();
        tracker.subscribe(
            TrackEvent::Deleted,
            Box::new(move |track, _| events_deleted.lock().unwrap().push((track.mmsi, "deleted"))),
        );

        tracker.update(&position_report(111, 1.0, 2.0), 100).unwrap();
        tracker.cleanup(102);

        let recorded = events.lock().unwrap();
        assert!(recorded.contains(&(111, "created")));
        assert!(recorded.contains(&(111, "deleted")));
    }
}
