//! Wire types for the room service.
//!
//! These mirror the service's JSON exactly (lowercase keys inside the
//! config objects, Go-style capitalized keys on the envelope) and stay
//! separate from the `sg-core` model types: conversion is where color
//! strings get parsed and where missing fields turn into [`RoomError`]s
//! instead of panics.

use crate::RoomError;
use serde::Deserialize;
use sg_core::model::{BoardSetup, BrushConfig, Color, GuideLayout, GuideRing};

// ─── Session identity ────────────────────────────────────────────────────

/// Which participant of which room this client is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKey {
    pub room: u32,
    pub user: u32,
}

impl SessionKey {
    /// Parse the `<room>.<user>` tail of a join link.
    pub fn from_page_path(path: &str) -> Option<Self> {
        let (room, user) = path.rsplit_once('.')?;
        Some(Self {
            room: room.rsplit('/').next()?.parse().ok()?,
            user: user.parse().ok()?,
        })
    }
}

// ─── get_config ──────────────────────────────────────────────────────────

/// Per-user brush parameters as the service sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfigWire {
    pub clr: String,
    pub ink: f32,
    pub depth: f32,
    pub centered: u32,
    pub bristles: u32,
    pub smoothing: f32,
    pub lift_smoothing: f32,
    pub start_smoothing: f32,
}

/// One guide-dot ring as the service sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct DotsWire {
    pub clr: String,
    pub points: u32,
    /// Ring diameter as a ratio of the surface width.
    pub d: f32,
    /// Dot radius in pixels.
    pub rp: f32,
    pub pointup: bool,
}

/// Room-wide settings as the service sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfigWire {
    pub bg: String,
    pub dots: Vec<DotsWire>,
}

/// The full `get_config` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigEnvelope {
    #[serde(rename = "Uc")]
    pub user: UserConfigWire,
    #[serde(rename = "Rc")]
    pub room: RoomConfigWire,
    #[serde(rename = "Submitted")]
    pub submitted: bool,
}

fn parse_color(s: &str, what: &str) -> Result<Color, RoomError> {
    Color::parse(s).ok_or_else(|| RoomError::Malformed(format!("bad {what} color {s:?}")))
}

impl ConfigEnvelope {
    /// Convert into the core board setup, parsing color strings.
    pub fn into_setup(self) -> Result<BoardSetup, RoomError> {
        let brush = BrushConfig {
            color: parse_color(&self.user.clr, "brush")?,
            ink: self.user.ink,
            diameter: self.user.depth,
            centered: self.user.centered,
            bristles: self.user.bristles,
            smoothing: self.user.smoothing,
            lift_smoothing: self.user.lift_smoothing,
            start_smoothing: self.user.start_smoothing,
            weight_jitter: 0.0,
        };

        let mut guides = GuideLayout::default();
        for dot in &self.room.dots {
            guides.rings.push(GuideRing {
                color: parse_color(&dot.clr, "guide")?,
                points: dot.points,
                diameter_ratio: dot.d,
                dot_radius: dot.rp,
                point_up: dot.pointup,
            });
        }

        Ok(BoardSetup {
            brush,
            background: parse_color(&self.room.bg, "background")?,
            guides,
            submitted: self.submitted,
        })
    }
}

// ─── get_done ────────────────────────────────────────────────────────────

/// Completion counts for a room. The service's counts are monotonically
/// non-decreasing across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Participants who have submitted.
    pub done: u32,
    /// Total participants in the room.
    pub total: u32,
    /// Whether this participant is among them.
    pub submitted: bool,
}

impl Progress {
    /// The service replies `[done, outof, submitted]`.
    pub(crate) fn from_wire(triple: [u32; 3]) -> Self {
        Self {
            done: triple[0],
            total: triple[1],
            submitted: triple[2] != 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

// ─── create_room ─────────────────────────────────────────────────────────

/// A freshly created room: its id plus one join key per participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room: u32,
    pub participants: Vec<u32>,
}

impl CreatedRoom {
    /// The service replies `[uid, uid, ..., room_id]`.
    pub(crate) fn from_wire(mut ids: Vec<u32>, expected: u32) -> Result<Self, RoomError> {
        if ids.len() != expected as usize + 1 {
            return Err(RoomError::Malformed(format!(
                "create_room returned {} ids for {expected} participants",
                ids.len()
            )));
        }
        let room = ids.pop().expect("length checked above");
        Ok(Self {
            room,
            participants: ids,
        })
    }

    /// Page paths to hand out, one per participant: `s/<room>.<uid>`.
    pub fn join_paths(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|uid| format!("s/{}.{uid}", self.room))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG_JSON: &str = r##"{
        "Uc": {
            "clr": "hsl(24, 15%, 45%)",
            "ink": 120000,
            "depth": 72,
            "centered": 9,
            "bristles": 96,
            "smoothing": 0.21,
            "lift_smoothing": 0.06,
            "start_smoothing": 0.021
        },
        "Rc": {
            "bg": "#3f3f4d",
            "dots": [
                {"clr": "#000000", "points": 5, "d": 0.66, "rp": 3, "pointup": true}
            ]
        },
        "Submitted": false
    }"##;

    #[test]
    fn config_envelope_decodes_and_converts() {
        let envelope: ConfigEnvelope = serde_json::from_str(CONFIG_JSON).unwrap();
        let setup = envelope.into_setup().unwrap();

        assert_eq!(setup.brush.ink, 120_000.0);
        assert_eq!(setup.brush.diameter, 72.0);
        assert_eq!(setup.brush.bristles, 96);
        assert_eq!(setup.brush.weight_jitter, 0.0);
        assert_eq!(setup.guides.rings.len(), 1);
        assert_eq!(setup.guides.rings[0].points, 5);
        assert!(setup.guides.rings[0].point_up);
        assert!(!setup.submitted);
        // hsl brush color parsed to something non-gray.
        assert!(setup.brush.color.r != setup.brush.color.b);
    }

    #[test]
    fn missing_fields_fail_to_decode() {
        let truncated = CONFIG_JSON.replace("\"ink\": 120000,", "");
        assert!(serde_json::from_str::<ConfigEnvelope>(&truncated).is_err());
    }

    #[test]
    fn unparseable_colors_are_reported_not_panicked() {
        let mangled = CONFIG_JSON.replace("hsl(24, 15%, 45%)", "chartreuse");
        let envelope: ConfigEnvelope = serde_json::from_str(&mangled).unwrap();
        assert!(matches!(
            envelope.into_setup(),
            Err(RoomError::Malformed(_))
        ));
    }

    #[test]
    fn progress_triple_decodes() {
        let triple: [u32; 3] = serde_json::from_str("[2, 5, 1]").unwrap();
        let progress = Progress::from_wire(triple);
        assert_eq!(
            progress,
            Progress {
                done: 2,
                total: 5,
                submitted: true
            }
        );
        assert!(!progress.is_complete());
        assert!(Progress::from_wire([5, 5, 0]).is_complete());
    }

    #[test]
    fn created_room_splits_ids_and_builds_join_paths() {
        let created = CreatedRoom::from_wire(vec![11, 22, 33, 9000], 3).unwrap();
        assert_eq!(created.room, 9000);
        assert_eq!(created.participants, vec![11, 22, 33]);
        assert_eq!(
            created.join_paths(),
            vec!["s/9000.11", "s/9000.22", "s/9000.33"]
        );

        assert!(matches!(
            CreatedRoom::from_wire(vec![1, 2], 3),
            Err(RoomError::Malformed(_))
        ));
    }

    #[test]
    fn session_key_parses_join_link_tails() {
        assert_eq!(
            SessionKey::from_page_path("9000.1234"),
            Some(SessionKey {
                room: 9000,
                user: 1234
            })
        );
        assert_eq!(
            SessionKey::from_page_path("/s/9000.1234"),
            Some(SessionKey {
                room: 9000,
                user: 1234
            })
        );
        assert_eq!(SessionKey::from_page_path("not-a-key"), None);
    }
}
