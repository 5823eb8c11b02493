// Domain records returned by the client.
//
// These are immutable snapshots mapped from the hub's raw JSON (see
// `wire.rs`); the caller owns them outright, there are no back-references
// into the client. Ids are unique within their own collection only — a
// light and a scene may share an id.

use serde::Serialize;

/// Maximum light level on the hub's native scale.
pub const MAX_LEVEL: u32 = 65_535;

/// What kind of load a light circuit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Continuously dimmable, level 0–65535.
    Dimmer,
    /// On/off relay. Levels live on the same 0–65535 scale; the hub
    /// coerces any non-zero level to full-on.
    Switch,
}

/// Whether the hub can currently reach a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online,
    Offline,
    /// The hub reported something other than `online`/`offline`, or
    /// omitted the field entirely.
    Unknown,
}

impl ConnectionStatus {
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("online") => Self::Online,
            Some(s) if s.eq_ignore_ascii_case("offline") => Self::Offline,
            _ => Self::Unknown,
        }
    }

    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// A controllable light load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: u32,
    pub name: String,
    pub kind: DeviceKind,
    /// 0–65535. For switches, non-zero means "on".
    pub level: u32,
    pub status: ConnectionStatus,
    pub room_id: Option<u32>,
}

impl DeviceRecord {
    pub fn is_on(&self) -> bool {
        self.level > 0
    }
}

/// Occupancy state reported by an occupancy sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Occupied,
    Vacant,
    Unavailable,
}

/// The reading of a sensor, keyed by its kind.
///
/// Presence and level are mutually exclusive by kind, so they are modeled
/// as one sum type rather than two optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorReading {
    Occupancy { presence: Presence },
    /// Ambient light level, 0–255.
    Photo { level: u8 },
    /// A sensor subtype this client does not interpret.
    Unsupported { sub_type: String },
}

/// A sensed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRecord {
    pub id: u32,
    pub name: String,
    pub status: ConnectionStatus,
    pub room_id: Option<u32>,
    pub reading: SensorReading,
}

/// A room grouping on the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub id: u32,
    pub name: String,
}

/// Scene category as reported by the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneKind {
    Lighting,
    Media,
    GenericIo,
    Other(String),
}

impl SceneKind {
    pub(crate) fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("lighting") {
            Self::Lighting
        } else if raw.eq_ignore_ascii_case("media") {
            Self::Media
        } else if raw.eq_ignore_ascii_case("genericio") {
            Self::GenericIo
        } else {
            Self::Other(raw.to_owned())
        }
    }
}

/// A recallable scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord {
    pub id: u32,
    pub name: String,
    pub kind: SceneKind,
    pub status: ConnectionStatus,
    pub room_id: Option<u32>,
}

/// A security subsystem device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityDeviceRecord {
    pub id: u32,
    pub name: String,
    pub sub_type: Option<String>,
    pub status: ConnectionStatus,
    pub room_id: Option<u32>,
}

/// A room with media routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRoomRecord {
    pub id: u32,
    pub name: String,
    pub status: ConnectionStatus,
}

// ── Commands & outcomes ──────────────────────────────────────────────

/// One pending light mutation inside a `SetState` batch.
///
/// `level` is validated into `[0, MAX_LEVEL]` before dispatch; `time` is a
/// fade duration in milliseconds. The client never rewrites levels — the
/// hub itself coerces non-zero levels on switches to full-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightCommand {
    pub id: u32,
    pub level: u32,
    pub time: u32,
}

impl LightCommand {
    /// An instant (no fade) level change.
    pub fn set(id: u32, level: u32) -> Self {
        Self { id, level, time: 0 }
    }

    /// A level change with a fade duration in milliseconds.
    pub fn fade(id: u32, level: u32, time_ms: u32) -> Self {
        Self {
            id,
            level,
            time: time_ms,
        }
    }
}

/// Per-light outcome inside a [`SetLightsOutcome`].
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LightOutcome {
    pub id: u32,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl LightOutcome {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

/// Result of a `POST /lights/SetState` batch.
///
/// The hub may apply some ids and reject others; the per-id outcomes are
/// surfaced unmodified rather than collapsed into a single pass/fail.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SetLightsOutcome {
    pub status: String,
    /// Per-id results, when the hub reports them. Empty on firmware that
    /// returns only the top-level status.
    #[serde(default)]
    pub lights: Vec<LightOutcome>,
}

impl SetLightsOutcome {
    /// `true` if the hub reported overall success.
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// The ids the hub rejected, if it reported per-id outcomes.
    pub fn rejected_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.lights
            .iter()
            .filter(|l| !l.is_success())
            .map(|l| l.id)
    }
}

/// Result of a single-target mutation (scene recall, media source select).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommandOutcome {
    pub status: String,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_status_parsing() {
        assert_eq!(
            ConnectionStatus::parse(Some("online")),
            ConnectionStatus::Online
        );
        assert_eq!(
            ConnectionStatus::parse(Some("Offline")),
            ConnectionStatus::Offline
        );
        assert_eq!(
            ConnectionStatus::parse(Some("rebooting")),
            ConnectionStatus::Unknown
        );
        assert_eq!(ConnectionStatus::parse(None), ConnectionStatus::Unknown);
    }

    #[test]
    fn scene_kind_parsing() {
        assert_eq!(SceneKind::parse("Lighting"), SceneKind::Lighting);
        assert_eq!(SceneKind::parse("genericIO"), SceneKind::GenericIo);
        assert_eq!(SceneKind::parse("Media"), SceneKind::Media);
        assert_eq!(
            SceneKind::parse("Shade"),
            SceneKind::Other("Shade".to_owned())
        );
    }

    #[test]
    fn set_lights_outcome_rejected_ids() {
        let outcome = SetLightsOutcome {
            status: "partial".into(),
            lights: vec![
                LightOutcome {
                    id: 10,
                    status: "success".into(),
                    message: None,
                },
                LightOutcome {
                    id: 12,
                    status: "error".into(),
                    message: Some("load offline".into()),
                },
            ],
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.rejected_ids().collect::<Vec<_>>(), vec![12]);
    }
}
