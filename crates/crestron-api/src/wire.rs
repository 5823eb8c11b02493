// Raw CWS API response types and domain conversion.
//
// Each list endpoint wraps its collection in a keyed object
// (`{"lights":[...]}`, `{"sensors":[...]}`, ...). Fields use
// `#[serde(default)]` liberally because the hub is inconsistent about
// field presence across firmware versions; conversion into the domain
// records in `models.rs` enforces which fields are actually required and
// reports violations as `Error::Schema` naming the offending record.

use serde::Deserialize;
use tracing::warn;

use crate::error::Error;
use crate::models::{
    ConnectionStatus, DeviceKind, DeviceRecord, MediaRoomRecord, Presence, RoomRecord, SceneKind,
    SceneRecord, SecurityDeviceRecord, SensorReading, SensorRecord,
};

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub authkey: Option<String>,
}

// ── Envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LightsEnvelope {
    #[serde(default)]
    pub lights: Vec<RawLight>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SensorsEnvelope {
    #[serde(default)]
    pub sensors: Vec<RawSensor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomsEnvelope {
    #[serde(default)]
    pub rooms: Vec<RawRoom>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenesEnvelope {
    #[serde(default)]
    pub scenes: Vec<RawScene>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecurityDevicesEnvelope {
    #[serde(default, alias = "securitydevices")]
    pub security_devices: Vec<RawSecurityDevice>,
    #[serde(default, rename = "securityDevices")]
    pub security_devices_camel: Vec<RawSecurityDevice>,
}

impl SecurityDevicesEnvelope {
    /// Firmware differs on the key casing; whichever list is populated wins.
    pub(crate) fn into_devices(self) -> Vec<RawSecurityDevice> {
        if self.security_devices.is_empty() {
            self.security_devices_camel
        } else {
            self.security_devices
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaRoomsEnvelope {
    #[serde(default, alias = "mediarooms")]
    pub media_rooms: Vec<RawMediaRoom>,
    #[serde(default, rename = "mediaRooms")]
    pub media_rooms_camel: Vec<RawMediaRoom>,
}

impl MediaRoomsEnvelope {
    pub(crate) fn into_rooms(self) -> Vec<RawMediaRoom> {
        if self.media_rooms.is_empty() {
            self.media_rooms_camel
        } else {
            self.media_rooms
        }
    }
}

// ── Raw records ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct RawLight {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "subType")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
    #[serde(default, rename = "roomId")]
    pub room_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSensor {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "subType")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub presence: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
    #[serde(default, rename = "roomId")]
    pub room_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoom {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawScene {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub scene_type: Option<String>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
    #[serde(default, rename = "roomId")]
    pub room_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSecurityDevice {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "subType")]
    pub sub_type: Option<String>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
    #[serde(default, rename = "roomId")]
    pub room_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMediaRoom {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
}

// ── Conversion helpers ───────────────────────────────────────────────

fn require<T>(
    operation: &'static str,
    field: &'static str,
    id: Option<u32>,
    value: Option<T>,
) -> Result<T, Error> {
    value.ok_or_else(|| Error::Schema {
        operation,
        message: match id {
            Some(id) => format!("record {id} is missing required field `{field}`"),
            None => format!("record is missing required field `{field}`"),
        },
    })
}

// ── Conversions ──────────────────────────────────────────────────────

impl RawLight {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<DeviceRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        let level = require(operation, "level", Some(id), self.level)?;

        // Unknown subtypes are treated as switches, matching hub behavior
        // for non-dimmable loads.
        let kind = match self.sub_type.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("dimmer") => DeviceKind::Dimmer,
            Some(s) if s.eq_ignore_ascii_case("switch") => DeviceKind::Switch,
            other => {
                warn!(id, sub_type = ?other, "unknown light subType, treating as switch");
                DeviceKind::Switch
            }
        };

        Ok(DeviceRecord {
            id,
            name,
            kind,
            level,
            status: ConnectionStatus::parse(self.connection_status.as_deref()),
            room_id: self.room_id,
        })
    }
}

impl RawSensor {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<SensorRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        let sub_type = require(operation, "subType", Some(id), self.sub_type)?;

        let reading = if sub_type.eq_ignore_ascii_case("occupancysensor") {
            let raw = require(operation, "presence", Some(id), self.presence)?;
            let presence = if raw.eq_ignore_ascii_case("occupied") {
                Presence::Occupied
            } else if raw.eq_ignore_ascii_case("vacant") {
                Presence::Vacant
            } else {
                Presence::Unavailable
            };
            SensorReading::Occupancy { presence }
        } else if sub_type.eq_ignore_ascii_case("photosensor") {
            let level = require(operation, "level", Some(id), self.level)?;
            let level = u8::try_from(level).map_err(|_| Error::Schema {
                operation,
                message: format!("record {id}: photo level {level} is outside 0-255"),
            })?;
            SensorReading::Photo { level }
        } else {
            SensorReading::Unsupported { sub_type }
        };

        Ok(SensorRecord {
            id,
            name,
            status: ConnectionStatus::parse(self.connection_status.as_deref()),
            room_id: self.room_id,
            reading,
        })
    }
}

impl RawRoom {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<RoomRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        Ok(RoomRecord { id, name })
    }
}

impl RawScene {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<SceneRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        let kind = self
            .scene_type
            .as_deref()
            .map_or(SceneKind::Other(String::new()), SceneKind::parse);

        // Scenes that omit connectionStatus are considered online — the hub
        // only reports the field for scenes tied to a physical processor.
        let status = match self.connection_status.as_deref() {
            None => ConnectionStatus::Online,
            some => ConnectionStatus::parse(some),
        };

        Ok(SceneRecord {
            id,
            name,
            kind,
            status,
            room_id: self.room_id,
        })
    }
}

impl RawSecurityDevice {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<SecurityDeviceRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        Ok(SecurityDeviceRecord {
            id,
            name,
            sub_type: self.sub_type,
            status: ConnectionStatus::parse(self.connection_status.as_deref()),
            room_id: self.room_id,
        })
    }
}

impl RawMediaRoom {
    pub(crate) fn into_record(self, operation: &'static str) -> Result<MediaRoomRecord, Error> {
        let id = require(operation, "id", None, self.id)?;
        let name = require(operation, "name", Some(id), self.name)?;
        Ok(MediaRoomRecord {
            id,
            name,
            status: ConnectionStatus::parse(self.connection_status.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_missing_level_is_schema_error() {
        let raw = RawLight {
            id: Some(1060),
            name: Some("Kitchen Pendants".into()),
            sub_type: Some("Dimmer".into()),
            level: None,
            connection_status: Some("online".into()),
            room_id: Some(4),
        };
        let err = raw.into_record("list_lights").unwrap_err();
        match err {
            Error::Schema { operation, message } => {
                assert_eq!(operation, "list_lights");
                assert!(message.contains("1060"), "message should name the id: {message}");
                assert!(message.contains("level"));
            }
            other => panic!("expected Schema error, got: {other:?}"),
        }
    }

    #[test]
    fn occupancy_sensor_requires_presence() {
        let raw = RawSensor {
            id: Some(2001),
            name: Some("Hall Occupancy".into()),
            sub_type: Some("OccupancySensor".into()),
            presence: None,
            level: None,
            connection_status: Some("online".into()),
            room_id: None,
        };
        assert!(matches!(
            raw.into_record("list_sensors"),
            Err(Error::Schema { .. })
        ));
    }

    #[test]
    fn photo_sensor_maps_level() {
        let raw = RawSensor {
            id: Some(2002),
            name: Some("Patio Photo".into()),
            sub_type: Some("PhotoSensor".into()),
            presence: None,
            level: Some(180),
            connection_status: Some("online".into()),
            room_id: Some(7),
        };
        let record = raw.into_record("list_sensors").unwrap();
        assert_eq!(record.reading, SensorReading::Photo { level: 180 });
    }

    #[test]
    fn photo_level_out_of_range_is_schema_error() {
        let raw = RawSensor {
            id: Some(2002),
            name: Some("Patio Photo".into()),
            sub_type: Some("PhotoSensor".into()),
            presence: None,
            level: Some(900),
            connection_status: None,
            room_id: None,
        };
        assert!(matches!(
            raw.into_record("list_sensors"),
            Err(Error::Schema { .. })
        ));
    }

    #[test]
    fn scene_without_connection_status_is_online() {
        let raw = RawScene {
            id: Some(3001),
            name: Some("Movie Night".into()),
            scene_type: Some("Media".into()),
            connection_status: None,
            room_id: Some(2),
        };
        let record = raw.into_record("list_scenes").unwrap();
        assert_eq!(record.status, ConnectionStatus::Online);
        assert_eq!(record.kind, SceneKind::Media);
    }
}
