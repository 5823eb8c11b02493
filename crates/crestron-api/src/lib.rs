// crestron-api: Async Rust client for the Crestron Home hub's local CWS REST API

pub mod auth;
pub mod batch;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod lights;
mod media;
mod rooms;
mod scenes;
mod security;
mod sensors;
mod wire;

pub use auth::{Credential, ExpiryClassifier, Session};
pub use batch::{HubSnapshot, join_batch};
pub use client::HomeClient;
pub use error::Error;
pub use models::{
    CommandOutcome, ConnectionStatus, DeviceKind, DeviceRecord, LightCommand, LightOutcome,
    MAX_LEVEL, MediaRoomRecord, Presence, RoomRecord, SceneKind, SceneRecord,
    SecurityDeviceRecord, SensorReading, SensorRecord, SetLightsOutcome,
};
pub use transport::{TlsMode, TransportConfig};
