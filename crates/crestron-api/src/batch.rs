// Fixed fan-out over independent operations.
//
// A batch is a caller-defined set of independent requests dispatched
// together and joined. Completion order is undefined and elements must not
// depend on one another's side effects; callers needing ordering (e.g.
// authenticate-then-read) sequence those calls explicitly. One element
// failing does not suppress the others — every slot gets its own result.

use std::future::Future;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{
    DeviceRecord, MediaRoomRecord, RoomRecord, SceneRecord, SecurityDeviceRecord, SensorRecord,
};

/// Dispatch a homogeneous batch of operations concurrently and join them,
/// preserving input order in the output.
pub async fn join_batch<T, I, F>(ops: I) -> Vec<Result<T, Error>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, Error>>,
{
    futures::future::join_all(ops).await
}

/// Point-in-time view of every collection the hub exposes.
///
/// Each collection carries its own result: a schema error in one endpoint
/// does not discard the data the other five returned.
#[derive(Debug)]
pub struct HubSnapshot {
    pub lights: Result<Vec<DeviceRecord>, Error>,
    pub sensors: Result<Vec<SensorRecord>, Error>,
    pub rooms: Result<Vec<RoomRecord>, Error>,
    pub scenes: Result<Vec<SceneRecord>, Error>,
    pub security_devices: Result<Vec<SecurityDeviceRecord>, Error>,
    pub media_rooms: Result<Vec<MediaRoomRecord>, Error>,
}

impl HubSnapshot {
    /// `true` if every collection was fetched successfully.
    pub fn is_complete(&self) -> bool {
        self.first_error().is_none()
    }

    /// The first failed collection's error, if any.
    pub fn first_error(&self) -> Option<&Error> {
        [
            self.lights.as_ref().err(),
            self.sensors.as_ref().err(),
            self.rooms.as_ref().err(),
            self.scenes.as_ref().err(),
            self.security_devices.as_ref().err(),
            self.media_rooms.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .next()
    }
}

impl HomeClient {
    /// Fetch all six collections as one fixed fan-out.
    ///
    /// The six reads run as independent concurrent tasks over the shared
    /// session. If the session is cold or expires mid-batch, renewal is
    /// single-flight: exactly one login is issued and the other tasks are
    /// handed the newly installed key.
    pub async fn snapshot(&self) -> HubSnapshot {
        let (lights, sensors, rooms, scenes, security_devices, media_rooms) = tokio::join!(
            self.list_lights(),
            self.list_sensors(),
            self.list_rooms(),
            self.list_scenes(),
            self.list_security_devices(),
            self.list_media_rooms(),
        );

        HubSnapshot {
            lights,
            sensors,
            rooms,
            scenes,
            security_devices,
            media_rooms,
        }
    }
}
