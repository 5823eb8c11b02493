// Sensor endpoints
//
// Occupancy sensors report presence, photo sensors report a 0-255 level;
// the conversion in `wire.rs` enforces that split.

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::SensorRecord;
use crate::wire::SensorsEnvelope;

impl HomeClient {
    /// List all sensors.
    ///
    /// `GET /sensors`
    pub async fn list_sensors(&self) -> Result<Vec<SensorRecord>, Error> {
        const OP: &str = "list_sensors";
        let envelope: SensorsEnvelope = self.get_json(OP, "sensors").await?;
        envelope
            .sensors
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }

    /// Get a single sensor by id. Returns `None` if the hub reports no
    /// matching sensor.
    ///
    /// `GET /sensors/{id}`
    pub async fn get_sensor(&self, id: u32) -> Result<Option<SensorRecord>, Error> {
        const OP: &str = "get_sensor";
        let envelope: SensorsEnvelope = self.get_json(OP, &format!("sensors/{id}")).await?;
        envelope
            .sensors
            .into_iter()
            .next()
            .map(|raw| raw.into_record(OP))
            .transpose()
    }
}
