// Light endpoints
//
// Reads via `GET /lights` and `GET /lights/{id}`, batched mutation via
// `POST /lights/SetState`. Level range validation happens locally before
// any network call; level coercion for switches does not — that is hub
// behavior and the value is passed through unmodified.

use serde_json::json;
use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{DeviceRecord, LightCommand, MAX_LEVEL, SetLightsOutcome};
use crate::wire::LightsEnvelope;

impl HomeClient {
    /// List all light loads.
    ///
    /// `GET /lights`
    pub async fn list_lights(&self) -> Result<Vec<DeviceRecord>, Error> {
        const OP: &str = "list_lights";
        let envelope: LightsEnvelope = self.get_json(OP, "lights").await?;
        envelope
            .lights
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }

    /// Get a single light by id. Returns `None` if the hub reports no
    /// matching load.
    ///
    /// `GET /lights/{id}`
    pub async fn get_light(&self, id: u32) -> Result<Option<DeviceRecord>, Error> {
        const OP: &str = "get_light";
        let envelope: LightsEnvelope = self.get_json(OP, &format!("lights/{id}")).await?;
        envelope
            .lights
            .into_iter()
            .next()
            .map(|raw| raw.into_record(OP))
            .transpose()
    }

    /// Apply a batch of light level changes in one request.
    ///
    /// Every command's `level` must lie in `[0, 65535]`; an out-of-range
    /// level fails with [`Error::Validation`] naming the offending id and
    /// issues zero network calls. The hub's per-id outcome is returned
    /// unmodified — inspect [`SetLightsOutcome::rejected_ids`] for partial
    /// failures.
    ///
    /// `POST /lights/SetState`
    pub async fn set_light_levels(
        &self,
        commands: &[LightCommand],
    ) -> Result<SetLightsOutcome, Error> {
        const OP: &str = "set_light_levels";

        for cmd in commands {
            if cmd.level > MAX_LEVEL {
                return Err(Error::Validation {
                    operation: OP,
                    id: cmd.id,
                    message: format!("level {} is outside 0-{MAX_LEVEL}", cmd.level),
                });
            }
        }

        debug!(count = commands.len(), "setting light levels");
        let body = json!({ "lights": commands });
        self.post_json(OP, "lights/SetState", Some(&body)).await
    }
}
