// Security device endpoints

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::SecurityDeviceRecord;
use crate::wire::SecurityDevicesEnvelope;

impl HomeClient {
    /// List all security subsystem devices.
    ///
    /// `GET /securitydevices`
    pub async fn list_security_devices(&self) -> Result<Vec<SecurityDeviceRecord>, Error> {
        const OP: &str = "list_security_devices";
        let envelope: SecurityDevicesEnvelope = self.get_json(OP, "securitydevices").await?;
        envelope
            .into_devices()
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }
}
