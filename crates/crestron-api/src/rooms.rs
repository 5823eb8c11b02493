// Room endpoints

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::RoomRecord;
use crate::wire::RoomsEnvelope;

impl HomeClient {
    /// List all rooms.
    ///
    /// `GET /rooms`
    pub async fn list_rooms(&self) -> Result<Vec<RoomRecord>, Error> {
        const OP: &str = "list_rooms";
        let envelope: RoomsEnvelope = self.get_json(OP, "rooms").await?;
        envelope
            .rooms
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }
}
