// Media room endpoints
//
// Listing plus source selection. Source selection takes both ids in the
// path and has no request body. A fade or source switch already in
// progress hub-side cannot be cancelled through this API.

use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{CommandOutcome, MediaRoomRecord};
use crate::wire::MediaRoomsEnvelope;

impl HomeClient {
    /// List all media rooms.
    ///
    /// `GET /mediarooms`
    pub async fn list_media_rooms(&self) -> Result<Vec<MediaRoomRecord>, Error> {
        const OP: &str = "list_media_rooms";
        let envelope: MediaRoomsEnvelope = self.get_json(OP, "mediarooms").await?;
        envelope
            .into_rooms()
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }

    /// Route a media source to a room.
    ///
    /// `POST /mediarooms/{roomId}/selectsource/{sourceId}`
    pub async fn select_media_source(
        &self,
        room_id: u32,
        source_id: u32,
    ) -> Result<CommandOutcome, Error> {
        const OP: &str = "select_media_source";
        debug!(room_id, source_id, "selecting media source");
        self.post_json(
            OP,
            &format!("mediarooms/{room_id}/selectsource/{source_id}"),
            None,
        )
        .await
    }
}
