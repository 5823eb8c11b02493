// Scene endpoints
//
// Listing plus recall. Scene recall takes the id in the path and has no
// request body.

use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{CommandOutcome, SceneRecord};
use crate::wire::ScenesEnvelope;

impl HomeClient {
    /// List all scenes.
    ///
    /// `GET /scenes`
    pub async fn list_scenes(&self) -> Result<Vec<SceneRecord>, Error> {
        const OP: &str = "list_scenes";
        let envelope: ScenesEnvelope = self.get_json(OP, "scenes").await?;
        envelope
            .scenes
            .into_iter()
            .map(|raw| raw.into_record(OP))
            .collect()
    }

    /// Recall (activate) a scene.
    ///
    /// `POST /scenes/recall/{id}`
    pub async fn recall_scene(&self, scene_id: u32) -> Result<CommandOutcome, Error> {
        const OP: &str = "recall_scene";
        debug!(scene_id, "recalling scene");
        self.post_json(OP, &format!("scenes/recall/{scene_id}"), None)
            .await
    }
}
