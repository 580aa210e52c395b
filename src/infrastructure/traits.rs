//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use crate::infrastructure::error::StorageError;
use async_trait::async_trait;

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Persists a new interaction.
    ///
    /// Returns `Err(StorageError::DuplicateId)` if the id is already taken.
    async fn insert_interaction(&self, interaction: entities::Interaction)
    -> Result<(), StorageError>;

    /// Reads a single interaction, `None` if the id is unknown.
    async fn find_interaction(
        &self,
        interaction_id: &str,
    ) -> Result<Option<entities::Interaction>, StorageError>;

    /// Lists every interaction matching all present filters, in storage order.
    async fn list_interactions(
        &self,
        filter: entities::InteractionFilter,
    ) -> Result<Vec<entities::Interaction>, StorageError>;

    /// Sets the feedback score, returning the updated row or `None` if the id is unknown.
    async fn update_feedback(
        &self,
        interaction_id: &str,
        feedback: i64,
    ) -> Result<Option<entities::Interaction>, StorageError>;

    /// Sets the training flag, returning the updated row or `None` if the id is unknown.
    async fn update_processed(
        &self,
        interaction_id: &str,
        processed_for_training: bool,
    ) -> Result<Option<entities::Interaction>, StorageError>;
}
