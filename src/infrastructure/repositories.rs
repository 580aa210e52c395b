//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Interaction, InteractionFilter};
use crate::infrastructure::error::StorageError;
use crate::infrastructure::traits::InteractionRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use sqlx::{QueryBuilder, Sqlite};

const SELECT_INTERACTIONS: &str = "SELECT interaction_id, user_query, bot_response, feedback, timestamp, processed_for_training FROM interactions";

#[injectable(InteractionRepository)]
pub struct DbInteractionRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl InteractionRepository for DbInteractionRepository {
    async fn insert_interaction(&self, interaction: Interaction) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO interactions (interaction_id, user_query, bot_response, feedback, timestamp, processed_for_training) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(interaction.interaction_id)
        .bind(interaction.user_query)
        .bind(interaction.bot_response)
        .bind(interaction.feedback)
        .bind(interaction.timestamp)
        .bind(interaction.processed_for_training)
        .execute(&**self.connection)
        .await?;

        Ok(())
    }

    async fn find_interaction(
        &self,
        interaction_id: &str,
    ) -> Result<Option<Interaction>, StorageError> {
        let interaction = sqlx::query_as(
            "SELECT interaction_id, user_query, bot_response, feedback, timestamp, processed_for_training FROM interactions WHERE interaction_id = ?",
        )
        .bind(interaction_id)
        .fetch_optional(&**self.connection)
        .await?;

        Ok(interaction)
    }

    async fn list_interactions(
        &self,
        filter: InteractionFilter,
    ) -> Result<Vec<Interaction>, StorageError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_INTERACTIONS);
        let mut separator = " WHERE ";

        if let Some(feedback) = filter.feedback {
            query.push(separator).push("feedback = ").push_bind(feedback);
            separator = " AND ";
        }
        if let Some(processed) = filter.processed_for_training {
            query
                .push(separator)
                .push("processed_for_training = ")
                .push_bind(processed);
        }

        let interactions = query
            .build_query_as::<Interaction>()
            .fetch_all(&**self.connection)
            .await?;

        Ok(interactions)
    }

    async fn update_feedback(
        &self,
        interaction_id: &str,
        feedback: i64,
    ) -> Result<Option<Interaction>, StorageError> {
        let interaction = sqlx::query_as(
            "UPDATE interactions SET feedback = ? WHERE interaction_id = ? RETURNING interaction_id, user_query, bot_response, feedback, timestamp, processed_for_training",
        )
        .bind(feedback)
        .bind(interaction_id)
        .fetch_optional(&**self.connection)
        .await?;

        Ok(interaction)
    }

    async fn update_processed(
        &self,
        interaction_id: &str,
        processed_for_training: bool,
    ) -> Result<Option<Interaction>, StorageError> {
        let interaction = sqlx::query_as(
            "UPDATE interactions SET processed_for_training = ? WHERE interaction_id = ? RETURNING interaction_id, user_query, bot_response, feedback, timestamp, processed_for_training",
        )
        .bind(processed_for_training)
        .bind(interaction_id)
        .fetch_optional(&**self.connection)
        .await?;

        Ok(interaction)
    }
}
