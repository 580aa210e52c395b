//! Interactions endpoints

use crate::api::ApiError;
use crate::api::interactions::schemas::{
    CreateInteraction, FeedbackUpdate, InteractionQuery, ProcessedUpdate,
};
use crate::infrastructure::entities;
use crate::infrastructure::error::StorageError;
use crate::infrastructure::traits::InteractionRepository;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use di_axum::Inject;
use log::info;
use uuid::Uuid;

/// Score every new interaction starts with.
pub const DEFAULT_FEEDBACK: i64 = 0;
/// New interactions have not been consumed by training yet.
pub const DEFAULT_PROCESSED_FOR_TRAINING: bool = false;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_interactions).post(create_interaction))
        .route("/:id/feedback", patch(update_feedback))
        .route("/:id/processed", patch(mark_processed))
}

async fn create_interaction(
    Inject(repository): Inject<dyn InteractionRepository>,
    payload: Result<Json<CreateInteraction>, JsonRejection>,
) -> Result<Json<schemas::Interaction>, ApiError> {
    let Json(payload) = payload?;

    let interaction_id = Uuid::new_v4().to_string();

    repository
        .insert_interaction(entities::Interaction {
            interaction_id: interaction_id.clone(),
            user_query: payload.user_query,
            bot_response: payload.bot_response,
            feedback: DEFAULT_FEEDBACK,
            timestamp: Utc::now(),
            processed_for_training: DEFAULT_PROCESSED_FOR_TRAINING,
        })
        .await?;

    // read back what storage actually holds
    let created = repository
        .find_interaction(&interaction_id)
        .await?
        .ok_or(StorageError::MissingAfterWrite)?;

    info!("created interaction {interaction_id}");

    Ok(Json(created.into()))
}

async fn list_interactions(
    Inject(repository): Inject<dyn InteractionRepository>,
    query: Result<Query<InteractionQuery>, QueryRejection>,
) -> Result<Json<Vec<schemas::Interaction>>, ApiError> {
    let Query(query) = query?;

    let interactions = repository
        .list_interactions(entities::InteractionFilter::from(query))
        .await?;

    Ok(Json(
        interactions
            .into_iter()
            .map(schemas::Interaction::from)
            .collect(),
    ))
}

async fn update_feedback(
    Inject(repository): Inject<dyn InteractionRepository>,
    Path(interaction_id): Path<String>,
    payload: Result<Json<FeedbackUpdate>, JsonRejection>,
) -> Result<Json<schemas::Interaction>, ApiError> {
    let Json(payload) = payload?;

    let updated = repository
        .update_feedback(&interaction_id, payload.feedback_score)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(
        "feedback of interaction {interaction_id} set to {}",
        updated.feedback
    );

    Ok(Json(updated.into()))
}

async fn mark_processed(
    Inject(repository): Inject<dyn InteractionRepository>,
    Path(interaction_id): Path<String>,
    payload: Result<Json<ProcessedUpdate>, JsonRejection>,
) -> Result<Json<schemas::Interaction>, ApiError> {
    let Json(payload) = payload?;

    let updated = repository
        .update_processed(&interaction_id, payload.processed_for_training)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(updated.into()))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serialize};

    #[derive(Deserialize, Debug)]
    pub struct CreateInteraction {
        pub user_query: String,
        pub bot_response: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct Interaction {
        pub interaction_id: String,
        pub user_query: String,
        pub bot_response: String,
        pub feedback: i64,
        pub timestamp: DateTime<Utc>,
        pub processed_for_training: bool,
    }

    impl From<entities::Interaction> for Interaction {
        fn from(interaction: entities::Interaction) -> Self {
            Interaction {
                interaction_id: interaction.interaction_id,
                user_query: interaction.user_query,
                bot_response: interaction.bot_response,
                feedback: interaction.feedback,
                timestamp: interaction.timestamp,
                processed_for_training: interaction.processed_for_training,
            }
        }
    }

    /// Query string of `GET /interactions`; absent keys mean "no filter".
    #[derive(Deserialize, Debug, Default)]
    pub struct InteractionQuery {
        pub feedback: Option<i64>,
        #[serde(default, deserialize_with = "lenient_bool")]
        pub processed_for_training: Option<bool>,
    }

    /// Accepts the spellings Python clients send for booleans (`False`, `1`, `yes`, `off`, ...).
    fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" | "on" => Ok(Some(true)),
            "0" | "false" | "f" | "no" | "n" | "off" => Ok(Some(false)),
            _ => Err(de::Error::invalid_value(
                Unexpected::Str(&raw),
                &"a boolean (true/false, 1/0, yes/no, on/off)",
            )),
        }
    }

    impl From<InteractionQuery> for entities::InteractionFilter {
        fn from(query: InteractionQuery) -> Self {
            entities::InteractionFilter {
                feedback: query.feedback,
                processed_for_training: query.processed_for_training,
            }
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct FeedbackUpdate {
        pub feedback_score: i64,
    }

    #[derive(Deserialize, Debug)]
    pub struct ProcessedUpdate {
        pub processed_for_training: bool,
    }
}
