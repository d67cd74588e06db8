//! Sqlite-backed session store.
//!
//! One row per message, one log per conversation id. Appends are single
//! inserts; a full user/assistant turn goes through one transaction so a
//! crash can never leave an orphaned user message.

use async_trait::async_trait;
use scout_core::{ChatMessage, Role, SessionStorage};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Schema, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::messages;

fn is_table_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("table") && err.to_string().contains("already exists")
}

pub struct SqliteSessionStore {
    db: DatabaseConnection,
}

impl SqliteSessionStore {
    /// Connect and make sure the `messages` table exists.
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to database: {}", db_url);

        let db = Database::connect(db_url).await?;

        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema.create_table_from_entity(messages::Entity);
        match db.execute_unprepared(&backend.build(&stmt).to_string()).await {
            Ok(_) => {}
            Err(e) if is_table_already_exists_error(&e) => {
                info!("Table already exists, skipping creation");
            }
            Err(e) => return Err(e.into()),
        }

        info!("SqliteSessionStore initialized");
        Ok(Self { db })
    }

    fn active_model(conversation_id: &str, role: &Role, content: &str) -> messages::ActiveModel {
        messages::ActiveModel {
            conversation_id: Set(conversation_id.to_string()),
            role: Set(role.to_string()),
            content: Set(content.to_string()),
            created_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        }
    }

    fn message_from_model(model: messages::Model) -> anyhow::Result<ChatMessage> {
        Ok(ChatMessage {
            role: model.role.parse()?,
            content: model.content,
            created_at: model.created_at.and_utc(),
        })
    }
}

#[async_trait]
impl SessionStorage for SqliteSessionStore {
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Vec<ChatMessage>> {
        let models = messages::Entity::find()
            .filter(messages::Column::ConversationId.eq(conversation_id))
            .order_by_asc(messages::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::message_from_model).collect()
    }

    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
    ) -> anyhow::Result<()> {
        Self::active_model(conversation_id, &role, content)
            .insert(&self.db)
            .await?;

        info!("Appended {} message to conversation: {}", role, conversation_id);
        Ok(())
    }

    async fn append_turn(
        &self,
        conversation_id: &str,
        user_content: &str,
        assistant_content: &str,
    ) -> anyhow::Result<()> {
        let txn = self.db.begin().await?;

        Self::active_model(conversation_id, &Role::User, user_content)
            .insert(&txn)
            .await?;
        Self::active_model(conversation_id, &Role::Assistant, assistant_content)
            .insert(&txn)
            .await?;

        txn.commit().await?;

        info!("Recorded turn for conversation: {}", conversation_id);
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> anyhow::Result<()> {
        messages::Entity::delete_many()
            .filter(messages::Column::ConversationId.eq(conversation_id))
            .exec(&self.db)
            .await?;

        info!("Cleared conversation: {}", conversation_id);
        Ok(())
    }
}
