use sqlx::sqlite::SqliteExecutor;

use crate::logic::{channel::{ChannelKind, ChannelRegistry}, error::Result, types::ChannelId};

impl ChannelRegistry {
    pub(crate) async fn upsert(db: impl SqliteExecutor<'_>, kind: ChannelKind, channel_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO channels (type, channel_id) VALUES ($1, $2)
            ON CONFLICT (type) DO UPDATE SET channel_id = excluded.channel_id"
        ).bind(kind)
        .bind(channel_id)
        .execute(db).await?;

        Ok(())
    }

    pub(crate) async fn fetch(db: impl SqliteExecutor<'_>, kind: ChannelKind) -> Result<Option<ChannelId>> {
        let channel_id = sqlx::query_scalar(
            "SELECT channel_id FROM channels WHERE type = $1"
        ).bind(kind)
        .fetch_optional(db).await?;

        Ok(channel_id)
    }
}
