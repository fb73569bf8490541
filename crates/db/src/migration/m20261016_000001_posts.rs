//! Posts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(POSTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS posts CASCADE;")
            .await?;
        Ok(())
    }
}

const POSTS_SQL: &str = r"
CREATE TABLE posts (
    id UUID PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    post_description TEXT NOT NULL,
    post_image TEXT NOT NULL,
    likes BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_posts_likes_non_negative CHECK (likes >= 0),
    CONSTRAINT chk_posts_username_present CHECK (length(username) > 0),
    CONSTRAINT chk_posts_description_present CHECK (length(post_description) > 0),
    CONSTRAINT chk_posts_image_present CHECK (length(post_image) > 0)
);

-- Listing walks creation order
CREATE INDEX idx_posts_created ON posts(created_at, id);
";
