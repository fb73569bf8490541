//! Post repository backed by Postgres.

use async_trait::async_trait;
use chrono::Utc;
use postwall_core::post::{NewPost, Post, PostError, PostStore};
use postwall_shared::types::PostId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::error;

use crate::entities::posts;

/// Post repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    /// Creates a new post repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_post(model: posts::Model) -> Post {
    Post {
        id: PostId::from_uuid(model.id),
        username: model.username,
        post_description: model.post_description,
        post_image: model.post_image,
        // chk_posts_likes_non_negative keeps this in range
        likes: u64::try_from(model.likes).unwrap_or_default(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn store_error(op: &'static str) -> impl Fn(DbErr) -> PostError {
    move |e| {
        error!(op, error = %e, "post query failed");
        PostError::store(e.to_string())
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, PostError> {
        let now = Utc::now().into();

        let post = posts::ActiveModel {
            id: Set(PostId::new().into_inner()),
            username: Set(input.username),
            post_description: Set(input.post_description),
            post_image: Set(input.post_image),
            likes: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        post.insert(&self.db)
            .await
            .map(to_post)
            .map_err(store_error("create"))
    }

    async fn find_all(&self) -> Result<Vec<Post>, PostError> {
        let models = posts::Entity::find()
            .order_by_asc(posts::Column::CreatedAt)
            .order_by_asc(posts::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error("find_all"))?;

        Ok(models.into_iter().map(to_post).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        posts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|model| model.map(to_post))
            .map_err(store_error("find_by_id"))
    }

    async fn increment_likes(&self, id: PostId) -> Result<Option<Post>, PostError> {
        // Single UPDATE ... RETURNING so concurrent likes serialize on the row lock.
        let updated = posts::Entity::update_many()
            .col_expr(posts::Column::Likes, Expr::col(posts::Column::Likes).add(1))
            .col_expr(posts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(posts::Column::Id.eq(id.into_inner()))
            .exec_with_returning(&self.db)
            .await
            .map_err(store_error("increment_likes"))?;

        Ok(updated.into_iter().next().map(to_post))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<u64, PostError> {
        let result = posts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(store_error("delete_by_id"))?;

        Ok(result.rows_affected)
    }
}
