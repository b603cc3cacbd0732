use chrono::Utc;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        carousel::{Carousel, CarouselInput},
        social_link::{SocialLink, SocialLinkInput},
        video::{Video, VideoInput},
    },
};

/// Storefront content: carousels, videos and social links.
#[derive(Clone)]
pub struct ContentStore {
    db: DbPool,
}

impl ContentStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn list_carousels(&self, active_only: bool) -> Result<Vec<Carousel>, AppError> {
        let items = sqlx::query_as::<_, Carousel>(
            "SELECT * FROM carousels WHERE (?1 = 0 OR is_active = 1) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    pub async fn create_carousel(&self, input: CarouselInput) -> Result<Carousel, AppError> {
        let input = input.validated()?;
        let item = sqlx::query_as::<_, Carousel>(
            r#"INSERT INTO carousels
                   (title, image_url, link_url, sort_order, is_active, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
               RETURNING *"#,
        )
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(item)
    }

    pub async fn update_carousel(
        &self,
        id: i64,
        input: CarouselInput,
    ) -> Result<Carousel, AppError> {
        let input = input.validated()?;
        sqlx::query_as::<_, Carousel>(
            r#"UPDATE carousels
               SET title = ?1, image_url = ?2, link_url = ?3, sort_order = ?4,
                   is_active = ?5, updated_at = ?6
               WHERE id = ?7
               RETURNING *"#,
        )
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete_carousel(&self, id: i64) -> Result<(), AppError> {
        self.delete_from("carousels", id).await
    }

    pub async fn list_videos(&self, active_only: bool) -> Result<Vec<Video>, AppError> {
        let items = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos WHERE (?1 = 0 OR is_active = 1) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    pub async fn create_video(&self, input: VideoInput) -> Result<Video, AppError> {
        let input = input.validated()?;
        let item = sqlx::query_as::<_, Video>(
            r#"INSERT INTO videos
                   (title, video_url, cover_url, sort_order, is_active, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
               RETURNING *"#,
        )
        .bind(&input.title)
        .bind(&input.video_url)
        .bind(&input.cover_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(item)
    }

    pub async fn update_video(&self, id: i64, input: VideoInput) -> Result<Video, AppError> {
        let input = input.validated()?;
        sqlx::query_as::<_, Video>(
            r#"UPDATE videos
               SET title = ?1, video_url = ?2, cover_url = ?3, sort_order = ?4,
                   is_active = ?5, updated_at = ?6
               WHERE id = ?7
               RETURNING *"#,
        )
        .bind(&input.title)
        .bind(&input.video_url)
        .bind(&input.cover_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete_video(&self, id: i64) -> Result<(), AppError> {
        self.delete_from("videos", id).await
    }

    pub async fn list_social_links(&self, active_only: bool) -> Result<Vec<SocialLink>, AppError> {
        let items = sqlx::query_as::<_, SocialLink>(
            "SELECT * FROM social_links WHERE (?1 = 0 OR is_active = 1) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    pub async fn create_social_link(&self, input: SocialLinkInput) -> Result<SocialLink, AppError> {
        let input = input.validated()?;
        let item = sqlx::query_as::<_, SocialLink>(
            r#"INSERT INTO social_links
                   (platform, url, icon_url, sort_order, is_active, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
               RETURNING *"#,
        )
        .bind(&input.platform)
        .bind(&input.url)
        .bind(&input.icon_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(item)
    }

    pub async fn update_social_link(
        &self,
        id: i64,
        input: SocialLinkInput,
    ) -> Result<SocialLink, AppError> {
        let input = input.validated()?;
        sqlx::query_as::<_, SocialLink>(
            r#"UPDATE social_links
               SET platform = ?1, url = ?2, icon_url = ?3, sort_order = ?4,
                   is_active = ?5, updated_at = ?6
               WHERE id = ?7
               RETURNING *"#,
        )
        .bind(&input.platform)
        .bind(&input.url)
        .bind(&input.icon_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete_social_link(&self, id: i64) -> Result<(), AppError> {
        self.delete_from("social_links", id).await
    }

    // `table` is always one of the literals above, never user input.
    async fn delete_from(&self, table: &'static str, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?1"))
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
