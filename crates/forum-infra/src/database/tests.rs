#[cfg(test)]
mod tests {
    use crate::database::entity::{like, post};
    use crate::database::postgres_repo::{PostgresLikeRepository, PostgresPostRepository};
    use forum_core::domain::Post;
    use forum_core::error::RepoError;
    use forum_core::ports::{BaseRepository, LikeRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn find_post_by_id_maps_model_to_domain() {
        let post_id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                user_id,
                title: "Hello".to_owned(),
                content: "World".to_owned(),
                major: Some("csc".to_owned()),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.id, post_id);
        assert_eq!(found.title, "Hello");
        assert_eq!(found.major.as_deref(), Some("csc"));
    }

    #[tokio::test]
    async fn find_like_for_pair() {
        let user_id = uuid::Uuid::new_v4();
        let post_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![like::Model {
                id: uuid::Uuid::new_v4(),
                user_id,
                post_id,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let found = repo
            .find_by_user_and_post(user_id, post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.post_id, post_id);
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Result<(), RepoError> =
            BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
