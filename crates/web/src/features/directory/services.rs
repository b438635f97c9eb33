use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Entrant, Judge, Team},
    repository::directory::DirectoryRepository,
};
use uuid::Uuid;

pub async fn get_judge(pool: &PgPool, judge_id: Uuid) -> Result<Judge> {
    DirectoryRepository::new(pool).find_judge(judge_id).await
}

pub async fn get_team(pool: &PgPool, team_id: Uuid) -> Result<Team> {
    DirectoryRepository::new(pool).find_team(team_id).await
}

pub async fn get_entrant(pool: &PgPool, entrant_id: Uuid) -> Result<Entrant> {
    DirectoryRepository::new(pool).find_entrant(entrant_id).await
}
