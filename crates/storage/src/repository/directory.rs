use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::decode;
use crate::directory::CompetitionDirectory;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Competition, EngagementCounters, Entrant, EntrantOwner, Judge, Team};

#[derive(FromRow)]
struct CompetitionRow {
    competition_id: Uuid,
    name: String,
    year: i32,
    month: i32,
    format: String,
    status: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_at: NaiveDateTime,
}

impl TryFrom<CompetitionRow> for Competition {
    type Error = StorageError;

    fn try_from(row: CompetitionRow) -> Result<Self> {
        Ok(Self {
            competition_id: row.competition_id,
            name: row.name,
            year: row.year,
            month: row.month,
            format: decode("competitions.format", &row.format)?,
            status: decode("competitions.status", &row.status)?,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct JudgeRow {
    judge_id: Uuid,
    name: String,
    title: String,
    department: String,
    expertise: Vec<String>,
}

impl From<JudgeRow> for Judge {
    fn from(row: JudgeRow) -> Self {
        Judge::new(row.judge_id, row.name, row.title, row.department, row.expertise)
    }
}

#[derive(FromRow)]
struct TeamRow {
    team_id: Uuid,
    competition_id: Uuid,
    name: String,
    leader_id: Uuid,
    department: String,
    members: Vec<Uuid>,
    total_likes: i64,
}

impl TeamRow {
    fn into_team(self, app_ids: Vec<Uuid>) -> Team {
        Team {
            team_id: self.team_id,
            competition_id: self.competition_id,
            name: self.name,
            leader_id: self.leader_id,
            department: self.department,
            members: self.members,
            app_ids,
            total_likes: self.total_likes,
        }
    }
}

#[derive(FromRow)]
struct EntrantRow {
    entrant_id: Uuid,
    competition_id: Uuid,
    kind: String,
    title: String,
    creator_id: Option<Uuid>,
    team_id: Option<Uuid>,
    owner_name: String,
    department: String,
    likes: i64,
    views: i64,
    rating: Option<f64>,
    submitted_at: NaiveDateTime,
}

impl TryFrom<EntrantRow> for Entrant {
    type Error = StorageError;

    fn try_from(row: EntrantRow) -> Result<Self> {
        let kind = decode("entrants.kind", &row.kind)?;
        Ok(Self {
            entrant_id: row.entrant_id,
            competition_id: row.competition_id,
            kind,
            title: row.title,
            owner: EntrantOwner::resolve(kind, row.creator_id, row.team_id)?,
            owner_name: row.owner_name,
            department: row.department,
            counters: EngagementCounters {
                likes: row.likes,
                views: row.views,
            },
            rating: row.rating,
            submitted_at: row.submitted_at,
        })
    }
}

/// Read side of the competition directory: competitions, judges, teams and
/// entrants.
pub struct DirectoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DirectoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Competitions newest first, optionally restricted to one year.
    pub async fn list_competitions(
        &self,
        year: Option<i32>,
        pagination: PaginationParams,
    ) -> Result<(Vec<Competition>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM competitions WHERE 1=1");
        if let Some(year) = year {
            count.push(" AND year = ");
            count.push_bind(year);
        }
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT competition_id, name, year, month, format, status,
                   start_date, end_date, created_at
            FROM competitions
            WHERE 1=1
            "#,
        );
        if let Some(year) = year {
            query.push(" AND year = ");
            query.push_bind(year);
        }
        query.push(" ORDER BY year DESC, month DESC, created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let competitions = query
            .build_query_as::<CompetitionRow>()
            .fetch_all(self.pool)
            .await?
            .into_iter()
            .map(Competition::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((competitions, total_items))
    }

    pub async fn find_judge(&self, judge_id: Uuid) -> Result<Judge> {
        let row = sqlx::query_as::<_, JudgeRow>(
            r#"
            SELECT judge_id, name, title, department, expertise
            FROM judges
            WHERE judge_id = $1
            "#,
        )
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(Judge::from(row))
    }

    /// A team with its apps listed in submission order.
    pub async fn find_team(&self, team_id: Uuid) -> Result<Team> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT team_id, competition_id, name, leader_id, department, members, total_likes
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let app_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT entrant_id
            FROM entrants
            WHERE team_id = $1
            ORDER BY submitted_at, entrant_id
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(row.into_team(app_ids))
    }

    pub async fn find_entrant(&self, entrant_id: Uuid) -> Result<Entrant> {
        let row = sqlx::query_as::<_, EntrantRow>(
            r#"
            SELECT entrant_id, competition_id, kind, title, creator_id, team_id,
                   owner_name, department, likes, views, rating, submitted_at
            FROM entrants
            WHERE entrant_id = $1
            "#,
        )
        .bind(entrant_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Entrant::try_from(row)
    }

    /// Loads one competition and everything attached to it inside a single
    /// repeatable-read transaction, so the snapshot is consistent.
    pub async fn load_competition(&self, competition_id: Uuid) -> Result<CompetitionDirectory> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let competition = sqlx::query_as::<_, CompetitionRow>(
            r#"
            SELECT competition_id, name, year, month, format, status,
                   start_date, end_date, created_at
            FROM competitions
            WHERE competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let judges = sqlx::query_as::<_, JudgeRow>(
            r#"
            SELECT j.judge_id, j.name, j.title, j.department, j.expertise
            FROM judges j
            INNER JOIN competition_judges cj ON cj.judge_id = j.judge_id
            WHERE cj.competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *tx)
        .await?;

        let teams = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT team_id, competition_id, name, leader_id, department, members, total_likes
            FROM teams
            WHERE competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *tx)
        .await?;

        let entrants = sqlx::query_as::<_, EntrantRow>(
            r#"
            SELECT entrant_id, competition_id, kind, title, creator_id, team_id,
                   owner_name, department, likes, views, rating, submitted_at
            FROM entrants
            WHERE competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let entrants = entrants
            .into_iter()
            .map(Entrant::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(CompetitionDirectory::new(
            Competition::try_from(competition)?,
            judges.into_iter().map(Judge::from).collect(),
            teams
                .into_iter()
                .map(|row| row.into_team(Vec::new()))
                .collect(),
            entrants,
        ))
    }
}
