use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::directory::CompetitionDirectory;
use crate::dto::ranking::{CompetitionRanking, RankingEntry, RankingMetric};
use crate::models::{EntrantStats, JudgeScore, RankingMode, ScoreWeighting, Team};
use crate::services::aggregation::{self, AggregateScore};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRanking {
    /// Best first.
    pub ranked: Vec<AggregateScore>,
    pub unscored: Vec<Uuid>,
}

/// Orders `entrant_ids` by aggregate score, descending. Ties go to the
/// entrant whose first judge score arrived earliest, then to the lower id.
/// Scores for entrants outside `entrant_ids` are ignored.
pub fn rank_by_score(
    entrant_ids: &[Uuid],
    scores: &[JudgeScore],
    weighting: ScoreWeighting,
) -> ScoreRanking {
    let aggregates = aggregation::aggregate_all(scores, weighting);
    let ids: BTreeSet<Uuid> = entrant_ids.iter().copied().collect();

    let mut ranked = Vec::new();
    let mut unscored = Vec::new();
    for id in ids {
        match aggregates.get(&id) {
            Some(agg) => ranked.push(agg.clone()),
            None => unscored.push(id),
        }
    }

    ranked.sort_by(compare_aggregates);

    ScoreRanking { ranked, unscored }
}

fn compare_aggregates(a: &AggregateScore, b: &AggregateScore) -> Ordering {
    b.aggregate
        .total_cmp(&a.aggregate)
        .then_with(|| a.first_submitted_at.cmp(&b.first_submitted_at))
        .then_with(|| a.entrant_id.cmp(&b.entrant_id))
}

/// Individual popularity: likes descending, ties by entrant id.
pub fn rank_by_popularity(stats: &[EntrantStats]) -> Vec<EntrantStats> {
    let mut ordered = stats.to_vec();
    ordered.sort_by(|a, b| {
        b.likes
            .cmp(&a.likes)
            .then_with(|| a.entrant_id.cmp(&b.entrant_id))
    });
    ordered
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPopularity {
    pub team_id: Uuid,
    /// `app_count * peak_likes`
    pub popularity_score: i64,
    pub app_count: usize,
    pub peak_likes: i64,
    pub total_views: i64,
}

/// Popularity index of one team from the current counters. Apps without
/// counters count towards the app total with zero likes and views.
pub fn team_popularity(team: &Team, stats: &HashMap<Uuid, EntrantStats>) -> TeamPopularity {
    let app_count = team.app_ids.len();
    let (peak_likes, total_views) = team
        .app_ids
        .iter()
        .filter_map(|id| stats.get(id))
        .fold((0i64, 0i64), |(peak, views), s| {
            (peak.max(s.likes), views + s.views)
        });

    TeamPopularity {
        team_id: team.team_id,
        popularity_score: app_count as i64 * peak_likes,
        app_count,
        peak_likes,
        total_views,
    }
}

/// Team popularity ranking: index descending, then summed views descending,
/// then team id. Recomputed on every call.
pub fn rank_by_team_popularity<'a>(
    teams: impl IntoIterator<Item = &'a Team>,
    stats: &HashMap<Uuid, EntrantStats>,
) -> Vec<TeamPopularity> {
    let mut ranked: Vec<TeamPopularity> = teams
        .into_iter()
        .map(|team| team_popularity(team, stats))
        .collect();
    ranked.sort_by(|a, b| {
        b.popularity_score
            .cmp(&a.popularity_score)
            .then_with(|| b.total_views.cmp(&a.total_views))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    ranked
}

/// Ranking for one competition. Popularity mode uses the team index for
/// team-format competitions and per-entrant likes otherwise.
pub fn get_ranking(
    directory: &CompetitionDirectory,
    scores: &[JudgeScore],
    mode: RankingMode,
    weighting: ScoreWeighting,
) -> CompetitionRanking {
    let competition_id = directory.competition().competition_id;
    let title = |id: Uuid| {
        directory
            .entrant(id)
            .map(|e| e.title.clone())
            .unwrap_or_default()
    };

    let (entries, unscored) = match mode {
        RankingMode::Score => {
            let ids: Vec<Uuid> = directory.entrants().map(|e| e.entrant_id).collect();
            let ranking = rank_by_score(&ids, scores, weighting);
            let entries = ranking
                .ranked
                .into_iter()
                .enumerate()
                .map(|(i, agg)| RankingEntry {
                    rank: position(i),
                    entrant_id: agg.entrant_id,
                    name: title(agg.entrant_id),
                    metric: RankingMetric::Score {
                        aggregate_score: agg.aggregate,
                        breakdown: agg.breakdown,
                        judge_count: agg.judge_count,
                    },
                })
                .collect();
            (entries, ranking.unscored)
        }
        RankingMode::Popularity if directory.competition().uses_team_popularity() => {
            let stats = directory.entrant_stats();
            let entries = rank_by_team_popularity(directory.teams(), &stats)
                .into_iter()
                .enumerate()
                .map(|(i, team)| RankingEntry {
                    rank: position(i),
                    entrant_id: team.team_id,
                    name: directory
                        .team(team.team_id)
                        .map(|t| t.name.clone())
                        .unwrap_or_default(),
                    metric: RankingMetric::TeamPopularity {
                        popularity_score: team.popularity_score,
                        app_count: team.app_count,
                        peak_likes: team.peak_likes,
                        total_views: team.total_views,
                    },
                })
                .collect();
            (entries, Vec::new())
        }
        RankingMode::Popularity => {
            let stats: Vec<EntrantStats> = directory.entrants().map(|e| e.stats()).collect();
            let entries = rank_by_popularity(&stats)
                .into_iter()
                .enumerate()
                .map(|(i, s)| RankingEntry {
                    rank: position(i),
                    entrant_id: s.entrant_id,
                    name: title(s.entrant_id),
                    metric: RankingMetric::Popularity {
                        likes: s.likes,
                        views: s.views,
                    },
                })
                .collect();
            (entries, Vec::new())
        }
    };

    CompetitionRanking {
        competition_id,
        mode,
        entries,
        unscored,
    }
}

fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
