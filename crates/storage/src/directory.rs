use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Competition, Entrant, EntrantStats, Judge, Team};

/// Immutable view of one competition and everything attached to it.
///
/// Built once per request by `DirectoryRepository::load_competition` (or
/// directly from fixtures in tests) and passed by reference into the
/// engines, so every computation in a request sees the same data.
#[derive(Debug, Clone)]
pub struct CompetitionDirectory {
    competition: Competition,
    judges: BTreeMap<Uuid, Judge>,
    teams: BTreeMap<Uuid, Team>,
    entrants: BTreeMap<Uuid, Entrant>,
}

impl CompetitionDirectory {
    /// Assembles the snapshot. Each team's `app_ids` is rebuilt from the
    /// entrants it owns, ordered by submission time then id.
    pub fn new(
        competition: Competition,
        judges: Vec<Judge>,
        teams: Vec<Team>,
        entrants: Vec<Entrant>,
    ) -> Self {
        let mut teams: BTreeMap<Uuid, Team> = teams
            .into_iter()
            .map(|mut team| {
                team.app_ids.clear();
                (team.team_id, team)
            })
            .collect();

        let mut submitted: Vec<&Entrant> = entrants.iter().collect();
        submitted.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.entrant_id.cmp(&b.entrant_id))
        });
        for entrant in submitted {
            if let Some(team) = entrant.team_id().and_then(|id| teams.get_mut(&id)) {
                team.app_ids.push(entrant.entrant_id);
            }
        }

        Self {
            competition,
            judges: judges.into_iter().map(|j| (j.judge_id, j)).collect(),
            teams,
            entrants: entrants.into_iter().map(|e| (e.entrant_id, e)).collect(),
        }
    }

    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    pub fn judge(&self, judge_id: Uuid) -> Result<&Judge> {
        self.judges.get(&judge_id).ok_or(StorageError::NotFound)
    }

    pub fn team(&self, team_id: Uuid) -> Result<&Team> {
        self.teams.get(&team_id).ok_or(StorageError::NotFound)
    }

    pub fn entrant(&self, entrant_id: Uuid) -> Result<&Entrant> {
        self.entrants.get(&entrant_id).ok_or(StorageError::NotFound)
    }

    pub fn judges(&self) -> impl Iterator<Item = &Judge> {
        self.judges.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn entrants(&self) -> impl Iterator<Item = &Entrant> {
        self.entrants.values()
    }

    pub fn team_apps(&self, team_id: Uuid) -> Result<Vec<&Entrant>> {
        let team = self.team(team_id)?;
        Ok(team
            .app_ids
            .iter()
            .filter_map(|id| self.entrants.get(id))
            .collect())
    }

    /// Only judges assigned to the competition are part of the snapshot.
    pub fn is_judge_assigned(&self, judge_id: Uuid) -> bool {
        self.judges.contains_key(&judge_id)
    }

    pub fn entrant_stats(&self) -> HashMap<Uuid, EntrantStats> {
        self.entrants
            .values()
            .map(|e| (e.entrant_id, e.stats()))
            .collect()
    }
}
