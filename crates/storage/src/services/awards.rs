use std::cmp::Ordering;

use crate::models::{Award, AwardType, CompetitionFormat};
use crate::models::award::UNRANKED;

/// What the `category` filter selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Placement awards, rank 1..=3.
    Ranking,
    /// Awards of type `popular`.
    Popular,
    /// Exact match on the award's category tag.
    Exact(String),
}

impl CategoryFilter {
    /// Blank input means "no category filter". Case is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" => None,
            "ranking" => Some(CategoryFilter::Ranking),
            "popular" => Some(CategoryFilter::Popular),
            other => Some(CategoryFilter::Exact(other.to_string())),
        }
    }

    fn matches(&self, award: &Award) -> bool {
        match self {
            CategoryFilter::Ranking => award.is_placement(),
            CategoryFilter::Popular => award.award_type == AwardType::Popular,
            CategoryFilter::Exact(category) => award.category.as_str() == category,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwardFilter {
    pub competition_type: Option<CompetitionFormat>,
    pub month: Option<i32>,
    pub category: Option<CategoryFilter>,
    /// Lowercased search text.
    pub query: Option<String>,
}

impl AwardFilter {
    pub fn with_query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_lowercase());
        self
    }

    /// Every present dimension must match; within `query`, any of app name,
    /// creator or award name may match.
    pub fn matches(&self, award: &Award) -> bool {
        if self
            .competition_type
            .is_some_and(|t| award.competition_type != t)
        {
            return false;
        }
        if self.month.is_some_and(|m| award.month != m) {
            return false;
        }
        if let Some(category) = &self.category
            && !category.matches(award)
        {
            return false;
        }
        if let Some(query) = &self.query {
            let hit = [&award.app_name, &award.creator, &award.award_name]
                .iter()
                .any(|field| field.to_lowercase().contains(query.as_str()));
            if !hit {
                return false;
            }
        }
        true
    }
}

pub fn filter_awards(awards: Vec<Award>, filter: &AwardFilter) -> Vec<Award> {
    awards.into_iter().filter(|a| filter.matches(a)).collect()
}

/// Placements 1..=3 first, unranked after them.
fn rank_key(rank: i16) -> (bool, i16) {
    (rank == UNRANKED, rank)
}

fn compare_awards(a: &Award, b: &Award) -> Ordering {
    b.month
        .cmp(&a.month)
        .then_with(|| rank_key(a.rank).cmp(&rank_key(b.rank)))
}

/// Month descending, then rank ascending with unranked last. Stable, so
/// awards that compare equal keep their incoming order.
pub fn sort_awards(awards: &mut [Award]) {
    awards.sort_by(compare_awards);
}

#[derive(Debug, Clone)]
pub struct MonthGroup {
    pub month: i32,
    pub awards: Vec<Award>,
}

/// Sorts, then splits into runs of equal month. Group order and member order
/// are exactly those of [`sort_awards`].
pub fn group_by_month(mut awards: Vec<Award>) -> Vec<MonthGroup> {
    sort_awards(&mut awards);

    let mut groups: Vec<MonthGroup> = Vec::new();
    for award in awards {
        match groups.last_mut() {
            Some(group) if group.month == award.month => group.awards.push(award),
            _ => groups.push(MonthGroup {
                month: award.month,
                awards: vec![award],
            }),
        }
    }
    groups
}

pub fn query_awards(awards: Vec<Award>, filter: &AwardFilter) -> Vec<MonthGroup> {
    group_by_month(filter_awards(awards, filter))
}
