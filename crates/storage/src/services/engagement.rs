use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::dto::engagement::{EngagementResponse, FavoriteResponse, LikeResponse, ViewResponse};
use crate::error::{Result, StorageError};
use crate::models::{Caller, EngagementCounters};

/// Persistence seam for the engagement ledger.
///
/// Implementations must make `insert_like` atomic: the event insert and the
/// counter increments either all happen or none do, and a second insert for
/// the same (user, entrant, day) must be refused by the store itself.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn has_liked_on(
        &self,
        user_id: Uuid,
        entrant_id: Uuid,
        day: NaiveDate,
    ) -> Result<bool>;

    /// Returns the new like count, or `None` if the event already existed.
    async fn insert_like(
        &self,
        user_id: Uuid,
        entrant_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<i64>>;

    /// Returns whether a row was inserted.
    async fn add_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool>;

    /// Returns whether a row was deleted. Unknown entrants are `NotFound`,
    /// as for every other engagement call.
    async fn remove_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool>;

    async fn is_favorited(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool>;

    /// Returns the new view count.
    async fn increment_views(&self, entrant_id: Uuid) -> Result<i64>;

    async fn counters(&self, entrant_id: Uuid) -> Result<EngagementCounters>;
}

/// Records one like per user, entrant and calendar day.
///
/// The pre-flight lookup only saves a write for obvious repeats; the store's
/// uniqueness guarantee decides races between concurrent requests.
pub async fn like<S>(
    store: &S,
    caller: &Caller,
    entrant_id: Uuid,
    today: NaiveDate,
) -> Result<LikeResponse>
where
    S: EngagementStore + ?Sized,
{
    let user_id = caller.user_id()?;

    if store.has_liked_on(user_id, entrant_id, today).await? {
        return Err(StorageError::AlreadyLiked);
    }

    match store
        .insert_like(user_id, entrant_id, today)
        .await
        .map_err(StorageError::classify)?
    {
        Some(likes) => Ok(LikeResponse { entrant_id, likes }),
        None => Err(StorageError::AlreadyLiked),
    }
}

pub async fn has_liked_today<S>(
    store: &S,
    user_id: Uuid,
    entrant_id: Uuid,
    today: NaiveDate,
) -> Result<bool>
where
    S: EngagementStore + ?Sized,
{
    store.has_liked_on(user_id, entrant_id, today).await
}

pub async fn add_favorite<S>(
    store: &S,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse>
where
    S: EngagementStore + ?Sized,
{
    let user_id = caller.user_id()?;
    let changed = store
        .add_favorite(user_id, entrant_id)
        .await
        .map_err(StorageError::classify)?;

    Ok(FavoriteResponse {
        entrant_id,
        is_favorited: true,
        changed,
    })
}

pub async fn remove_favorite<S>(
    store: &S,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse>
where
    S: EngagementStore + ?Sized,
{
    let user_id = caller.user_id()?;
    let changed = store
        .remove_favorite(user_id, entrant_id)
        .await
        .map_err(StorageError::classify)?;

    Ok(FavoriteResponse {
        entrant_id,
        is_favorited: false,
        changed,
    })
}

/// Adds the favorite, or removes it if it was already there.
pub async fn toggle_favorite<S>(
    store: &S,
    caller: &Caller,
    entrant_id: Uuid,
) -> Result<FavoriteResponse>
where
    S: EngagementStore + ?Sized,
{
    let added = add_favorite(store, caller, entrant_id).await?;
    if added.changed {
        return Ok(added);
    }
    remove_favorite(store, caller, entrant_id).await
}

/// The "try it" action. Every call counts.
pub async fn record_view<S>(store: &S, entrant_id: Uuid) -> Result<ViewResponse>
where
    S: EngagementStore + ?Sized,
{
    let views = store.increment_views(entrant_id).await?;
    Ok(ViewResponse { entrant_id, views })
}

pub async fn like_count<S>(store: &S, entrant_id: Uuid) -> Result<i64>
where
    S: EngagementStore + ?Sized,
{
    Ok(store.counters(entrant_id).await?.likes)
}

pub async fn view_count<S>(store: &S, entrant_id: Uuid) -> Result<i64>
where
    S: EngagementStore + ?Sized,
{
    Ok(store.counters(entrant_id).await?.views)
}

/// Counters plus, for a signed-in caller, their own like/favorite state.
pub async fn engagement_summary<S>(
    store: &S,
    caller: &Caller,
    entrant_id: Uuid,
    today: NaiveDate,
) -> Result<EngagementResponse>
where
    S: EngagementStore + ?Sized,
{
    let counters = store.counters(entrant_id).await?;

    let (liked_today, is_favorited) = match caller.user_id() {
        Ok(user_id) => (
            Some(store.has_liked_on(user_id, entrant_id, today).await?),
            Some(store.is_favorited(user_id, entrant_id).await?),
        ),
        Err(_) => (None, None),
    };

    Ok(EngagementResponse {
        entrant_id,
        likes: counters.likes,
        views: counters.views,
        liked_today,
        is_favorited,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Tables {
        likes: HashSet<(Uuid, Uuid, NaiveDate)>,
        favorites: HashSet<(Uuid, Uuid)>,
        counters: HashMap<Uuid, EngagementCounters>,
    }

    /// Mirrors the SQL store: one lock plays the role of the transaction and
    /// the sets play the role of the primary keys.
    #[derive(Default)]
    struct MemoryEngagementStore {
        tables: Mutex<Tables>,
        /// When set, `has_liked_on` always answers false, simulating a
        /// concurrent request that passed the pre-flight check.
        stale_reads: bool,
    }

    impl MemoryEngagementStore {
        fn with_entrants(ids: &[Uuid]) -> Self {
            let store = Self::default();
            {
                let mut tables = store.tables.lock().unwrap();
                for id in ids {
                    tables.counters.insert(*id, EngagementCounters::default());
                }
            }
            store
        }
    }

    #[async_trait]
    impl EngagementStore for MemoryEngagementStore {
        async fn has_liked_on(
            &self,
            user_id: Uuid,
            entrant_id: Uuid,
            day: NaiveDate,
        ) -> Result<bool> {
            if self.stale_reads {
                return Ok(false);
            }
            Ok(self.tables.lock().unwrap().likes.contains(&(user_id, entrant_id, day)))
        }

        async fn insert_like(
            &self,
            user_id: Uuid,
            entrant_id: Uuid,
            day: NaiveDate,
        ) -> Result<Option<i64>> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.counters.contains_key(&entrant_id) {
                return Err(StorageError::NotFound);
            }
            if !tables.likes.insert((user_id, entrant_id, day)) {
                return Ok(None);
            }
            let counters = tables.counters.entry(entrant_id).or_default();
            counters.likes += 1;
            Ok(Some(counters.likes))
        }

        async fn add_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.counters.contains_key(&entrant_id) {
                return Err(StorageError::NotFound);
            }
            Ok(tables.favorites.insert((user_id, entrant_id)))
        }

        async fn remove_favorite(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.counters.contains_key(&entrant_id) {
                return Err(StorageError::NotFound);
            }
            Ok(tables.favorites.remove(&(user_id, entrant_id)))
        }

        async fn is_favorited(&self, user_id: Uuid, entrant_id: Uuid) -> Result<bool> {
            Ok(self.tables.lock().unwrap().favorites.contains(&(user_id, entrant_id)))
        }

        async fn increment_views(&self, entrant_id: Uuid) -> Result<i64> {
            let mut tables = self.tables.lock().unwrap();
            let counters = tables
                .counters
                .get_mut(&entrant_id)
                .ok_or(StorageError::NotFound)?;
            counters.views += 1;
            Ok(counters.views)
        }

        async fn counters(&self, entrant_id: Uuid) -> Result<EngagementCounters> {
            self.tables
                .lock()
                .unwrap()
                .counters
                .get(&entrant_id)
                .copied()
                .ok_or(StorageError::NotFound)
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_second_like_same_day_is_rejected_without_counting() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let caller = Caller::user(Uuid::new_v4());

        let first = like(&store, &caller, entrant, day(1)).await.unwrap();
        assert_eq!(first.likes, 1);

        let before = like_count(&store, entrant).await.unwrap();
        let second = like(&store, &caller, entrant, day(1)).await;
        assert!(matches!(second, Err(StorageError::AlreadyLiked)));
        assert_eq!(like_count(&store, entrant).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_likes_on_different_days_both_count() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let caller = Caller::user(Uuid::new_v4());

        like(&store, &caller, entrant, day(1)).await.unwrap();
        let second = like(&store, &caller, entrant, day(2)).await.unwrap();

        assert_eq!(second.likes, 2);
        assert_eq!(like_count(&store, entrant).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_store_uniqueness_guards_when_preflight_is_stale() {
        let entrant = Uuid::new_v4();
        let mut store = MemoryEngagementStore::with_entrants(&[entrant]);
        store.stale_reads = true;
        let caller = Caller::user(Uuid::new_v4());

        like(&store, &caller, entrant, day(3)).await.unwrap();
        let raced = like(&store, &caller, entrant, day(3)).await;

        assert!(matches!(raced, Err(StorageError::AlreadyLiked)));
        assert_eq!(like_count(&store, entrant).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_likes_count_once() {
        let entrant = Uuid::new_v4();
        let store = Arc::new(MemoryEngagementStore {
            stale_reads: true,
            ..MemoryEngagementStore::with_entrants(&[entrant])
        });
        let caller = Caller::user(Uuid::new_v4());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { like(store.as_ref(), &caller, entrant, day(4)).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(StorageError::AlreadyLiked) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(like_count(store.as_ref(), entrant).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_like_requires_auth() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);

        let result = like(&store, &Caller::Anonymous, entrant, day(1)).await;
        assert!(matches!(result, Err(StorageError::AuthRequired)));
        assert_eq!(like_count(&store, entrant).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_like_unknown_entrant_is_not_found() {
        let store = MemoryEngagementStore::default();
        let caller = Caller::user(Uuid::new_v4());

        let result = like(&store, &caller, Uuid::new_v4(), day(1)).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_has_liked_today_is_day_scoped() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let user = Uuid::new_v4();

        like(&store, &Caller::user(user), entrant, day(1)).await.unwrap();

        assert!(has_liked_today(&store, user, entrant, day(1)).await.unwrap());
        assert!(!has_liked_today(&store, user, entrant, day(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_favorite_operations_are_idempotent() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let caller = Caller::user(Uuid::new_v4());

        assert!(add_favorite(&store, &caller, entrant).await.unwrap().changed);
        let again = add_favorite(&store, &caller, entrant).await.unwrap();
        assert!(again.is_favorited);
        assert!(!again.changed);

        assert!(remove_favorite(&store, &caller, entrant).await.unwrap().changed);
        let again = remove_favorite(&store, &caller, entrant).await.unwrap();
        assert!(!again.is_favorited);
        assert!(!again.changed);
    }

    #[tokio::test]
    async fn test_favorites_on_unknown_entrant_are_not_found() {
        let store = MemoryEngagementStore::with_entrants(&[]);
        let caller = Caller::user(Uuid::new_v4());
        let unknown = Uuid::new_v4();

        assert!(matches!(
            remove_favorite(&store, &caller, unknown).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            add_favorite(&store, &caller, unknown).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_toggle_flips_favorite_state() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let caller = Caller::user(Uuid::new_v4());

        assert!(toggle_favorite(&store, &caller, entrant).await.unwrap().is_favorited);
        assert!(!toggle_favorite(&store, &caller, entrant).await.unwrap().is_favorited);
        assert!(toggle_favorite(&store, &caller, entrant).await.unwrap().is_favorited);
    }

    #[tokio::test]
    async fn test_views_are_not_deduplicated() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);

        for _ in 0..3 {
            record_view(&store, entrant).await.unwrap();
        }

        assert_eq!(view_count(&store, entrant).await.unwrap(), 3);
        assert_eq!(like_count(&store, entrant).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_summary_hides_personal_flags_from_anonymous_callers() {
        let entrant = Uuid::new_v4();
        let store = MemoryEngagementStore::with_entrants(&[entrant]);
        let user = Uuid::new_v4();
        like(&store, &Caller::user(user), entrant, day(1)).await.unwrap();

        let anonymous = engagement_summary(&store, &Caller::Anonymous, entrant, day(1))
            .await
            .unwrap();
        assert_eq!(anonymous.likes, 1);
        assert_eq!(anonymous.liked_today, None);

        let mine = engagement_summary(&store, &Caller::user(user), entrant, day(1))
            .await
            .unwrap();
        assert_eq!(mine.liked_today, Some(true));
        assert_eq!(mine.is_favorited, Some(false));
    }
}
