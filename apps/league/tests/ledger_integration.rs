//! Integration tests for the standings ledger
//!
//! These tests drive the ledger through its public API against in-memory
//! storage, including storage that fails on demand, and check that memory
//! and storage always agree.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use saturday_league::domain::matches::Match;
use saturday_league::domain::repositories::{MatchRepository, RepositoryError, TeamRepository};
use saturday_league::domain::scoring::Aggregate;
use saturday_league::domain::team::{Team, TeamName};
use saturday_league::infrastructure::repositories::{
    InMemoryMatchRepository, InMemoryTeamRepository,
};
use saturday_league::ledger::{Ledger, LedgerError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::timeout;
use uuid::Uuid;

/// Team storage that fails one chosen save call
#[derive(Default)]
struct FlakyTeamRepository {
    inner: InMemoryTeamRepository,
    saves: AtomicUsize,
    /// 1-based save call to fail; 0 never fails
    fail_at: AtomicUsize,
    fail_deletes: AtomicBool,
}

impl FlakyTeamRepository {
    /// Fails the `n`th save from now (1 = the next one)
    fn fail_nth_save(&self, n: usize) {
        let done = self.saves.load(Ordering::SeqCst);
        self.fail_at.store(done + n, Ordering::SeqCst);
    }
}

#[async_trait]
impl TeamRepository for FlakyTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), RepositoryError> {
        let call = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_at.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("team store unavailable".to_string()));
        }
        self.inner.save(team).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("team store unavailable".to_string()));
        }
        self.inner.delete(id).await
    }

    async fn load_all(&self) -> Result<Vec<Team>, RepositoryError> {
        self.inner.load_all().await
    }
}

/// Match storage whose writes can be switched off or made to hang
#[derive(Default)]
struct FlakyMatchRepository {
    inner: InMemoryMatchRepository,
    fail_saves: AtomicBool,
    fail_deletes: AtomicBool,
    stall_saves: AtomicBool,
    stall_deletes: AtomicBool,
}

#[async_trait]
impl MatchRepository for FlakyMatchRepository {
    async fn save(&self, game: &Match) -> Result<(), RepositoryError> {
        if self.stall_saves.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("match store unavailable".to_string()));
        }
        self.inner.save(game).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        if self.stall_deletes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("match store unavailable".to_string()));
        }
        self.inner.delete(id).await
    }

    async fn load_all(&self) -> Result<Vec<Match>, RepositoryError> {
        self.inner.load_all().await
    }
}

struct Fixture {
    ledger: Ledger,
    teams: Arc<FlakyTeamRepository>,
    matches: Arc<FlakyMatchRepository>,
}

fn setup() -> Fixture {
    let teams = Arc::new(FlakyTeamRepository::default());
    let matches = Arc::new(FlakyMatchRepository::default());
    let ledger = Ledger::new(teams.clone(), matches.clone());

    Fixture {
        ledger,
        teams,
        matches,
    }
}

/// Stored team statistics keyed by id, in storage order
async fn stored_aggregates(teams: &FlakyTeamRepository) -> Vec<(Uuid, Aggregate)> {
    teams
        .load_all()
        .await
        .expect("load teams")
        .iter()
        .map(|t| (t.id(), *t.aggregate()))
        .collect()
}

/// In-memory team statistics keyed by id, in registration order
async fn ledger_aggregates(ledger: &Ledger, ids: &[Uuid]) -> Vec<(Uuid, Aggregate)> {
    let mut out = Vec::new();
    for id in ids {
        let team = ledger.team(*id).await.expect("team exists");
        out.push((*id, *team.aggregate()));
    }
    out
}

#[tokio::test]
async fn test_failed_second_team_save_restores_first_team() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();
    let blue = fx.ledger.register_team("Blue").await.unwrap();
    let before = stored_aggregates(&fx.teams).await;

    fx.teams.fail_nth_save(2);
    let result = fx.ledger.record_match(red, blue, 3, 1, Utc::now()).await;

    assert!(
        matches!(result, Err(LedgerError::PersistenceFailure(_))),
        "Storage failure should surface as PersistenceFailure: {:?}",
        result
    );
    assert_eq!(stored_aggregates(&fx.teams).await, before);
    assert_eq!(ledger_aggregates(&fx.ledger, &[red, blue]).await, before);
    assert!(fx.ledger.list_matches().await.is_empty());
    assert!(fx.matches.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_match_save_restores_both_teams() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();
    let blue = fx.ledger.register_team("Blue").await.unwrap();
    let before = stored_aggregates(&fx.teams).await;

    fx.matches.fail_saves.store(true, Ordering::SeqCst);
    let result = fx.ledger.record_match(red, blue, 0, 0, Utc::now()).await;

    assert!(matches!(result, Err(LedgerError::PersistenceFailure(_))));
    assert_eq!(stored_aggregates(&fx.teams).await, before);
    assert_eq!(ledger_aggregates(&fx.ledger, &[red, blue]).await, before);
    assert!(fx.ledger.list_matches().await.is_empty());

    // storage recovers and the same submission goes through
    fx.matches.fail_saves.store(false, Ordering::SeqCst);
    fx.ledger
        .record_match(red, blue, 0, 0, Utc::now())
        .await
        .expect("record after recovery");
    assert_eq!(fx.ledger.team(red).await.unwrap().points(), 1);
}

#[tokio::test]
async fn test_failed_match_delete_keeps_match_applied() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();
    let blue = fx.ledger.register_team("Blue").await.unwrap();
    let game = fx.ledger.record_match(red, blue, 2, 0, Utc::now()).await.unwrap();
    let before = stored_aggregates(&fx.teams).await;

    fx.matches.fail_deletes.store(true, Ordering::SeqCst);
    let result = fx.ledger.remove_match(game).await;

    assert!(matches!(result, Err(LedgerError::PersistenceFailure(_))));
    assert_eq!(stored_aggregates(&fx.teams).await, before);
    assert_eq!(ledger_aggregates(&fx.ledger, &[red, blue]).await, before);
    assert_eq!(fx.ledger.list_matches().await.len(), 1);
    assert_eq!(fx.matches.load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_registration_leaves_no_team() {
    let fx = setup();

    fx.teams.fail_nth_save(1);
    let result = fx.ledger.register_team("Red").await;

    assert!(matches!(result, Err(LedgerError::PersistenceFailure(_))));
    assert!(fx.ledger.list_standings().await.is_empty());

    // the name is still free
    fx.ledger.register_team("Red").await.expect("retry succeeds");
}

#[tokio::test]
async fn test_failed_team_delete_keeps_team() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();

    fx.teams.fail_deletes.store(true, Ordering::SeqCst);
    let result = fx.ledger.remove_team(red).await;

    assert!(matches!(result, Err(LedgerError::PersistenceFailure(_))));
    assert!(fx.ledger.team(red).await.is_some());
}

#[tokio::test]
async fn test_concurrent_results_do_not_lose_updates() {
    let ledger = Arc::new(Ledger::new(
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryMatchRepository::new()),
    ));

    let mut ids = Vec::new();
    for name in ["North", "South", "East", "West"] {
        ids.push(ledger.register_team(name).await.unwrap());
    }

    let mut handles = Vec::new();
    for i in 0..40usize {
        let ledger = ledger.clone();
        let home = ids[i % 4];
        let away = ids[(i + 1 + i / 4 % 3) % 4];
        let (home_score, away_score) = ((i % 3) as i64, (i % 2) as i64);
        handles.push(tokio::spawn(async move {
            ledger
                .record_match(home, away, home_score, away_score, Utc::now())
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked").expect("record match");
    }

    let matches = ledger.list_matches().await;
    assert_eq!(matches.len(), 40);

    let standings = ledger.list_standings().await;
    let total_played: u32 = standings.iter().map(Team::played).sum();
    let total_goal_difference: i64 = standings.iter().map(Team::goal_difference).sum();
    assert_eq!(total_played, 80);
    assert_eq!(total_goal_difference, 0);

    for team in &standings {
        let involved = matches.iter().filter(|m| m.involves(team.id())).count();
        assert_eq!(team.played() as usize, involved);
        assert!(team.aggregate().check_invariants().is_ok());
    }
}

#[tokio::test]
async fn test_readers_never_see_half_applied_result() {
    let ledger = Arc::new(Ledger::new(
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryMatchRepository::new()),
    ));
    let red = ledger.register_team("Red").await.unwrap();
    let blue = ledger.register_team("Blue").await.unwrap();

    let writer = {
        let ledger = ledger.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                ledger.record_match(red, blue, 1, 0, Utc::now()).await.unwrap();
            }
        })
    };

    for _ in 0..50 {
        let standings = ledger.list_standings().await;
        let played: Vec<u32> = standings.iter().map(Team::played).collect();
        assert_eq!(played[0], played[1], "both sides move together");
        tokio::task::yield_now().await;
    }

    writer.await.unwrap();
}

#[tokio::test]
async fn test_points_invariant_over_mixed_sequence() {
    let ledger = Ledger::new(
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryMatchRepository::new()),
    );
    let a = ledger.register_team("A").await.unwrap();
    let b = ledger.register_team("B").await.unwrap();
    let c = ledger.register_team("C").await.unwrap();

    let results = [
        (a, b, 2, 0),
        (b, c, 1, 1),
        (c, a, 4, 3),
        (a, c, 0, 0),
        (b, a, 0, 5),
        (c, b, 2, 1),
    ];

    let mut recorded = Vec::new();
    for (home, away, hs, aws) in results {
        recorded.push(ledger.record_match(home, away, hs, aws, Utc::now()).await.unwrap());
        for team in ledger.list_standings().await {
            assert!(team.aggregate().check_invariants().is_ok());
        }
    }

    // remove every other match, then the rest
    for id in recorded.iter().step_by(2).chain(recorded.iter().skip(1).step_by(2)) {
        ledger.remove_match(*id).await.unwrap();
        for team in ledger.list_standings().await {
            assert_eq!(team.points(), 3 * team.wins() + team.draws());
            assert_eq!(team.played(), team.wins() + team.draws() + team.losses());
        }
    }

    for team in ledger.list_standings().await {
        assert_eq!(*team.aggregate(), Aggregate::default());
    }
}

#[tokio::test]
async fn test_standings_stable_across_reads() {
    let ledger = Ledger::new(
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryMatchRepository::new()),
    );
    for name in ["One", "Two", "Three", "Four"] {
        ledger.register_team(name).await.unwrap();
    }

    let first = ledger.list_standings().await;
    let second = ledger.list_standings().await;

    assert_eq!(first, second);
    let names: Vec<&str> = first.iter().map(|t| t.name().as_str()).collect();
    assert_eq!(names, vec!["One", "Two", "Three", "Four"]);
}

#[tokio::test]
async fn test_load_restores_equivalent_view() {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let matches = Arc::new(InMemoryMatchRepository::new());

    let original = Ledger::new(teams.clone(), matches.clone());
    let red = original.register_team("Red").await.unwrap();
    let blue = original.register_team("Blue").await.unwrap();
    let green = original.register_team("Green").await.unwrap();
    let now = Utc::now();
    original
        .record_match(red, blue, 3, 1, now - Duration::days(2))
        .await
        .unwrap();
    original
        .record_match(green, red, 1, 1, now - Duration::days(1))
        .await
        .unwrap();
    original.record_match(blue, green, 0, 2, now).await.unwrap();

    let reloaded = Ledger::load(teams, matches).await.expect("load ledger");

    assert_eq!(reloaded.list_standings().await, original.list_standings().await);
    assert_eq!(reloaded.list_matches().await, original.list_matches().await);
}

#[tokio::test]
async fn test_load_rejects_inconsistent_team() {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let corrupt = Team::from_persistence(
        Uuid::new_v4(),
        TeamName::new("Broken").unwrap(),
        Aggregate {
            played: 1,
            wins: 1,
            points: 1,
            ..Aggregate::default()
        },
        Utc::now(),
    );
    teams.save(&corrupt).await.unwrap();

    let result = Ledger::load(teams, Arc::new(InMemoryMatchRepository::new())).await;

    assert!(matches!(result, Err(LedgerError::IntegrityViolation(_))));
}

#[tokio::test]
async fn test_cancelled_record_is_rebuilt_on_load() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();
    let blue = fx.ledger.register_team("Blue").await.unwrap();

    fx.matches.stall_saves.store(true, Ordering::SeqCst);
    let attempt = timeout(
        std::time::Duration::from_millis(50),
        fx.ledger.record_match(red, blue, 3, 1, Utc::now()),
    )
    .await;
    assert!(attempt.is_err(), "record should still be waiting on storage");

    // both teams were written before the match save hung
    let stored = fx.teams.load_all().await.unwrap();
    assert!(stored.iter().all(|t| t.played() == 1));
    // memory was never committed
    assert_eq!(fx.ledger.team(red).await.unwrap().played(), 0);
    assert!(fx.ledger.list_matches().await.is_empty());

    fx.matches.stall_saves.store(false, Ordering::SeqCst);
    let reloaded = Ledger::load(fx.teams.clone(), fx.matches.clone())
        .await
        .expect("load ledger");

    assert!(reloaded.list_matches().await.is_empty());
    for id in [red, blue] {
        let team = reloaded.team(id).await.unwrap();
        assert_eq!(team.aggregate(), &Aggregate::default());
    }
    // the rebuilt rows were written back
    for (_, aggregate) in stored_aggregates(&fx.teams).await {
        assert_eq!(aggregate, Aggregate::default());
    }
}

#[tokio::test]
async fn test_cancelled_remove_is_rebuilt_on_load() {
    let fx = setup();
    let red = fx.ledger.register_team("Red").await.unwrap();
    let blue = fx.ledger.register_team("Blue").await.unwrap();
    let kept = fx
        .ledger
        .record_match(red, blue, 2, 2, Utc::now() - Duration::days(1))
        .await
        .unwrap();
    let game = fx.ledger.record_match(red, blue, 1, 0, Utc::now()).await.unwrap();

    fx.matches.stall_deletes.store(true, Ordering::SeqCst);
    let attempt = timeout(
        std::time::Duration::from_millis(50),
        fx.ledger.remove_match(game),
    )
    .await;
    assert!(attempt.is_err(), "remove should still be waiting on storage");
    assert!(fx.ledger.match_record(game).await.is_some());

    fx.matches.stall_deletes.store(false, Ordering::SeqCst);
    let reloaded = Ledger::load(fx.teams.clone(), fx.matches.clone())
        .await
        .expect("load ledger");

    // the match is still stored, so its result counts again
    assert!(reloaded.match_record(kept).await.is_some());
    assert!(reloaded.match_record(game).await.is_some());
    let red_team = reloaded.team(red).await.unwrap();
    assert_eq!((red_team.played(), red_team.wins(), red_team.draws()), (2, 1, 1));
    assert_eq!(red_team.points(), 4);
    let blue_team = reloaded.team(blue).await.unwrap();
    assert_eq!((blue_team.played(), blue_team.losses(), blue_team.points()), (2, 1, 1));
    assert_eq!(blue_team.goal_difference(), -1);
}

#[tokio::test]
async fn test_correction_is_delete_then_recreate() {
    let ledger = Ledger::new(
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryMatchRepository::new()),
    );
    let red = ledger.register_team("Red").await.unwrap();
    let blue = ledger.register_team("Blue").await.unwrap();

    let wrong = ledger.record_match(red, blue, 1, 0, Utc::now()).await.unwrap();
    ledger.remove_match(wrong).await.unwrap();
    ledger.record_match(red, blue, 0, 1, Utc::now()).await.unwrap();

    let red_team = ledger.team(red).await.unwrap();
    assert_eq!((red_team.played(), red_team.losses(), red_team.points()), (1, 1, 0));
    let blue_team = ledger.team(blue).await.unwrap();
    assert_eq!((blue_team.played(), blue_team.wins(), blue_team.points()), (1, 1, 3));
}
