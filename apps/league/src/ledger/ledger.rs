use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::{LedgerError, LedgerResult};
use crate::domain::matches::{Match, Score};
use crate::domain::repositories::{MatchRepository, RepositoryError, TeamRepository};
use crate::domain::scoring::{rank, standings_table, Aggregate, StandingRow};
use crate::domain::team::{Team, TeamName};

/// Authoritative in-memory view of teams and matches
#[derive(Debug, Default)]
struct LedgerState {
    /// Registration order; the standings tie order
    teams: Vec<Team>,
    /// Recording order
    matches: Vec<Match>,
}

impl LedgerState {
    fn team_index(&self, id: Uuid) -> Option<usize> {
        self.teams.iter().position(|t| t.id() == id)
    }

    fn match_index(&self, id: Uuid) -> Option<usize> {
        self.matches.iter().position(|m| m.id() == id)
    }

    fn find_team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name().matches(name))
    }

    fn team_or_not_found(&self, id: Uuid) -> LedgerResult<(usize, Team)> {
        self.team_index(id)
            .map(|index| (index, self.teams[index].clone()))
            .ok_or_else(|| LedgerError::TeamNotFound(id.to_string()))
    }
}

/// Standings ledger
///
/// Owns teams and match records and keeps every team's aggregate equal to
/// the sum of the deltas of the matches recorded against it.
///
/// Writes run as one critical section under the write lock: read both
/// teams, compute, persist, commit. New state is built on copies and only
/// committed to memory once every storage call succeeded, so readers never
/// see one team updated without the other.
pub struct Ledger {
    teams_repo: Arc<dyn TeamRepository>,
    matches_repo: Arc<dyn MatchRepository>,
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Creates an empty ledger backed by the given storage collaborators
    pub fn new(teams_repo: Arc<dyn TeamRepository>, matches_repo: Arc<dyn MatchRepository>) -> Self {
        Self {
            teams_repo,
            matches_repo,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Creates a ledger populated from storage
    ///
    /// Stored matches are authoritative. A team whose stored statistics
    /// disagree with the sum of its stored matches (left behind by a write
    /// that was cancelled part way) is rebuilt from the matches and saved
    /// back.
    ///
    /// # Errors
    /// * `PersistenceFailure` - If either repository fails to load, or a
    ///   rebuilt team cannot be saved
    /// * `IntegrityViolation` - If a stored team breaks the aggregate invariants
    pub async fn load(
        teams_repo: Arc<dyn TeamRepository>,
        matches_repo: Arc<dyn MatchRepository>,
    ) -> LedgerResult<Self> {
        let stored = teams_repo
            .load_all()
            .await?
            .into_iter()
            .map(ensure_consistent)
            .collect::<LedgerResult<Vec<_>>>()?;
        let mut matches = matches_repo.load_all().await?;

        let mut teams = Vec::with_capacity(stored.len());
        for team in stored {
            let rebuilt = aggregate_from_matches(team.id(), &matches);
            if *team.aggregate() == rebuilt {
                teams.push(team);
                continue;
            }

            tracing::warn!(
                team_id = %team.id(),
                stored_played = team.played(),
                stored_points = team.points(),
                rebuilt_played = rebuilt.played,
                rebuilt_points = rebuilt.points,
                "Stored statistics disagree with recorded matches, rebuilding"
            );
            let repaired = team.with_aggregate(rebuilt);
            teams_repo
                .save(&repaired)
                .await
                .map_err(|e| persistence_failure("rebuild team", e))?;
            teams.push(repaired);
        }

        teams.sort_by_key(|t| t.created_at());
        matches.sort_by_key(|m| m.played_at());

        let orphaned = matches
            .iter()
            .filter(|m| {
                !teams.iter().any(|t| t.id() == m.home_team_id())
                    || !teams.iter().any(|t| t.id() == m.away_team_id())
            })
            .count();
        if orphaned > 0 {
            tracing::warn!(orphaned, "Loaded matches that reference removed teams");
        }

        tracing::info!(
            teams = teams.len(),
            matches = matches.len(),
            "Ledger loaded from storage"
        );

        Ok(Self {
            teams_repo,
            matches_repo,
            state: RwLock::new(LedgerState { teams, matches }),
        })
    }

    /// Registers a new team with zero statistics
    ///
    /// # Errors
    /// * `InvalidTeamName` - If the name is blank
    /// * `DuplicateTeam` - If a team with the same normalized name exists
    /// * `PersistenceFailure` - If the team could not be stored
    pub async fn register_team(&self, name: &str) -> LedgerResult<Uuid> {
        let name = TeamName::new(name).map_err(LedgerError::InvalidTeamName)?;

        let mut state = self.state.write().await;
        if let Some(existing) = state.find_team_by_name(name.as_str()) {
            return Err(LedgerError::DuplicateTeam(existing.name().to_string()));
        }

        let team = Team::new(name);
        self.teams_repo
            .save(&team)
            .await
            .map_err(|e| persistence_failure("register team", e))?;

        let id = team.id();
        tracing::info!(team_id = %id, name = %team.name(), "Registered team");
        state.teams.push(team);

        Ok(id)
    }

    /// Removes a team
    ///
    /// Matches that reference the team are left untouched; removing one of
    /// them later fails with `TeamNotFound`.
    ///
    /// # Errors
    /// * `TeamNotFound` - If no team has this ID
    /// * `PersistenceFailure` - If the team could not be deleted from storage
    pub async fn remove_team(&self, id: Uuid) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        let index = state
            .team_index(id)
            .ok_or_else(|| LedgerError::TeamNotFound(id.to_string()))?;

        self.teams_repo
            .delete(id)
            .await
            .map_err(|e| persistence_failure("remove team", e))?;

        let team = state.teams.remove(index);
        let referencing = state.matches.iter().filter(|m| m.involves(id)).count();
        if referencing > 0 {
            tracing::warn!(
                team_id = %id,
                matches = referencing,
                "Removed team that still has recorded matches"
            );
        }
        tracing::info!(team_id = %id, name = %team.name(), "Removed team");

        Ok(())
    }

    /// Records a finalized result and applies it to both teams
    ///
    /// # Errors
    /// * `TeamNotFound` - If either team is unknown
    /// * `SameTeam` - If `home_id == away_id`
    /// * `InvalidScore` - If either score is negative
    /// * `PersistenceFailure` - If storage rejected the write; nothing changes
    pub async fn record_match(
        &self,
        home_id: Uuid,
        away_id: Uuid,
        home_score: i64,
        away_score: i64,
        played_at: DateTime<Utc>,
    ) -> LedgerResult<Uuid> {
        let mut state = self.state.write().await;

        let (home_index, home) = state.team_or_not_found(home_id)?;
        let (away_index, away) = state.team_or_not_found(away_id)?;
        if home_id == away_id {
            return Err(LedgerError::SameTeam(home_id));
        }
        let home_score = Score::new(home_score).map_err(LedgerError::InvalidScore)?;
        let away_score = Score::new(away_score).map_err(LedgerError::InvalidScore)?;

        let game = Match::new(home_id, away_id, home_score, away_score, played_at)
            .map_err(|_| LedgerError::SameTeam(home_id))?;
        let (home_delta, away_delta) = game.deltas();
        let updated = [
            ensure_consistent(home.with_result_applied(&home_delta))?,
            ensure_consistent(away.with_result_applied(&away_delta))?,
        ];
        let previous = [home, away];

        self.save_teams_or_restore(&previous, &updated).await?;
        if let Err(err) = self.matches_repo.save(&game).await {
            self.restore_teams(&previous).await;
            return Err(persistence_failure("record match", err));
        }

        let [new_home, new_away] = updated;
        state.teams[home_index] = new_home;
        state.teams[away_index] = new_away;
        let id = game.id();
        tracing::info!(
            match_id = %id,
            home_team_id = %home_id,
            away_team_id = %away_id,
            score = %format!("{}-{}", home_score, away_score),
            "Recorded match"
        );
        state.matches.push(game);

        Ok(id)
    }

    /// Records a result entered as plain text
    ///
    /// Team names are matched case-insensitively after trimming; scores are
    /// parsed as non-negative integers.
    ///
    /// # Errors
    /// * `TeamNotFound` - If either name is unknown
    /// * `InvalidScore` - If a score is not a non-negative integer
    /// * Any error of [`Ledger::record_match`]
    pub async fn record_match_by_names(
        &self,
        home_name: &str,
        away_name: &str,
        home_score: &str,
        away_score: &str,
        played_at: DateTime<Utc>,
    ) -> LedgerResult<Uuid> {
        let (home_id, away_id) = {
            let state = self.state.read().await;
            let lookup = |name: &str| {
                state
                    .find_team_by_name(name)
                    .map(Team::id)
                    .ok_or_else(|| LedgerError::TeamNotFound(name.trim().to_string()))
            };
            (lookup(home_name)?, lookup(away_name)?)
        };

        let home_score: Score = home_score.parse().map_err(LedgerError::InvalidScore)?;
        let away_score: Score = away_score.parse().map_err(LedgerError::InvalidScore)?;

        self.record_match(
            home_id,
            away_id,
            i64::from(home_score),
            i64::from(away_score),
            played_at,
        )
        .await
    }

    /// Removes a match and reverses its effect on both teams
    ///
    /// # Errors
    /// * `MatchNotFound` - If no match has this ID
    /// * `TeamNotFound` - If a team the match references was removed
    /// * `PersistenceFailure` - If storage rejected the write; nothing changes
    pub async fn remove_match(&self, match_id: Uuid) -> LedgerResult<()> {
        let mut state = self.state.write().await;

        let match_index = state
            .match_index(match_id)
            .ok_or(LedgerError::MatchNotFound(match_id))?;
        let game = state.matches[match_index].clone();

        let lookup = |id: Uuid| {
            state.team_or_not_found(id).map_err(|err| {
                tracing::error!(
                    match_id = %match_id,
                    team_id = %id,
                    "Match references a team that no longer exists"
                );
                err
            })
        };
        let (home_index, home) = lookup(game.home_team_id())?;
        let (away_index, away) = lookup(game.away_team_id())?;

        let (home_delta, away_delta) = game.deltas();
        let updated = [
            ensure_consistent(home.with_result_reversed(&home_delta))?,
            ensure_consistent(away.with_result_reversed(&away_delta))?,
        ];
        let previous = [home, away];

        self.save_teams_or_restore(&previous, &updated).await?;
        if let Err(err) = self.matches_repo.delete(match_id).await {
            self.restore_teams(&previous).await;
            return Err(persistence_failure("remove match", err));
        }

        let [new_home, new_away] = updated;
        state.teams[home_index] = new_home;
        state.teams[away_index] = new_away;
        state.matches.remove(match_index);
        tracing::info!(match_id = %match_id, "Removed match");

        Ok(())
    }

    /// Returns the teams ordered for the standings table
    pub async fn list_standings(&self) -> Vec<Team> {
        let teams = self.state.read().await.teams.clone();
        rank(teams)
    }

    /// Returns the standings with 1-based positions
    pub async fn standings_table(&self) -> Vec<StandingRow> {
        let teams = self.state.read().await.teams.clone();
        standings_table(teams)
    }

    /// Returns every match, most recent first
    ///
    /// Matches played at the same instant keep the order they were recorded in.
    pub async fn list_matches(&self) -> Vec<Match> {
        let mut matches = self.state.read().await.matches.clone();
        matches.sort_by(|a, b| b.played_at().cmp(&a.played_at()));
        matches
    }

    /// Returns the matches a team played in, most recent first
    pub async fn matches_for_team(&self, team_id: Uuid) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .state
            .read()
            .await
            .matches
            .iter()
            .filter(|m| m.involves(team_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.played_at().cmp(&a.played_at()));
        matches
    }

    /// Looks up a team by ID
    pub async fn team(&self, id: Uuid) -> Option<Team> {
        let state = self.state.read().await;
        state.team_index(id).map(|index| state.teams[index].clone())
    }

    /// Looks up a match by ID
    pub async fn match_record(&self, id: Uuid) -> Option<Match> {
        let state = self.state.read().await;
        state.match_index(id).map(|index| state.matches[index].clone())
    }

    /// Looks up a team by name, ignoring case and surrounding whitespace
    pub async fn find_team_by_name(&self, name: &str) -> Option<Team> {
        self.state.read().await.find_team_by_name(name).cloned()
    }

    /// Saves the updated teams, restoring earlier writes if one fails
    async fn save_teams_or_restore(&self, previous: &[Team], updated: &[Team]) -> LedgerResult<()> {
        for (written, team) in updated.iter().enumerate() {
            if let Err(err) = self.teams_repo.save(team).await {
                self.restore_teams(&previous[..written]).await;
                return Err(persistence_failure("save team", err));
            }
        }
        Ok(())
    }

    /// Writes back the given team snapshots after an aborted operation
    async fn restore_teams(&self, teams: &[Team]) {
        for team in teams {
            if let Err(err) = self.teams_repo.save(team).await {
                tracing::error!(
                    team_id = %team.id(),
                    error = %err,
                    "Failed to restore team after aborted write; storage may disagree with the ledger"
                );
            }
        }
    }
}

/// Sums the deltas of every match `team_id` took part in
fn aggregate_from_matches(team_id: Uuid, matches: &[Match]) -> Aggregate {
    matches.iter().fold(Aggregate::default(), |total, game| {
        let (home, away) = game.deltas();
        if game.home_team_id() == team_id {
            total.apply(&home)
        } else if game.away_team_id() == team_id {
            total.apply(&away)
        } else {
            total
        }
    })
}

fn ensure_consistent(team: Team) -> LedgerResult<Team> {
    team.aggregate()
        .check_invariants()
        .map_err(|e| LedgerError::IntegrityViolation(format!("team {}: {}", team.id(), e)))?;
    Ok(team)
}

fn persistence_failure(operation: &str, err: RepositoryError) -> LedgerError {
    tracing::error!(operation, error = %err, "Storage call failed");
    LedgerError::PersistenceFailure(err)
}
