use matchday_core::{
    Catalog, CatalogError, Match, MatchId, MatchStatus, Notification, NotificationQuery, Team,
    TeamId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::{Duration, OffsetDateTime};

/// The fixed team set the catalog is seeded with.
#[must_use]
pub fn sample_teams() -> Vec<Team> {
    [
        ("team-1", "Manchester United"),
        ("team-2", "Liverpool"),
        ("team-3", "Chelsea"),
        ("team-4", "Arsenal"),
        ("team-5", "Manchester City"),
        ("team-6", "Tottenham"),
    ]
    .into_iter()
    .map(|(id, name)| Team { id: TeamId::new(id), name: name.to_string() })
    .collect()
}

/// The fixed match schedule: two upcoming fixtures and one match already
/// in play, with kickoffs placed relative to `now`.
#[must_use]
pub fn sample_matches(teams: &[Team], now: OffsetDateTime) -> Vec<Match> {
    vec![
        Match {
            id: MatchId::new("match-1"),
            home_team: teams[0].clone(),
            away_team: teams[1].clone(),
            kickoff: now + Duration::hours(1),
            status: MatchStatus::Scheduled,
        },
        Match {
            id: MatchId::new("match-2"),
            home_team: teams[2].clone(),
            away_team: teams[3].clone(),
            kickoff: now + Duration::hours(3),
            status: MatchStatus::Scheduled,
        },
        Match {
            id: MatchId::new("match-3"),
            home_team: teams[4].clone(),
            away_team: teams[5].clone(),
            kickoff: now - Duration::minutes(30),
            status: MatchStatus::Live,
        },
    ]
}

/// Read-only facade over one generated catalog. Built once at process
/// start and shared by every transport for the process lifetime; all
/// query methods are pure reads.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    catalog: Catalog,
}

impl NotificationCenter {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Build a catalog from the fixed fixtures. A seed makes the
    /// generated notification stream reproducible; without one the
    /// stream is freshly randomized per process.
    #[must_use]
    pub fn with_sample_data(seed: Option<u64>, now: OffsetDateTime) -> Self {
        let teams = sample_teams();
        let matches = sample_matches(&teams, now);
        let catalog = match seed {
            Some(seed) => Catalog::generate(&mut StdRng::seed_from_u64(seed), teams, matches),
            None => Catalog::generate(&mut rand::thread_rng(), teams, matches),
        };
        tracing::info!(
            matches = catalog.matches().len(),
            notifications = catalog.notifications().len(),
            "notification catalog generated"
        );
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn list_matches(&self) -> Vec<Match> {
        self.catalog.matches().to_vec()
    }

    /// # Errors
    /// Returns [`CatalogError::MatchNotFound`] for an unknown match id.
    pub fn get_match(&self, match_id: &str) -> Result<Match, CatalogError> {
        self.catalog.get_match(match_id).cloned()
    }

    #[must_use]
    pub fn list_notifications(&self, query: &NotificationQuery) -> Vec<Notification> {
        self.catalog.list_notifications(query).into_iter().cloned().collect()
    }

    /// # Errors
    /// Returns [`CatalogError::NotificationNotFound`] for an unknown
    /// notification id.
    pub fn get_notification(&self, notification_id: &str) -> Result<Notification, CatalogError> {
        self.catalog.get_notification(notification_id).cloned()
    }

    /// # Errors
    /// Returns [`CatalogError::MatchNotFound`] for an unknown match id,
    /// before any notifications are considered.
    pub fn list_match_notifications(
        &self,
        match_id: &str,
        kind: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Vec<Notification>, CatalogError> {
        Ok(self
            .catalog
            .list_match_notifications(match_id, kind, priority)?
            .into_iter()
            .cloned()
            .collect())
    }

    #[must_use]
    pub fn list_important_notifications(&self, limit: Option<i64>) -> Vec<Notification> {
        self.catalog.list_important_notifications(limit).into_iter().cloned().collect()
    }
}
