use std::fmt::{Display, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Default result cap for the general notification listing.
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 50;
/// Default result cap for the important-notification listing.
pub const DEFAULT_IMPORTANT_LIMIT: usize = 20;

/// The fixed roster player names are drawn from. Draws are uniform and
/// independent per field; the same name may appear in multiple roles.
pub const PLAYER_ROSTER: [&str; 16] = [
    "Bruno Fernandes",
    "Marcus Rashford",
    "Mohamed Salah",
    "Virgil van Dijk",
    "Mason Mount",
    "Reece James",
    "Bukayo Saka",
    "Martin Odegaard",
    "Kevin De Bruyne",
    "Erling Haaland",
    "Harry Kane",
    "Son Heung-min",
    "Declan Rice",
    "Gabriel Jesus",
    "Jack Grealish",
    "Phil Foden",
];

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum CatalogError {
    #[error("Match with ID {0} was not found")]
    MatchNotFound(String),
    #[error("Notification with ID {0} was not found")]
    NotificationNotFound(String),
}

impl CatalogError {
    /// Short category string for the transport layer's error body.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MatchNotFound(_) => "Match not found",
            Self::NotificationNotFound(_) => "Notification not found",
        }
    }

    /// Numeric code for the transport layer. Every lookup miss is a 404.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::MatchNotFound(_) | Self::NotificationNotFound(_) => 404,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TeamId(pub String);

impl TeamId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MatchId(pub String);

impl MatchId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NotificationId(pub String);

impl NotificationId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Finished => "finished",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(Self::Scheduled),
            "live" => Some(Self::Live),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    MatchStart,
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    Penalty,
    MatchEnd,
}

impl NotificationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MatchStart => "match_start",
            Self::Goal => "goal",
            Self::YellowCard => "yellow_card",
            Self::RedCard => "red_card",
            Self::Substitution => "substitution",
            Self::Penalty => "penalty",
            Self::MatchEnd => "match_end",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "match_start" => Some(Self::MatchStart),
            "goal" => Some(Self::Goal),
            "yellow_card" => Some(Self::YellowCard),
            "red_card" => Some(Self::RedCard),
            "substitution" => Some(Self::Substitution),
            "penalty" => Some(Self::Penalty),
            "match_end" => Some(Self::MatchEnd),
            _ => None,
        }
    }

    /// Importance is a property of the event type alone: kickoffs, goals,
    /// red cards, and penalties are surfaced as important.
    #[must_use]
    pub fn is_important(self) -> bool {
        matches!(self, Self::MatchStart | Self::Goal | Self::RedCard | Self::Penalty)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Yellow,
    Red,
}

impl CardType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yellow" => Some(Self::Yellow),
            "red" => Some(Self::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(with = "time::serde::rfc3339")]
    pub kickoff: OffsetDateTime,
    pub status: MatchStatus,
}

/// One generated match event. Optional fields are omitted from the wire
/// encoding when absent, never encoded as null.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub match_id: MatchId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    pub is_important: bool,
}

/// Optional equality predicates for the general notification listing.
/// An absent or empty value matches everything; values are compared
/// against the string encoding of the field, so unknown values simply
/// match nothing. Predicates combine with logical AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct NotificationQuery {
    pub match_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<i64>,
}

impl NotificationQuery {
    fn matches(&self, notification: &Notification) -> bool {
        matches_filter(self.match_id.as_deref(), notification.match_id.as_str())
            && matches_filter(self.kind.as_deref(), notification.kind.as_str())
            && matches_filter(self.priority.as_deref(), notification.priority.as_str())
    }
}

fn matches_filter(filter: Option<&str>, value: &str) -> bool {
    match filter {
        Some(expected) if !expected.is_empty() => expected == value,
        _ => true,
    }
}

/// Malformed limits are normalized, never rejected: anything that is not
/// a positive integer falls back to the operation default.
fn effective_limit(requested: Option<i64>, default_limit: usize) -> usize {
    match requested {
        Some(value) if value > 0 => usize::try_from(value).unwrap_or(usize::MAX),
        _ => default_limit,
    }
}

const IN_PLAY_EVENT_TYPES: [NotificationType; 6] = [
    NotificationType::Goal,
    NotificationType::YellowCard,
    NotificationType::RedCard,
    NotificationType::Substitution,
    NotificationType::Penalty,
    NotificationType::MatchEnd,
];

const PRIORITY_LEVELS: [Priority; 4] =
    [Priority::Low, Priority::Medium, Priority::High, Priority::Critical];

fn random_player_name<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    PLAYER_ROSTER[rng.gen_range(0..PLAYER_ROSTER.len())].to_string()
}

fn kickoff_notification(match_ordinal: usize, fixture: &Match) -> Notification {
    let home = &fixture.home_team.name;
    let away = &fixture.away_team.name;
    Notification {
        id: NotificationId::new(format!("notif-{match_ordinal}-start")),
        match_id: fixture.id.clone(),
        kind: NotificationType::MatchStart,
        title: format!("\u{26bd} KICK OFF: {home} vs {away}"),
        message: format!("The match between {home} and {away} has started!"),
        timestamp: fixture.kickoff,
        priority: Priority::High,
        player_name: None,
        minute: None,
        home_score: None,
        away_score: None,
        card_type: None,
        is_important: true,
    }
}

fn in_play_notification<R>(
    rng: &mut R,
    match_ordinal: usize,
    event_ordinal: usize,
    fixture: &Match,
) -> Notification
where
    R: Rng + ?Sized,
{
    let kind = IN_PLAY_EVENT_TYPES[rng.gen_range(0..IN_PLAY_EVENT_TYPES.len())];
    let minute = rng.gen_range(1..=90_u32);
    let priority = PRIORITY_LEVELS[rng.gen_range(0..PRIORITY_LEVELS.len())];

    let mut notification = Notification {
        id: NotificationId::new(format!("notif-{match_ordinal}-{event_ordinal}")),
        match_id: fixture.id.clone(),
        kind,
        title: String::new(),
        message: String::new(),
        timestamp: fixture.kickoff + Duration::minutes(i64::from(minute)),
        priority,
        player_name: None,
        minute: Some(minute),
        home_score: None,
        away_score: None,
        card_type: None,
        is_important: kind.is_important(),
    };

    let home = &fixture.home_team.name;
    let away = &fixture.away_team.name;

    match kind {
        NotificationType::Goal => {
            // Scores are rolled fresh for every goal rather than carried
            // forward across the match's event history.
            let home_score = rng.gen_range(0..=3_u32);
            let away_score = rng.gen_range(0..=3_u32);
            let player = random_player_name(rng);
            notification.title =
                format!("\u{26bd} GOAL! {home} {home_score}-{away_score} {away}");
            notification.message = format!("{player} scores in the {minute} minute!");
            notification.player_name = Some(player);
            notification.home_score = Some(home_score);
            notification.away_score = Some(away_score);
        }
        NotificationType::YellowCard => {
            let player = random_player_name(rng);
            notification.title = format!("\u{1f7e8} Yellow Card - {home}");
            notification.message =
                format!("{player} receives a yellow card in the {minute} minute");
            notification.player_name = Some(player);
            notification.card_type = Some(CardType::Yellow);
        }
        NotificationType::RedCard => {
            let player = random_player_name(rng);
            notification.title = format!("\u{1f7e5} Red Card - {home}");
            notification.message =
                format!("{player} is sent off with a red card in the {minute} minute!");
            notification.player_name = Some(player);
            notification.card_type = Some(CardType::Red);
        }
        NotificationType::Substitution => {
            // Substitutions carry both player names in the message text
            // only; there are no structured in/out fields.
            let player_out = random_player_name(rng);
            let player_in = random_player_name(rng);
            notification.title = format!("\u{1f504} Substitution - {home}");
            notification.message =
                format!("{player_out} is replaced by {player_in} in the {minute} minute");
        }
        NotificationType::Penalty => {
            let player = random_player_name(rng);
            notification.title = format!("\u{26bd} Penalty Award - {home} vs {away}");
            notification.message =
                format!("Penalty awarded! {player} steps up to take it in the {minute} minute");
            notification.player_name = Some(player);
        }
        NotificationType::MatchEnd => {
            let home_score = rng.gen_range(0..=3_u32);
            let away_score = rng.gen_range(0..=3_u32);
            notification.title =
                format!("\u{1f3c1} FULL TIME: {home} {home_score}-{away_score} {away}");
            notification.message =
                format!("Match finished: {home} {home_score}-{away_score} {away}");
            notification.home_score = Some(home_score);
            notification.away_score = Some(away_score);
        }
        // The in-play pool never contains kickoff events.
        NotificationType::MatchStart => unreachable!(),
    }

    notification
}

/// Generate the full notification lifecycle for one match: the kickoff
/// notification followed by 3-10 randomized in-play events.
///
/// `match_ordinal` is the 1-based position of the match in the schedule;
/// event ids are derived from it (`notif-{match}-start`,
/// `notif-{match}-{event}`). Draw order per event is type, minute,
/// priority, then type-specific fields. Generation cannot fail, and
/// re-invoking it produces a freshly randomized sequence.
pub fn generate_match_notifications<R>(
    rng: &mut R,
    match_ordinal: usize,
    fixture: &Match,
) -> Vec<Notification>
where
    R: Rng + ?Sized,
{
    let event_count = rng.gen_range(3..=10_usize);
    let mut notifications = Vec::with_capacity(event_count + 1);
    notifications.push(kickoff_notification(match_ordinal, fixture));
    for event_ordinal in 1..=event_count {
        notifications.push(in_play_notification(rng, match_ordinal, event_ordinal, fixture));
    }
    notifications
}

/// The immutable notification catalog: teams, matches, and every
/// generated notification in insertion order (match-major, generation
/// order within a match). Built once at startup; queries never re-sort.
#[derive(Debug, Clone)]
pub struct Catalog {
    teams: Vec<Team>,
    matches: Vec<Match>,
    notifications: Vec<Notification>,
}

impl Catalog {
    /// Build the catalog by generating notifications for every match in
    /// schedule order.
    pub fn generate<R>(rng: &mut R, teams: Vec<Team>, matches: Vec<Match>) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut notifications = Vec::new();
        for (index, fixture) in matches.iter().enumerate() {
            notifications.extend(generate_match_notifications(rng, index + 1, fixture));
        }
        Self { teams, matches, notifications }
    }

    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Look up a match by id.
    ///
    /// # Errors
    /// Returns [`CatalogError::MatchNotFound`] when no match carries the id.
    pub fn get_match(&self, match_id: &str) -> Result<&Match, CatalogError> {
        self.matches
            .iter()
            .find(|fixture| fixture.id.as_str() == match_id)
            .ok_or_else(|| CatalogError::MatchNotFound(match_id.to_string()))
    }

    /// Look up a notification by id.
    ///
    /// # Errors
    /// Returns [`CatalogError::NotificationNotFound`] when no notification
    /// carries the id.
    pub fn get_notification(&self, notification_id: &str) -> Result<&Notification, CatalogError> {
        self.notifications
            .iter()
            .find(|notification| notification.id.as_str() == notification_id)
            .ok_or_else(|| CatalogError::NotificationNotFound(notification_id.to_string()))
    }

    /// List notifications matching every supplied predicate, in catalog
    /// order, truncated at the query limit (default 50).
    #[must_use]
    pub fn list_notifications(&self, query: &NotificationQuery) -> Vec<&Notification> {
        let limit = effective_limit(query.limit, DEFAULT_NOTIFICATION_LIMIT);
        let mut selected = Vec::new();
        for notification in &self.notifications {
            if !query.matches(notification) {
                continue;
            }
            selected.push(notification);
            if selected.len() >= limit {
                break;
            }
        }
        selected
    }

    /// List every notification for one match, optionally narrowed by type
    /// and priority, with no limit truncation.
    ///
    /// # Errors
    /// Returns [`CatalogError::MatchNotFound`] when the match id is
    /// unknown, before any notifications are considered.
    pub fn list_match_notifications(
        &self,
        match_id: &str,
        kind: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Vec<&Notification>, CatalogError> {
        self.get_match(match_id)?;
        Ok(self
            .notifications
            .iter()
            .filter(|notification| {
                notification.match_id.as_str() == match_id
                    && matches_filter(kind, notification.kind.as_str())
                    && matches_filter(priority, notification.priority.as_str())
            })
            .collect())
    }

    /// List notifications flagged important, in catalog order, truncated
    /// at the limit (default 20).
    #[must_use]
    pub fn list_important_notifications(&self, limit: Option<i64>) -> Vec<&Notification> {
        let limit = effective_limit(limit, DEFAULT_IMPORTANT_LIMIT);
        let mut selected = Vec::new();
        for notification in &self.notifications {
            if !notification.is_important {
                continue;
            }
            selected.push(notification);
            if selected.len() >= limit {
                break;
            }
        }
        selected
    }
}
