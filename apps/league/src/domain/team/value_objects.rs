use std::fmt;

/// Normalizes a team name for comparison
///
/// Surrounding whitespace is trimmed and the result is lower-cased, so
/// `"  Red "` and `"red"` refer to the same team. Registration and
/// lookup-by-name both go through this function.
///
/// # Example
/// ```
/// use saturday_league::domain::team::value_objects::normalize_team_name;
///
/// assert_eq!(normalize_team_name("  Red Lions "), "red lions");
/// ```
pub fn normalize_team_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Team name value object
///
/// # Invariants
/// - Stored trimmed
/// - Never empty after trimming
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a new TeamName, trimming surrounding whitespace
    ///
    /// # Returns
    /// * `Ok(TeamName)` - If the trimmed name is not empty
    /// * `Err(String)` - If the name is blank
    ///
    /// # Example
    /// ```
    /// use saturday_league::domain::team::value_objects::TeamName;
    ///
    /// let name = TeamName::new("  Blue ").expect("valid name");
    /// assert_eq!(name.as_str(), "Blue");
    /// assert_eq!(name.key(), "blue");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(TeamName(trimmed.to_string()))
    }

    /// Returns the display name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-insensitive comparison key
    pub fn key(&self) -> String {
        normalize_team_name(&self.0)
    }

    /// Checks whether `other` names the same team
    pub fn matches(&self, other: &str) -> bool {
        self.key() == normalize_team_name(other)
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
