use urbain_data::Coordinates;

use crate::error::UrbainError;

/// Paris
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 48.8566,
    lng: 2.3522,
};
pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_RATING: f32 = 4.5;

/// Settings for a [`crate::PlaceExplorer`] session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Map center before any location fix
    pub default_center: Coordinates,
    pub default_zoom: u8,
    /// Rating given to places that come without one
    pub default_rating: f32,
    /// Maximum hits taken from one provider batch
    pub max_search_results: usize,
    /// Discard responses of searches that were superseded by a newer one
    pub discard_stale_searches: bool,
    /// Owner id of the signed-in user, used for submitted places and the dashboard
    pub owner_id: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            default_rating: DEFAULT_RATING,
            max_search_results: 20,
            discard_stale_searches: true,
            owner_id: None,
        }
    }
}

impl ExplorerConfig {
    #[must_use]
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::new()
    }
}

/// Builder for creating explorer configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Create a new builder with sensible defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ExplorerConfig::default(),
        }
    }

    /// Append every search response, even superseded ones.
    #[must_use]
    pub fn legacy() -> Self {
        let mut builder = Self::new();
        builder.config.discard_stale_searches = false;
        builder
    }

    /// Set the initial map center
    pub fn center(mut self, lat: f64, lng: f64) -> Result<Self, UrbainError> {
        self.config.default_center = Coordinates::new(lat, lng)
            .map_err(|e| UrbainError::ConfigError(format!("Invalid center: {e}")))?;
        Ok(self)
    }

    /// Set the initial zoom level (clamped to 1..=20)
    #[must_use]
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.config.default_zoom = zoom.clamp(1, 20);
        self
    }

    /// Set the rating given to unrated places (0 to 5)
    pub fn default_rating(mut self, rating: f32) -> Result<Self, UrbainError> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(UrbainError::ConfigError(format!(
                "Default rating must be between 0 and 5, got {rating}"
            )));
        }
        self.config.default_rating = rating;
        Ok(self)
    }

    /// Set the maximum number of hits kept per search
    #[must_use]
    pub fn max_search_results(mut self, limit: usize) -> Self {
        self.config.max_search_results = limit.max(1);
        self
    }

    #[must_use]
    pub fn discard_stale_searches(mut self, enabled: bool) -> Self {
        self.config.discard_stale_searches = enabled;
        self
    }

    /// Set the signed-in owner
    #[must_use]
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.config.owner_id = Some(owner_id.into());
        self
    }

    /// Build the final configuration
    #[must_use]
    pub fn build(self) -> ExplorerConfig {
        self.config
    }
}
