//! Application state management structures.
//!
//! This module contains the state structures behind the two screens: the persisted
//! user settings, the focus timer screen, the city screen and the board view's
//! gesture state.

use crate::constants::DEFAULT_FOCUS_SECS;
use crate::reward::RewardPlot;
use crate::storage::{load_or_empty, BuildingRepository, KeyValueRepository, MemoryStore};
use crate::timer::FocusTimer;
use crate::types::*;
use crate::viewport::ViewportTransform;
use serde::{Deserialize, Serialize};

/// Screens reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    /// Focus timer and reward picker
    Focus,
    /// The isometric city board
    City,
}

/// User settings persisted between restarts through eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Whether the background tile grid is drawn on the board
    pub show_grid: bool,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Show a placeholder building while the city is empty
    pub demo_fallback: bool,
    /// Length of one focus session in minutes
    pub focus_minutes: u32,
    /// Building granted when the next session completes
    pub selected_reward: BuildingKind,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            dark_mode: true,
            demo_fallback: true,
            focus_minutes: DEFAULT_FOCUS_SECS / 60,
            selected_reward: BuildingKind::Cathedral,
        }
    }
}

impl AppSettings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// State of the focus screen.
#[derive(Debug, Default)]
pub struct FocusScreenState {
    /// The running countdown
    pub timer: FocusTimer,
    /// Whether the reward picker window is open
    pub show_reward_picker: bool,
    /// Clock time of the previous frame, used to advance the timer
    pub last_frame_time: Option<f64>,
    /// Most recently granted building, shown as a banner
    pub last_reward: Option<BuildingRecord>,
}

/// State of the city screen: the building list as last loaded.
#[derive(Debug, Default)]
pub struct CityScreenState {
    /// Building records as loaded from (or written to) the repository
    pub records: Vec<BuildingRecord>,
}

impl CityScreenState {
    /// Replaces the in-memory list with the repository's contents.
    pub fn reload(&mut self, repository: &dyn BuildingRepository) {
        self.records = load_or_empty(repository);
        log::debug!("Loaded {} buildings", self.records.len());
    }

    /// Objects handed to the board view for this frame.
    pub fn placed_objects(&self, demo_fallback: bool) -> Vec<PlacedObject> {
        if self.records.is_empty() && demo_fallback {
            return vec![PlacedObject::demo()];
        }
        self.records.iter().map(PlacedObject::from_record).collect()
    }

    /// Total catalog value of the city in coins.
    pub fn city_value(&self) -> u32 {
        self.records
            .iter()
            .filter_map(BuildingRecord::building_kind)
            .map(|kind| kind.cost())
            .sum()
    }
}

/// Gesture and transform state of one mounted board view.
#[derive(Debug, Clone, Default)]
pub struct BoardViewState {
    /// Pan offset and zoom scale
    pub viewport: ViewportTransform,
    /// Zoom at the moment the current pinch began, `None` when not pinching
    pub pinch_baseline: Option<f32>,
    /// Product of the pinch zoom deltas since the pinch began
    pub pinch_scale: f32,
    /// Scroll distance not yet turned into a whole wheel notch
    pub wheel_carry: f32,
}

/// The main application structure.
///
/// This struct implements the `eframe::App` trait and owns both screens. The building
/// repository is injected so both screens read and write through the same instance.
pub struct CityApp {
    /// Persisted user settings
    pub settings: AppSettings,
    /// Currently visible screen
    pub tab: Tab,
    /// Shared access to the stored building list
    pub repository: Box<dyn BuildingRepository>,
    /// Focus screen state
    pub focus: FocusScreenState,
    /// City screen state
    pub city: CityScreenState,
    /// Board view state; replaced whenever the city screen is shown again
    pub board: BoardViewState,
    /// Geometry of the city board
    pub board_config: BoardConfig,
    /// Area new buildings are dropped into
    pub reward_plot: RewardPlot,
}

impl Default for CityApp {
    fn default() -> Self {
        Self::new(
            Box::new(KeyValueRepository::new(MemoryStore::new())),
            AppSettings::default(),
        )
    }
}

impl CityApp {
    /// Creates the app around a repository and restored settings.
    pub fn new(repository: Box<dyn BuildingRepository>, settings: AppSettings) -> Self {
        let mut focus = FocusScreenState::default();
        focus.timer.set_duration(settings.focus_minutes.saturating_mul(60));
        let mut city = CityScreenState::default();
        city.reload(repository.as_ref());
        Self {
            settings,
            tab: Tab::Focus,
            repository,
            focus,
            city,
            board: BoardViewState::default(),
            board_config: BoardConfig::default(),
            reward_plot: RewardPlot::default(),
        }
    }

    /// Switches screens. Showing the city reloads the list and remounts the board.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        if tab == Tab::City {
            self.city.reload(self.repository.as_ref());
            self.board = BoardViewState::default();
        }
    }
}
