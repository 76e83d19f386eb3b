//! Mess-menu schedule
//!
//! One row per day of week with three meal menus and a dessert column.
//! Loaded from YAML so the mess committee can edit it without a rebuild;
//! falls back to an embedded default week.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Days in display order (the week starts on Sunday on the mess notice board)
pub const DAY_ORDER: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Morning,
    Evening,
    Night,
}

impl MealSlot {
    /// Slot for an hour of the day: morning 5-10, evening 11-16, night
    /// 17-23. Hours outside every window (midnight to 4am) default to
    /// morning, matching the notice-board convention.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=10 => MealSlot::Morning,
            11..=16 => MealSlot::Evening,
            17..=23 => MealSlot::Night,
            _ => MealSlot::Morning,
        }
    }

    /// Heading shown above the menu
    pub fn title(&self) -> &'static str {
        match self {
            MealSlot::Morning => "Breakfast",
            MealSlot::Evening => "Lunch",
            MealSlot::Night => "Dinner",
        }
    }

    /// Dessert is served with lunch and dinner only
    pub fn serves_dessert(&self) -> bool {
        matches!(self, MealSlot::Evening | MealSlot::Night)
    }
}

/// Menu for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMenu {
    pub day_of_week: String,
    pub morning_menu: String,
    pub evening_menu: String,
    pub night_menu: String,
    /// "OFF" means no dessert that day
    pub dessert: String,
}

impl DayMenu {
    /// Menu text for a slot
    pub fn for_slot(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Morning => &self.morning_menu,
            MealSlot::Evening => &self.evening_menu,
            MealSlot::Night => &self.night_menu,
        }
    }

    /// Dessert, if any is served that day
    pub fn dessert(&self) -> Option<&str> {
        if self.dessert.eq_ignore_ascii_case("OFF") {
            None
        } else {
            Some(&self.dessert)
        }
    }
}

/// The weekly schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    pub days: Vec<DayMenu>,
}

impl MenuConfig {
    /// Load from a YAML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.to_string()))?;
        let config: MenuConfig =
            serde_yaml::from_str(&text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file when configured, otherwise the embedded week.
    /// A missing or malformed file logs a warning and falls back rather
    /// than taking the menu lookup down with it.
    pub fn load(path: Option<&str>) -> Self {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to load menu from {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for day in &DAY_ORDER {
            if !self.days.iter().any(|d| d.day_of_week == *day) {
                return Err(ConfigError::InvalidValue {
                    field: "days".to_string(),
                    message: format!("missing menu for {day}"),
                });
            }
        }
        Ok(())
    }

    /// Menu for a named day (case-insensitive)
    pub fn for_day(&self, day: &str) -> Option<&DayMenu> {
        self.days
            .iter()
            .find(|d| d.day_of_week.eq_ignore_ascii_case(day))
    }

    /// The full week in Sunday-to-Saturday order
    pub fn week(&self) -> Vec<&DayMenu> {
        DAY_ORDER.iter().filter_map(|day| self.for_day(day)).collect()
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_MENU_YAML).expect("embedded menu is well-formed")
    }
}

const DEFAULT_MENU_YAML: &str = r#"
days:
  - day_of_week: Sunday
    morning_menu: Aloo Paratha, Curd, Pickle, Tea
    evening_menu: Chhole Bhature, Rice, Salad
    night_menu: Paneer Butter Masala, Roti, Rice, Dal
    dessert: Gulab Jamun
  - day_of_week: Monday
    morning_menu: Poha, Jalebi, Banana, Tea
    evening_menu: Rajma, Rice, Roti, Salad
    night_menu: Mix Veg, Roti, Rice, Dal Fry
    dessert: "OFF"
  - day_of_week: Tuesday
    morning_menu: Idli, Sambhar, Chutney, Tea
    evening_menu: Kadhi Pakora, Rice, Roti
    night_menu: Aloo Gobhi, Roti, Rice, Dal
    dessert: "OFF"
  - day_of_week: Wednesday
    morning_menu: Bread Butter, Omelette/Banana, Tea
    evening_menu: Dal Makhani, Rice, Roti, Salad
    night_menu: Bhindi Fry, Roti, Rice, Dal
    dessert: Kheer
  - day_of_week: Thursday
    morning_menu: Upma, Coconut Chutney, Tea
    evening_menu: Aloo Matar, Rice, Roti, Raita
    night_menu: Soya Chaap, Roti, Rice, Dal
    dessert: "OFF"
  - day_of_week: Friday
    morning_menu: Paratha, Curd, Pickle, Tea
    evening_menu: Chhole, Rice, Roti, Salad
    night_menu: Matar Paneer, Roti, Rice, Dal
    dessert: Halwa
  - day_of_week: Saturday
    morning_menu: Sandwich, Boiled Egg/Fruit, Tea
    evening_menu: Sambhar, Rice, Papad, Salad
    night_menu: Veg Biryani, Raita, Dal
    dessert: Ice Cream
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_week_complete() {
        let config = MenuConfig::default();
        assert_eq!(config.days.len(), 7);
        assert_eq!(config.week().len(), 7);
        assert_eq!(config.week()[0].day_of_week, "Sunday");
        assert_eq!(config.week()[6].day_of_week, "Saturday");
    }

    #[test]
    fn test_day_lookup_case_insensitive() {
        let config = MenuConfig::default();
        assert!(config.for_day("monday").is_some());
        assert!(config.for_day("MONDAY").is_some());
        assert!(config.for_day("Someday").is_none());
    }

    #[test]
    fn test_meal_slot_windows() {
        assert_eq!(MealSlot::for_hour(7), MealSlot::Morning);
        assert_eq!(MealSlot::for_hour(13), MealSlot::Evening);
        assert_eq!(MealSlot::for_hour(20), MealSlot::Night);
        // outside all windows defaults to morning
        assert_eq!(MealSlot::for_hour(2), MealSlot::Morning);
    }

    #[test]
    fn test_dessert_off() {
        let config = MenuConfig::default();
        assert!(config.for_day("Monday").unwrap().dessert().is_none());
        assert_eq!(
            config.for_day("Sunday").unwrap().dessert(),
            Some("Gulab Jamun")
        );
    }

    #[test]
    fn test_load_falls_back_on_missing_file() {
        let config = MenuConfig::load(Some("/nonexistent/menu.yaml"));
        assert_eq!(config.days.len(), 7);
    }
}
