//! Mess-menu lookup tool
//!
//! Formats the weekly schedule for three kinds of request: the current
//! meal, a named day, and the whole week.

use async_trait::async_trait;
use chrono::{DateTime, Local, Timelike};
use serde::Deserialize;

use hostel_agent_config::{DayMenu, MealSlot, MenuConfig};

use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};

/// Mess-menu lookup over the configured weekly schedule
pub struct MessMenuTool {
    menu: MenuConfig,
}

#[derive(Debug, Default, Deserialize)]
struct MenuArgs {
    /// Day name, or "week" for the full schedule; today's meal when absent
    #[serde(default)]
    day: Option<String>,
}

impl MessMenuTool {
    pub fn new(menu: MenuConfig) -> Self {
        Self { menu }
    }

    /// The menu for the meal being served now
    pub fn current_menu(&self, now: DateTime<Local>) -> String {
        let day = now.format("%A").to_string();
        let slot = MealSlot::for_hour(now.hour());

        let Some(menu) = self.menu.for_day(&day) else {
            return "Sorry, I couldn't retrieve the menu at the moment.".to_string();
        };

        let mut lines = vec![
            format!("Current Time: {}", now.format("%I:%M %p")),
            format!("{}'s Menu", day),
            String::new(),
            format!("{}:", slot.title()),
            menu.for_slot(slot).to_string(),
        ];

        if slot.serves_dessert() {
            if let Some(dessert) = menu.dessert() {
                lines.push(String::new());
                lines.push(format!("Dessert: {dessert}"));
            }
        }

        lines.join("\n")
    }

    /// The full menu for a named day
    pub fn day_menu(&self, day: &str) -> Option<String> {
        self.menu.for_day(day).map(Self::format_day)
    }

    /// The whole week, Sunday to Saturday
    pub fn week_menu(&self) -> String {
        self.menu
            .week()
            .into_iter()
            .map(Self::format_day)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_day(menu: &DayMenu) -> String {
        format!(
            "{} menu:\nMorning: {}\nEvening: {}\nNight: {}\nDessert: {}",
            menu.day_of_week, menu.morning_menu, menu.evening_menu, menu.night_menu, menu.dessert
        )
    }
}

#[async_trait]
impl Tool for MessMenuTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "mess_menu".to_string(),
            description: "Get the hostel mess menu: current meal, a specific day, or the full week"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "day": {
                        "type": "string",
                        "description": "Day of week, or 'week' for the full schedule. Omit for the current meal."
                    }
                }
            }),
        }
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: MenuArgs = if args.is_null() {
            MenuArgs::default()
        } else {
            serde_json::from_value(args).map_err(|e| ToolError::InvalidInput(e.to_string()))?
        };

        let text = match args.day.as_deref() {
            None => self.current_menu(Local::now()),
            Some(day) if day.eq_ignore_ascii_case("week") => self.week_menu(),
            Some(day) => match self.day_menu(day) {
                Some(menu) => menu,
                None => return Ok(ToolOutput::error(format!("No menu found for {day}."))),
            },
        };

        Ok(ToolOutput::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tool() -> MessMenuTool {
        MessMenuTool::new(MenuConfig::default())
    }

    #[test]
    fn test_day_menu() {
        let text = tool().day_menu("Sunday").unwrap();
        assert!(text.starts_with("Sunday menu:"));
        assert!(text.contains("Morning:"));
        assert!(text.contains("Dessert: Gulab Jamun"));
    }

    #[test]
    fn test_week_menu_ordered() {
        let text = tool().week_menu();
        let sunday = text.find("Sunday menu:").unwrap();
        let saturday = text.find("Saturday menu:").unwrap();
        assert!(sunday < saturday);
    }

    #[test]
    fn test_current_menu_lunch_window() {
        // A Wednesday at 1pm falls in the evening (lunch) window
        let now = Local.with_ymd_and_hms(2024, 10, 16, 13, 0, 0).unwrap();
        let text = tool().current_menu(now);
        assert!(text.contains("Wednesday's Menu"));
        assert!(text.contains("Lunch:"));
        // Wednesday serves kheer with lunch and dinner
        assert!(text.contains("Dessert: Kheer"));
    }

    #[test]
    fn test_current_menu_breakfast_has_no_dessert() {
        let now = Local.with_ymd_and_hms(2024, 10, 13, 8, 0, 0).unwrap();
        let text = tool().current_menu(now);
        assert!(text.contains("Breakfast:"));
        assert!(!text.contains("Dessert:"));
    }

    #[tokio::test]
    async fn test_execute_named_day() {
        let output = tool()
            .execute(serde_json::json!({"day": "monday"}))
            .await
            .unwrap();
        assert!(output.text_content().starts_with("Monday menu:"));
        assert!(!output.is_error);
    }

    #[tokio::test]
    async fn test_execute_unknown_day() {
        let output = tool()
            .execute(serde_json::json!({"day": "Someday"}))
            .await
            .unwrap();
        assert!(output.is_error);
    }
}
