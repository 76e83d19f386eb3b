//! Intent routing
//!
//! Keyword/regex matching over the incoming message against curated term
//! lists. No ranking, no ML: any-match with fixed precedence, defaulting to
//! general QA. Complaints are checked first because their term list overlaps
//! the menu list ("bad food") and intake must win.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use hostel_agent_core::ComplaintCategory;

/// Routed message intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageIntent {
    /// Start complaint intake
    Complaint,
    /// Mess-menu lookup
    MessMenu,
    /// Photo lookup
    Photos,
    /// Answer from the knowledge base
    GeneralQa,
}

impl MessageIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageIntent::Complaint => "complaint",
            MessageIntent::MessMenu => "mess_menu",
            MessageIntent::Photos => "photos",
            MessageIntent::GeneralQa => "general_qa",
        }
    }
}

impl std::fmt::Display for MessageIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of menu the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRequest {
    /// The meal being served now
    Current,
    /// A named day
    Day(String),
    /// The full week
    Week,
}

/// Which photos the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSelector {
    /// A catalog category, optionally narrowed to a subcategory
    Category {
        category: String,
        subcategory: Option<String>,
    },
    /// Everything ("show me the hostel")
    All,
}

/// Terms that mark a message as a complaint
const COMPLAINT_KEYWORDS: &[&str] = &[
    // Infrastructure issues
    "fan not working",
    "fan broken",
    "fan issue",
    "ceiling fan",
    "light not working",
    "light broken",
    "bulb not working",
    "electricity",
    "water problem",
    "no water",
    "tap not working",
    "plumbing",
    "wifi",
    "wi-fi",
    "internet",
    "network",
    "connection",
    "ac not working",
    "air conditioner",
    "cooling problem",
    "door broken",
    "lock issue",
    "window broken",
    // Cleanliness and maintenance
    "room dirty",
    "bathroom dirty",
    "cleaning issue",
    "garbage",
    "pest problem",
    "insects",
    "cockroach",
    "rats",
    "paint peeling",
    "wall damage",
    "ceiling leak",
    // Mess and food issues
    "food quality",
    "mess problem",
    "bad food",
    "food complaint",
    "hygiene issue",
    "kitchen problem",
    // Hostel services
    "laundry problem",
    "security issue",
    "noise complaint",
    "common room",
    "study room issue",
    // General complaint phrases
    "complain",
    "complaint",
    "problem",
    "issue",
    "broken",
    "not working",
    "malfunctioning",
    "damaged",
    "faulty",
];

/// Terms that mark a message as a menu lookup
const MENU_KEYWORDS: &[&str] = &[
    "menu",
    "mess timing",
    "what's for breakfast",
    "what's for lunch",
    "what's for dinner",
    "whats for breakfast",
    "whats for lunch",
    "whats for dinner",
    "today's food",
    "food today",
];

/// Category keyword groups, checked in order; first match wins
const CATEGORY_KEYWORDS: &[(ComplaintCategory, &[&str])] = &[
    (
        ComplaintCategory::Electrical,
        &["fan", "light", "bulb", "electricity", "ac", "air conditioner"],
    ),
    (
        ComplaintCategory::Plumbing,
        &["water", "tap", "plumbing", "bathroom", "toilet"],
    ),
    (
        ComplaintCategory::Connectivity,
        &["wifi", "wi-fi", "internet", "network"],
    ),
    (
        ComplaintCategory::Food,
        &["food", "mess", "kitchen", "hygiene"],
    ),
    (
        ComplaintCategory::Cleanliness,
        &["cleaning", "dirty", "garbage", "pest"],
    ),
    (
        ComplaintCategory::Infrastructure,
        &["door", "window", "lock", "paint", "wall", "ceiling"],
    ),
    (
        ComplaintCategory::HostelServices,
        &["noise", "security", "common room"],
    ),
];

static PHOTO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(photo|picture|image|pic|show me|look|view)").unwrap());

static GENERIC_PLACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(hostel|building|campus)").unwrap());

const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const PHOTO_CATEGORIES: [&str; 4] = ["rooms", "mess", "facilities", "exterior"];

const PHOTO_SUBCATEGORIES: &[(&str, &str)] = &[
    ("dining", "mess"),
    ("sports", "facilities"),
    ("building", "exterior"),
    ("entrance", "exterior"),
    ("garden", "exterior"),
];

/// Keyword-based intent router
#[derive(Debug, Default)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message into one of the four routed intents
    pub fn classify(&self, text: &str) -> MessageIntent {
        let lower = text.to_lowercase();

        if self.is_complaint(&lower) {
            MessageIntent::Complaint
        } else if self.is_menu_request(&lower) {
            MessageIntent::MessMenu
        } else if PHOTO_RE.is_match(&lower) {
            MessageIntent::Photos
        } else {
            MessageIntent::GeneralQa
        }
    }

    fn is_complaint(&self, lower: &str) -> bool {
        COMPLAINT_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    fn is_menu_request(&self, lower: &str) -> bool {
        MENU_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Categorize complaint text; first matching group wins, General
    /// otherwise
    pub fn classify_category(&self, text: &str) -> ComplaintCategory {
        let lower = text.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return *category;
            }
        }
        ComplaintCategory::General
    }

    /// Which menu a menu-intent message asks for
    pub fn menu_request(&self, text: &str) -> MenuRequest {
        let lower = text.to_lowercase();

        if lower.contains("week") || lower.contains("full menu") {
            return MenuRequest::Week;
        }

        let words: Vec<&str> = lower.unicode_words().collect();
        for day in DAY_NAMES {
            if words.iter().any(|w| *w == day) {
                let mut capitalized = day.to_string();
                capitalized[..1].make_ascii_uppercase();
                return MenuRequest::Day(capitalized);
            }
        }

        MenuRequest::Current
    }

    /// Which photos a photo-intent message asks for; None when the message
    /// names neither a category nor the hostel in general
    pub fn photo_selector(&self, text: &str) -> Option<PhotoSelector> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.unicode_words().collect();

        for category in PHOTO_CATEGORIES {
            if words.iter().any(|w| *w == category) {
                let subcategory = PHOTO_SUBCATEGORIES
                    .iter()
                    .find(|(sub, parent)| {
                        *parent == category && words.iter().any(|w| w == sub)
                    })
                    .map(|(sub, _)| sub.to_string());

                return Some(PhotoSelector::Category {
                    category: category.to_string(),
                    subcategory,
                });
            }
        }

        // A subcategory named on its own implies its category
        for (sub, parent) in PHOTO_SUBCATEGORIES {
            if words.iter().any(|w| w == sub) {
                return Some(PhotoSelector::Category {
                    category: parent.to_string(),
                    subcategory: Some(sub.to_string()),
                });
            }
        }

        if GENERIC_PLACE_RE.is_match(&lower) {
            return Some(PhotoSelector::All);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_detection() {
        let router = IntentRouter::new();
        assert_eq!(
            router.classify("The ceiling fan is not working"),
            MessageIntent::Complaint
        );
        assert_eq!(
            router.classify("I want to complain about the wifi"),
            MessageIntent::Complaint
        );
        assert_eq!(router.classify("my door is BROKEN"), MessageIntent::Complaint);
    }

    #[test]
    fn test_complaint_beats_menu() {
        let router = IntentRouter::new();
        // "bad food" is in the complaint list even though food is menu territory
        assert_eq!(
            router.classify("the mess served bad food yesterday"),
            MessageIntent::Complaint
        );
    }

    #[test]
    fn test_menu_detection() {
        let router = IntentRouter::new();
        assert_eq!(router.classify("what's on the menu today"), MessageIntent::MessMenu);
        assert_eq!(router.classify("whats for dinner"), MessageIntent::MessMenu);
    }

    #[test]
    fn test_photo_detection() {
        let router = IntentRouter::new();
        assert_eq!(
            router.classify("show me the hostel rooms"),
            MessageIntent::Photos
        );
        assert_eq!(
            router.classify("can I see pictures of the mess"),
            MessageIntent::Photos
        );
    }

    #[test]
    fn test_default_is_general_qa() {
        let router = IntentRouter::new();
        assert_eq!(
            router.classify("what are the hostel timings"),
            MessageIntent::GeneralQa
        );
        assert_eq!(router.classify("hello"), MessageIntent::GeneralQa);
    }

    #[test]
    fn test_category_classification() {
        let router = IntentRouter::new();
        assert_eq!(
            router.classify_category("fan not working"),
            ComplaintCategory::Electrical
        );
        assert_eq!(
            router.classify_category("no water in the bathroom tap"),
            ComplaintCategory::Plumbing
        );
        assert_eq!(
            router.classify_category("wifi keeps dropping"),
            ComplaintCategory::Connectivity
        );
        assert_eq!(
            router.classify_category("food quality is terrible"),
            ComplaintCategory::Food
        );
        assert_eq!(
            router.classify_category("garbage not collected"),
            ComplaintCategory::Cleanliness
        );
        assert_eq!(
            router.classify_category("paint peeling off the wall"),
            ComplaintCategory::Infrastructure
        );
        assert_eq!(
            router.classify_category("too much noise at night"),
            ComplaintCategory::HostelServices
        );
        assert_eq!(
            router.classify_category("something else entirely"),
            ComplaintCategory::General
        );
    }

    #[test]
    fn test_category_precedence_is_first_match() {
        let router = IntentRouter::new();
        // mentions both electrical and plumbing terms; electrical is checked first
        assert_eq!(
            router.classify_category("the light above the bathroom tap"),
            ComplaintCategory::Electrical
        );
    }

    #[test]
    fn test_menu_request_parsing() {
        let router = IntentRouter::new();
        assert_eq!(router.menu_request("menu please"), MenuRequest::Current);
        assert_eq!(
            router.menu_request("menu for monday"),
            MenuRequest::Day("Monday".to_string())
        );
        assert_eq!(router.menu_request("full week menu"), MenuRequest::Week);
    }

    #[test]
    fn test_photo_selector_parsing() {
        let router = IntentRouter::new();
        assert_eq!(
            router.photo_selector("show me the rooms"),
            Some(PhotoSelector::Category {
                category: "rooms".to_string(),
                subcategory: None,
            })
        );
        assert_eq!(
            router.photo_selector("pictures of the garden please"),
            Some(PhotoSelector::Category {
                category: "exterior".to_string(),
                subcategory: Some("garden".to_string()),
            })
        );
        assert_eq!(
            router.photo_selector("show me the hostel"),
            Some(PhotoSelector::All)
        );
        assert_eq!(router.photo_selector("show me the library"), None);
    }
}
