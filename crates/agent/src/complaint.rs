//! Complaint intake flow
//!
//! A per-session finite-state flow that collects four fields in a fixed
//! order, validating each, and finishes with a summary plus a pre-filled
//! portal URL. Invalid input re-prompts the same state; fields never
//! advance out of order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use hostel_agent_config::PortalConfig;
use hostel_agent_core::{validate, ComplaintCategory, ComplaintRecord};

use crate::AgentError;

/// Flow states, in collection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintState {
    CollectName,
    CollectEmail,
    CollectPhone,
    CollectRoom,
    Summary,
    Done,
}

impl ComplaintState {
    /// The only state a forward transition may reach from here
    pub fn next(&self) -> Option<ComplaintState> {
        match self {
            ComplaintState::CollectName => Some(ComplaintState::CollectEmail),
            ComplaintState::CollectEmail => Some(ComplaintState::CollectPhone),
            ComplaintState::CollectPhone => Some(ComplaintState::CollectRoom),
            ComplaintState::CollectRoom => Some(ComplaintState::Summary),
            ComplaintState::Summary => Some(ComplaintState::Done),
            ComplaintState::Done => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComplaintState::CollectName => "collect_name",
            ComplaintState::CollectEmail => "collect_email",
            ComplaintState::CollectPhone => "collect_phone",
            ComplaintState::CollectRoom => "collect_room",
            ComplaintState::Summary => "summary",
            ComplaintState::Done => "done",
        }
    }
}

impl std::fmt::Display for ComplaintState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of feeding one user turn into the flow
#[derive(Debug, Clone)]
pub enum FlowStep {
    /// Ask for the next field, or re-ask the current one
    Prompt { message: String, advanced: bool },
    /// All fields collected; the flow is finished
    Completed(Box<ComplaintOutcome>),
}

/// Terminal artifact of a completed flow
#[derive(Debug, Clone)]
pub struct ComplaintOutcome {
    /// The finalized record
    pub record: ComplaintRecord,
    /// Human-readable summary block
    pub summary: String,
    /// Pre-filled portal URL
    pub portal_url: String,
}

static CANCEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(cancel|stop|abort|quit|never\s?mind)\b").unwrap());

/// Whether a message asks to abort the flow
pub fn is_cancel_message(text: &str) -> bool {
    CANCEL_RE.is_match(text)
}

/// The complaint collection flow for one session
#[derive(Debug, Clone)]
pub struct ComplaintFlow {
    state: ComplaintState,
    category: ComplaintCategory,
    description: String,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    room: Option<String>,
}

impl ComplaintFlow {
    /// Start a flow from the complaint description. Returns the flow and
    /// the opening message asking for the first field.
    pub fn start(description: impl Into<String>, category: ComplaintCategory) -> (Self, String) {
        let flow = Self {
            state: ComplaintState::CollectName,
            category,
            description: description.into(),
            name: None,
            email: None,
            phone: None,
            room: None,
        };
        let message = format!(
            "I'm sorry to hear about this {} issue. I'll help you register a complaint. \
             Let me collect some basic information first.\n\nPlease provide your full name:",
            category.spoken_name()
        );
        (flow, message)
    }

    /// Current state
    pub fn state(&self) -> ComplaintState {
        self.state
    }

    /// Detected category
    pub fn category(&self) -> ComplaintCategory {
        self.category
    }

    /// Feed one user turn into the flow.
    ///
    /// Valid input moves to the next state; invalid input re-prompts the
    /// current one. On the last field the flow finalizes the record, builds
    /// the summary and portal URL, and reports `Completed`.
    pub fn advance(&mut self, input: &str, portal: &PortalConfig) -> Result<FlowStep, AgentError> {
        let input = input.trim();

        match self.state {
            ComplaintState::CollectName => {
                if input.is_empty() {
                    return Ok(FlowStep::Prompt {
                        message: "Please provide your full name:".to_string(),
                        advanced: false,
                    });
                }
                self.name = Some(input.to_string());
                self.state = ComplaintState::CollectEmail;
                Ok(FlowStep::Prompt {
                    message: format!(
                        "Thank you, {input}. Now please provide your college email address:"
                    ),
                    advanced: true,
                })
            }
            ComplaintState::CollectEmail => {
                if !validate::validate_email(input) {
                    return Ok(FlowStep::Prompt {
                        message:
                            "Please provide a valid email address (preferably your college email):"
                                .to_string(),
                        advanced: false,
                    });
                }
                self.email = Some(input.to_string());
                self.state = ComplaintState::CollectPhone;
                Ok(FlowStep::Prompt {
                    message: "Great! Now please provide your phone number:".to_string(),
                    advanced: true,
                })
            }
            ComplaintState::CollectPhone => {
                let Some(phone) = validate::normalize_phone(input) else {
                    return Ok(FlowStep::Prompt {
                        message: "Please provide a valid 10-digit phone number:".to_string(),
                        advanced: false,
                    });
                };
                self.phone = Some(phone);
                self.state = ComplaintState::CollectRoom;
                Ok(FlowStep::Prompt {
                    message: "Thank you! Please provide your room number:".to_string(),
                    advanced: true,
                })
            }
            ComplaintState::CollectRoom => {
                if input.is_empty() {
                    return Ok(FlowStep::Prompt {
                        message: "Please provide your room number:".to_string(),
                        advanced: false,
                    });
                }
                self.room = Some(input.to_string());
                self.state = ComplaintState::Summary;
                let outcome = self.finish(portal)?;
                self.state = ComplaintState::Done;
                Ok(FlowStep::Completed(Box::new(outcome)))
            }
            ComplaintState::Summary | ComplaintState::Done => Err(AgentError::Complaint(
                "flow already completed".to_string(),
            )),
        }
    }

    /// Build the terminal artifact. Only reachable once every field is
    /// collected; the record constructor re-checks each one.
    fn finish(&self, portal: &PortalConfig) -> Result<ComplaintOutcome, AgentError> {
        let (Some(name), Some(email), Some(phone), Some(room)) =
            (&self.name, &self.email, &self.phone, &self.room)
        else {
            return Err(AgentError::Complaint("missing collected fields".to_string()));
        };

        let record = ComplaintRecord::new(
            name.clone(),
            email.clone(),
            phone.clone(),
            room.clone(),
            self.category,
            self.description.clone(),
        )
        .map_err(|e| AgentError::Complaint(e.to_string()))?;

        let portal_url = build_portal_url(&record, portal)?;
        let summary = build_summary(&record);

        tracing::info!(
            category = %record.category(),
            room = %record.room_number(),
            "Complaint collection completed"
        );

        Ok(ComplaintOutcome {
            record,
            summary,
            portal_url,
        })
    }
}

/// Render the completion summary shown to the user
fn build_summary(record: &ComplaintRecord) -> String {
    format!(
        "**Complaint Summary**\n\n\
         **Issue Category:** {category}\n\
         **Description:** {description}\n\n\
         **Your Details:**\n\
         - **Name:** {name}\n\
         - **Email:** {email}\n\
         - **Phone:** {phone}\n\
         - **Room Number:** {room}\n\n\
         **Next Steps:**\n\
         1. Click the link below to open the complaint portal\n\
         2. The form will try to auto-fill your basic information\n\
         3. Please check any fields that were not pre-filled\n\
         4. Add any additional details in the description field\n\
         5. Submit the complaint to receive a reference number\n\n\
         Keep this chat open for reference while filling the form!",
        category = record.category(),
        description = record.description(),
        name = record.name(),
        email = record.email(),
        phone = record.phone(),
        room = record.room_number(),
    )
}

/// Build the pre-filled portal URL.
///
/// The portal form's exact field names are not under our control, so the
/// canonical fields are emitted alongside the aliases commonly used by
/// ticketing forms; the form picks up whichever it recognizes.
fn build_portal_url(record: &ComplaintRecord, portal: &PortalConfig) -> Result<String, AgentError> {
    let mut url = Url::parse(&portal.base_url).map_err(|e| AgentError::Url(e.to_string()))?;

    let subject: String = record
        .subject()
        .chars()
        .take(portal.max_subject_len)
        .collect();
    let location = record.location();

    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("email", record.email())
            .append_pair("name", record.name())
            .append_pair("fullname", record.name())
            .append_pair("phone", record.phone())
            .append_pair("mobile", record.phone())
            .append_pair("subject", &subject)
            .append_pair("summary", &subject)
            .append_pair("message", record.description())
            .append_pair("issue", record.description())
            .append_pair("location", &location)
            .append_pair("room", record.room_number())
            .append_pair("category", record.category().display_name());
    }

    Ok(url.into())
}

/// Message confirming a cancelled flow
pub fn cancel_message() -> &'static str {
    "Complaint registration cancelled. How else can I help you?"
}
