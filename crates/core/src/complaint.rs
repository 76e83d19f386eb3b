//! Complaint data model: categories and finalized records

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validate;

/// Complaint categories recognized by the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    /// Fans, lights, AC, power supply
    Electrical,
    /// Water supply, taps, bathrooms
    Plumbing,
    /// WiFi and network issues
    Connectivity,
    /// Mess food quality and kitchen hygiene
    Food,
    /// Cleaning, garbage, pests
    Cleanliness,
    /// Doors, windows, walls, civil works
    Infrastructure,
    /// Noise, security, common areas
    HostelServices,
    /// Anything that fits no other category
    General,
}

impl ComplaintCategory {
    /// Human-readable name shown in summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Electrical => "Electrical",
            Self::Plumbing => "Plumbing",
            Self::Connectivity => "Internet/WiFi",
            Self::Food => "Mess/Food",
            Self::Cleanliness => "Cleanliness",
            Self::Infrastructure => "Infrastructure",
            Self::HostelServices => "Hostel Services",
            Self::General => "General",
        }
    }

    /// Lowercase form used mid-sentence ("this electrical issue")
    pub fn spoken_name(&self) -> String {
        self.display_name().to_lowercase()
    }

    /// All categories, in classification precedence order
    pub fn all() -> &'static [ComplaintCategory] {
        &[
            Self::Electrical,
            Self::Plumbing,
            Self::Connectivity,
            Self::Food,
            Self::Cleanliness,
            Self::Infrastructure,
            Self::HostelServices,
            Self::General,
        ]
    }
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A finalized complaint. Immutable once constructed: the constructor
/// validates every field, so an instance always represents a complete,
/// well-formed submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    name: String,
    email: String,
    phone: String,
    room_number: String,
    category: ComplaintCategory,
    description: String,
}

impl ComplaintRecord {
    /// Build a record from collected fields. Fails if any field would not
    /// have passed the intake validation, so a record can only exist once
    /// all four fields are valid.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        room_number: impl Into<String>,
        category: ComplaintCategory,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }

        let email = email.into().trim().to_string();
        if !validate::validate_email(&email) {
            return Err(Error::Validation(format!("invalid email: {email}")));
        }

        let phone = validate::normalize_phone(&phone.into())
            .ok_or_else(|| Error::Validation("invalid phone number".into()))?;

        let room_number = room_number.into().trim().to_string();
        if room_number.is_empty() {
            return Err(Error::Validation("room number must not be empty".into()));
        }

        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(Error::Validation("description must not be empty".into()));
        }

        Ok(Self {
            name,
            email,
            phone,
            room_number,
            category,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn room_number(&self) -> &str {
        &self.room_number
    }

    pub fn category(&self) -> ComplaintCategory {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Subject line used on the portal form: "Room {room} - {description}"
    pub fn subject(&self) -> String {
        format!("Room {} - {}", self.room_number, self.description)
    }

    /// Location string used on the portal form
    pub fn location(&self) -> String {
        format!("Room {}", self.room_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_requires_valid_fields() {
        let ok = ComplaintRecord::new(
            "John Doe",
            "john.doe@ietlucknow.ac.in",
            "9876543210",
            "A-101",
            ComplaintCategory::Electrical,
            "ceiling fan not working",
        );
        assert!(ok.is_ok());
        let record = ok.unwrap();
        assert_eq!(record.subject(), "Room A-101 - ceiling fan not working");
        assert_eq!(record.location(), "Room A-101");
    }

    #[test]
    fn test_record_rejects_bad_email() {
        let err = ComplaintRecord::new(
            "John Doe",
            "not-an-email",
            "9876543210",
            "A-101",
            ComplaintCategory::General,
            "issue",
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_record_rejects_short_phone() {
        let err = ComplaintRecord::new(
            "John Doe",
            "john@example.com",
            "12345",
            "A-101",
            ComplaintCategory::General,
            "issue",
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_record_phone_is_normalized() {
        let record = ComplaintRecord::new(
            "John Doe",
            "john@example.com",
            "+91 98765-43210",
            "A-101",
            ComplaintCategory::Plumbing,
            "tap leaking",
        )
        .unwrap();
        assert_eq!(record.phone(), "919876543210");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ComplaintCategory::Connectivity.display_name(), "Internet/WiFi");
        assert_eq!(ComplaintCategory::Food.spoken_name(), "mess/food");
    }
}
