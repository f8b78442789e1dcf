use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub town: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.town, self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: u32,
    pub name: String,
    pub profession: String,
    pub rate: String,
    pub location: Location,
    pub radius: String,
    pub mosque: String,
    pub rating: f64,
    pub reviews: u32,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub recent_work: String,
    #[serde(default)]
    pub contact_hidden: bool,
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharityCause {
    pub id: u32,
    pub title: String,
    pub organization: String,
    pub registration_number: String,
    pub entity_name: String,
    pub verification_status: VerificationStatus,
    pub rating: f64,
    pub transparency_score: u8,
    pub target: f64,
    pub raised: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub project_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Relative label such as "2 hours ago", not a timestamp.
    pub time: String,
    pub kind: String,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Community,
    #[serde(alias = "ulama_qa")]
    ScholarQa,
}

impl GroupKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::ScholarQa => "scholar q&a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    pub name: String,
    pub members: u32,
    pub description: String,
    pub icon: String,
    pub location: Location,
    pub mosque: String,
    pub kind: GroupKind,
    /// Only set for scholar Q&A groups.
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub handle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Update,
    Announcement,
    PrayerRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    pub author: Author,
    pub content: String,
    pub time: String,
    pub likes: u32,
    pub comments: u32,
    pub kind: PostKind,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub attendees: u32,
    pub category: String,
    pub price: String,
    pub description: String,
}

/// Daily timetable as published by the local masjid, "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl PrayerTimes {
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("fajr", self.fajr.as_str()),
            ("dhuhr", self.dhuhr.as_str()),
            ("asr", self.asr.as_str()),
            ("maghrib", self.maghrib.as_str()),
            ("isha", self.isha.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub handle: String,
    pub location: String,
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub use_nickname: bool,
    pub nickname: String,
    pub show_full_name: bool,
}

impl UserProfile {
    /// Name shown in the public directory. With the full name hidden only
    /// the first name is shown.
    pub fn display_name<'a>(&'a self, privacy: &'a PrivacySettings) -> &'a str {
        if privacy.use_nickname {
            &privacy.nickname
        } else if privacy.show_full_name {
            &self.name
        } else {
            self.name.split_whitespace().next().unwrap_or(&self.name)
        }
    }
}

/// Every collection a screen can render, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub current_user: UserProfile,
    pub privacy: PrivacySettings,
    pub professionals: Vec<Professional>,
    pub causes: Vec<CharityCause>,
    pub notifications: Vec<Notification>,
    pub groups: Vec<Group>,
    pub posts: Vec<Post>,
    pub events: Vec<Event>,
    pub prayer_times: PrayerTimes,
}
