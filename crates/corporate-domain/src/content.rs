//! Content resources managed from the admin panel: events, announcements and members.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::id::ContentId;

/// A content resource served under `/api/{PATH}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// URL segment, also used as the table name.
    const PATH: &'static str;

    /// Singular display name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> ContentId;

    /// Stored photo filename, if any.
    fn photo(&self) -> Option<&str>;

    fn set_photo_url(&mut self, url: Option<String>);
}

/// Lifecycle bucket of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Recent,
    Past,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Recent => "recent",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventStatus(pub String);

impl fmt::Display for UnknownEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event status: {}", self.0)
    }
}

impl std::error::Error for UnknownEventStatus {}

impl FromStr for EventStatus {
    type Err = UnknownEventStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "recent" => Ok(Self::Recent),
            "past" => Ok(Self::Past),
            other => Err(UnknownEventStatus(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: ContentId,
    pub title: String,
    pub link: String,
    pub description: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub end_date: NaiveDate,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: ContentId,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub end_date: NaiveDate,
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ContentId,
    pub name: String,
    pub position: String,
    pub rank: Option<i32>,
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

macro_rules! impl_resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;

            fn id(&self) -> ContentId {
                self.id
            }

            fn photo(&self) -> Option<&str> {
                self.photo.as_deref()
            }

            fn set_photo_url(&mut self, url: Option<String>) {
                self.photo_url = url;
            }
        }
    };
}

impl_resource!(Event, "events", "Event");
impl_resource!(Announcement, "announcements", "Announcement");
impl_resource!(Member, "members", "Member");
