//! Write-side shapes of the content resources and their form validation.

use chrono::NaiveDate;

use corporate_domain::content::{Announcement, Event, EventStatus, Member, Resource};

use crate::domain::validation::Validator;

/// A resource that can be created and partially updated from form fields.
pub trait ContentKind: Resource {
    /// Raw text fields as submitted; the photo travels separately.
    type Input: Send + Sync + 'static;
    type Draft: Clone + Send + Sync + 'static;
    type Patch: Clone + Default + Send + Sync + 'static;

    /// Validate a create request. Returns `None` only after recording an error in `v`.
    fn draft(input: &Self::Input, v: &mut Validator) -> Option<Self::Draft>;

    /// Validate an update request. Only supplied fields are checked and changed.
    fn patch(input: &Self::Input, v: &mut Validator) -> Self::Patch;
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref()
}

/// Run `check` on a supplied non-blank value; blank supplied values are "required" errors.
fn supplied<T>(
    v: &mut Validator,
    field: &str,
    value: &Option<String>,
    check: impl FnOnce(&mut Validator, String) -> Option<T>,
) -> Option<T> {
    let raw = present(value)?;
    let value = v.required(field, Some(raw))?;
    check(v, value)
}

fn bounded(v: &mut Validator, field: &str, value: String) -> Option<String> {
    v.max_chars(field, &value, 255);
    (!v.has_error(field)).then_some(value)
}

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub link: String,
    pub description: String,
    pub end_date: NaiveDate,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<EventStatus>,
}

impl ContentKind for Event {
    type Input = EventInput;
    type Draft = EventDraft;
    type Patch = EventPatch;

    fn draft(input: &EventInput, v: &mut Validator) -> Option<EventDraft> {
        let title = v
            .required("title", present(&input.title))
            .and_then(|t| bounded(v, "title", t));
        let link = v
            .required("link", present(&input.link))
            .and_then(|l| bounded(v, "link", l));
        let description = v.required("description", present(&input.description));
        let end_date = v
            .required("end_date", present(&input.end_date))
            .and_then(|d| v.date("end_date", &d));
        let status = match Validator::nullable(present(&input.status)).flatten() {
            Some(s) => Some(v.one_of::<EventStatus>("status", &s)?),
            None => Some(EventStatus::default()),
        };
        Some(EventDraft {
            title: title?,
            link: link?,
            description: description?,
            end_date: end_date?,
            status: status?,
        })
    }

    fn patch(input: &EventInput, v: &mut Validator) -> EventPatch {
        EventPatch {
            title: supplied(v, "title", &input.title, |v, t| bounded(v, "title", t)),
            link: supplied(v, "link", &input.link, |v, l| bounded(v, "link", l)),
            description: supplied(v, "description", &input.description, |_, d| Some(d)),
            end_date: supplied(v, "end_date", &input.end_date, |v, d| v.date("end_date", &d)),
            status: supplied(v, "status", &input.status, |v, s| {
                v.one_of::<EventStatus>("status", &s)
            }),
        }
    }
}

// ── Announcements ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AnnouncementInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementDraft {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub end_date: NaiveDate,
}

/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub link: Option<Option<String>>,
    pub end_date: Option<NaiveDate>,
}

impl ContentKind for Announcement {
    type Input = AnnouncementInput;
    type Draft = AnnouncementDraft;
    type Patch = AnnouncementPatch;

    fn draft(input: &AnnouncementInput, v: &mut Validator) -> Option<AnnouncementDraft> {
        let title = v
            .required("title", present(&input.title))
            .and_then(|t| bounded(v, "title", t));
        let end_date = v
            .required("end_date", present(&input.end_date))
            .and_then(|d| v.date("end_date", &d));
        Some(AnnouncementDraft {
            title: title?,
            description: Validator::nullable(present(&input.description)).flatten(),
            link: Validator::nullable(present(&input.link)).flatten(),
            end_date: end_date?,
        })
    }

    fn patch(input: &AnnouncementInput, v: &mut Validator) -> AnnouncementPatch {
        AnnouncementPatch {
            title: supplied(v, "title", &input.title, |v, t| bounded(v, "title", t)),
            description: Validator::nullable(present(&input.description)),
            link: Validator::nullable(present(&input.link)),
            end_date: supplied(v, "end_date", &input.end_date, |v, d| v.date("end_date", &d)),
        }
    }
}

// ── Members ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemberInput {
    pub name: Option<String>,
    pub position: Option<String>,
    pub rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub position: String,
    pub rank: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub rank: Option<Option<i32>>,
}

fn rank(v: &mut Validator, value: &Option<String>) -> Option<Option<i32>> {
    match Validator::nullable(present(value))? {
        Some(raw) => v.integer("rank", &raw).map(Some),
        None => Some(None),
    }
}

impl ContentKind for Member {
    type Input = MemberInput;
    type Draft = MemberDraft;
    type Patch = MemberPatch;

    fn draft(input: &MemberInput, v: &mut Validator) -> Option<MemberDraft> {
        let name = v
            .required("name", present(&input.name))
            .and_then(|n| bounded(v, "name", n));
        let position = v
            .required("position", present(&input.position))
            .and_then(|p| bounded(v, "position", p));
        let rank = match &input.rank {
            None => Some(None),
            Some(_) => rank(v, &input.rank),
        };
        Some(MemberDraft {
            name: name?,
            position: position?,
            rank: rank?,
        })
    }

    fn patch(input: &MemberInput, v: &mut Validator) -> MemberPatch {
        MemberPatch {
            name: supplied(v, "name", &input.name, |v, n| bounded(v, "name", n)),
            position: supplied(v, "position", &input.position, |v, p| {
                bounded(v, "position", p)
            }),
            rank: rank(v, &input.rank),
        }
    }
}
