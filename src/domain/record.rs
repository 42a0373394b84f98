//! Registration record model and field access.
//!
//! A [`Record`] is one child's registration as delivered by the upstream
//! spreadsheet proxy. Filter conditions, sort keys and search all address record
//! attributes through [`Field`], and read them as a [`FieldValue`] so that string
//! and boolean columns share one coercion story.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One registration entity.
///
/// The upstream proxy always sends a fully populated shape, but older rows may
/// omit columns; every field therefore defaults to an empty string, `false` or
/// `None` instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub id: String,
    pub child_name: String,
    /// Cohort label ("cycle" upstream).
    pub cycle: String,
    pub parent_phone: String,
    pub parent_name: String,
    pub course: String,
    pub school: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub needs_pickup: bool,
    /// Calendar date as delivered upstream, usually ISO `YYYY-MM-DD`.
    pub trial_date: String,
    pub in_whatsapp_group: bool,
    /// Free-text registration status (e.g. "אושר", "נדחה").
    pub status: String,
    /// Cohort identifier used to correlate with attendance sheets.
    pub cycle_id: Option<String>,
}

impl Record {
    /// Creates a record with the given id and child name; every other field empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use regdesk::domain::Record;
    ///
    /// let record = Record::new("rec1", "נועה");
    /// assert_eq!(record.id, "rec1");
    /// assert!(!record.needs_pickup);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, child_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            child_name: child_name.into(),
            ..Self::default()
        }
    }

    /// Reads a field as a [`FieldValue`].
    #[must_use]
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Id => FieldValue::Text(&self.id),
            Field::ChildName => FieldValue::Text(&self.child_name),
            Field::Cycle => FieldValue::Text(&self.cycle),
            Field::ParentPhone => FieldValue::Text(&self.parent_phone),
            Field::ParentName => FieldValue::Text(&self.parent_name),
            Field::Course => FieldValue::Text(&self.course),
            Field::School => FieldValue::Text(&self.school),
            Field::ClassName => FieldValue::Text(&self.class_name),
            Field::NeedsPickup => FieldValue::Flag(self.needs_pickup),
            Field::TrialDate => FieldValue::Text(&self.trial_date),
            Field::InWhatsappGroup => FieldValue::Flag(self.in_whatsapp_group),
            Field::Status => FieldValue::Text(&self.status),
            Field::CycleId => self
                .cycle_id
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
        }
    }

    /// Reads a field addressed by its wire key.
    ///
    /// Unknown keys read as [`FieldValue::Absent`] rather than failing.
    #[must_use]
    pub fn value_by_key(&self, key: &str) -> FieldValue<'_> {
        key.parse::<Field>()
            .map_or(FieldValue::Absent, |field| self.value(field))
    }
}

/// Addressable record attributes.
///
/// Keys are the upstream camelCase column names, so a filter condition
/// serialized by the dashboard front-end can be evaluated unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    ChildName,
    Cycle,
    ParentPhone,
    ParentName,
    Course,
    School,
    #[serde(rename = "class")]
    ClassName,
    NeedsPickup,
    TrialDate,
    InWhatsappGroup,
    Status,
    CycleId,
}

impl Field {
    /// Every field, in table column order.
    pub const ALL: [Self; 13] = [
        Self::Id,
        Self::ChildName,
        Self::Cycle,
        Self::ParentName,
        Self::ParentPhone,
        Self::School,
        Self::Course,
        Self::ClassName,
        Self::NeedsPickup,
        Self::TrialDate,
        Self::InWhatsappGroup,
        Self::Status,
        Self::CycleId,
    ];

    /// Fields whose values come from a small, externally-defined set.
    ///
    /// These back the multi-select advanced filters and the badge counts.
    pub const BOUNDED: [Self; 5] = [
        Self::Cycle,
        Self::Course,
        Self::School,
        Self::ClassName,
        Self::Status,
    ];

    /// Wire key of the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ChildName => "childName",
            Self::Cycle => "cycle",
            Self::ParentPhone => "parentPhone",
            Self::ParentName => "parentName",
            Self::Course => "course",
            Self::School => "school",
            Self::ClassName => "class",
            Self::NeedsPickup => "needsPickup",
            Self::TrialDate => "trialDate",
            Self::InWhatsappGroup => "inWhatsappGroup",
            Self::Status => "status",
            Self::CycleId => "cycleId",
        }
    }

    /// Column heading shown in the table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::ChildName => "CHILD",
            Self::Cycle => "CYCLE",
            Self::ParentPhone => "PHONE",
            Self::ParentName => "PARENT",
            Self::Course => "COURSE",
            Self::School => "SCHOOL",
            Self::ClassName => "CLASS",
            Self::NeedsPickup => "PICKUP",
            Self::TrialDate => "TRIAL",
            Self::InWhatsappGroup => "GROUP",
            Self::Status => "STATUS",
            Self::CycleId => "CYCLE ID",
        }
    }

    /// Whether the column holds a boolean.
    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::NeedsPickup | Self::InWhatsappGroup)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// A field value read from a record.
///
/// `Absent` covers both an unset optional column and a key that does not name
/// any column at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    Absent,
}

impl<'a> FieldValue<'a> {
    /// String coercion used by every comparison.
    ///
    /// Booleans become `"true"`/`"false"`; absent values become the empty string.
    #[must_use]
    pub const fn as_text(&self) -> &'a str {
        match *self {
            Self::Text(s) => s,
            Self::Flag(true) => "true",
            Self::Flag(false) => "false",
            Self::Absent => "",
        }
    }

    /// Truthiness: non-empty text or `true`.
    ///
    /// Note that `"0"` and `" "` are truthy strings.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
            Self::Absent => false,
        }
    }
}
