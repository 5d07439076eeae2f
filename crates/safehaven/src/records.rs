//! Record types for safehaven.
//!
//! Defines the three kinds of record kept by the store (help requests, legal
//! requests and contact messages), the drafts callers submit to create them,
//! and the patches used to update them. Field names serialize in camelCase so
//! the stored JSON matches the layout other readers of the same store expect.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One of the independently stored record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Counselling requests from survivors.
    HelpRequests,
    /// Legal consultation requests.
    LegalRequests,
    /// General contact form messages.
    ContactMessages,
}

impl Collection {
    /// Every collection, in the order they are reported.
    pub const ALL: [Collection; 3] = [
        Self::HelpRequests,
        Self::LegalRequests,
        Self::ContactMessages,
    ];

    /// The key this collection is stored under.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::HelpRequests => "helpRequests",
            Self::LegalRequests => "legalRequests",
            Self::ContactMessages => "contactMessages",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A record that lives in one of the store's collections.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The collection records of this kind are stored in.
    const COLLECTION: Collection;

    /// The caller-supplied fields used to create a new record.
    type Draft;

    /// Build a record from a draft, assigning the generated fields.
    ///
    /// The record starts in its kind's default status, if it has one.
    fn from_draft(draft: Self::Draft, id: String, timestamp: DateTime<Utc>) -> Self;

    /// Unique identifier within the collection.
    fn id(&self) -> &str;

    /// When the record was created.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// A record whose fields may be patched after creation.
pub trait Updatable: Record {
    /// Partial set of fields to merge into an existing record.
    type Patch;

    /// Shallow-merge `patch` into this record. Unset fields are left alone.
    fn apply(&mut self, patch: Self::Patch);
}

/// Progress of a help request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HelpStatus {
    /// Waiting for a counsellor.
    #[default]
    Pending,
    /// A counsellor is working on it.
    InProgress,
    /// Closed out.
    Completed,
}

impl HelpStatus {
    /// The conventional next step, or `None` once completed.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl std::fmt::Display for HelpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Progress of a legal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalStatus {
    /// Not yet looked at.
    #[default]
    Pending,
    /// Reviewed by the legal team.
    Reviewed,
    /// Closed out.
    Completed,
}

impl std::fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Reviewed => write!(f, "reviewed"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// How pressing a legal request is. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    /// Can wait.
    Low,
    /// Default choice on the intake form.
    #[default]
    Medium,
    /// Needs attention soon.
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A survivor's request for counselling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    /// Unique identifier.
    pub id: String,
    /// Name given by the requester.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-text description of the situation.
    pub message: String,
    /// Current progress.
    pub status: HelpStatus,
    /// When the request was submitted.
    pub timestamp: Timestamp,
    /// Notes left by a counsellor, absent until first set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counsellor_notes: Option<String>,
    /// Stored keys this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields submitted on the help request form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewHelpRequest {
    /// Name given by the requester.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-text description of the situation.
    pub message: String,
}

/// Partial update for a help request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HelpRequestPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement message.
    pub message: Option<String>,
    /// New status.
    pub status: Option<HelpStatus>,
    /// New counsellor notes, overwriting any existing notes.
    pub counsellor_notes: Option<String>,
}

impl HelpRequestPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: HelpStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch that only sets counsellor notes.
    #[must_use]
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            counsellor_notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

impl Record for HelpRequest {
    const COLLECTION: Collection = Collection::HelpRequests;
    type Draft = NewHelpRequest;

    fn from_draft(draft: NewHelpRequest, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            message: draft.message,
            status: HelpStatus::default(),
            timestamp: Timestamp::from(timestamp),
            counsellor_notes: None,
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.instant()
    }
}

impl Updatable for HelpRequest {
    type Patch = HelpRequestPatch;

    fn apply(&mut self, patch: HelpRequestPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.counsellor_notes {
            self.counsellor_notes = Some(notes);
        }
    }
}

/// A request for a legal consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalRequest {
    /// Unique identifier.
    pub id: String,
    /// Name given by the requester.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-text description of the legal situation.
    pub case_details: String,
    /// Urgency chosen at submission. Never changes.
    pub urgency: Urgency,
    /// When the request was submitted.
    pub timestamp: Timestamp,
    /// Current progress.
    pub status: LegalStatus,
    /// Stored keys this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields submitted on the legal consultation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewLegalRequest {
    /// Name given by the requester.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-text description of the legal situation.
    pub case_details: String,
    /// How pressing the case is.
    pub urgency: Urgency,
}

/// Partial update for a legal request.
///
/// Urgency is fixed at creation and has no patch field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalRequestPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement case details.
    pub case_details: Option<String>,
    /// New status.
    pub status: Option<LegalStatus>,
}

impl LegalRequestPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: LegalStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Record for LegalRequest {
    const COLLECTION: Collection = Collection::LegalRequests;
    type Draft = NewLegalRequest;

    fn from_draft(draft: NewLegalRequest, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            case_details: draft.case_details,
            urgency: draft.urgency,
            timestamp: Timestamp::from(timestamp),
            status: LegalStatus::default(),
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.instant()
    }
}

impl Updatable for LegalRequest {
    type Patch = LegalRequestPatch;

    fn apply(&mut self, patch: LegalRequestPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(case_details) = patch.case_details {
            self.case_details = case_details;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// A message sent through the general contact form. Write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Unique identifier.
    pub id: String,
    /// Sender's name.
    pub name: String,
    /// Sender's email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// When the message was sent.
    pub timestamp: Timestamp,
    /// Stored keys this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields submitted on the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::ContactMessages;
    type Draft = NewContactMessage;

    fn from_draft(draft: NewContactMessage, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            timestamp: Timestamp::from(timestamp),
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.instant()
    }
}

/// A record's creation time.
///
/// New timestamps are written as RFC 3339 UTC with millisecond precision,
/// e.g. `2025-03-01T09:30:00.123Z`. A timestamp read from storage keeps its
/// original text so rewriting a collection never reformats existing records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    raw: String,
}

impl Timestamp {
    /// Parse an RFC 3339 timestamp, keeping `raw` as its stored form.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `raw` is not valid RFC 3339.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
        Ok(Self {
            instant,
            raw: raw.to_string(),
        })
    }

    /// The point in time, in UTC.
    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The text stored for this timestamp.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}
