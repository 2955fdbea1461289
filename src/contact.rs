//! Contact form state machine.
//!
//! `Idle -> Submitting -> Sent -> Idle`, with `Submitting -> Failed` when the
//! transport reports an error. Nothing leaves the page: the bundled transport
//! only simulates latency.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::clock::Timestamp;
use crate::schedule::TaskQueue;

pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1_500);
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown form field `{0}`")]
pub struct FieldError(pub String);

impl FromStr for FormField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "message" => Ok(Self::Message),
            other => Err(FieldError(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please fill in your {}", .0.as_str())]
    Missing(FormField),
    #[error("please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a message is already being sent")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("the message could not be delivered: {0}")]
    Unavailable(String),
    #[error("the message was rejected: {0}")]
    Rejected(String),
}

/// `local@domain` with no whitespace, the shape an `<input type="email">`
/// accepts.
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

pub fn validate(fields: &FormFields) -> Result<(), ValidationError> {
    if fields.email.trim().is_empty() {
        return Err(ValidationError::Missing(FormField::Email));
    }
    if fields.message.trim().is_empty() {
        return Err(ValidationError::Missing(FormField::Message));
    }
    if !looks_like_email(fields.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    fn from_fields(fields: &FormFields) -> Self {
        let name = fields.name.trim();
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: fields.email.trim().to_string(),
            message: fields.message.trim().to_string(),
        }
    }
}

/// Where a validated message goes once the send latency has elapsed.
pub trait Transport {
    fn send(&mut self, message: &ContactMessage) -> Result<(), SendError>;
}

/// Accepts everything. The site has no mail endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedTransport;

impl Transport for SimulatedTransport {
    fn send(&mut self, _message: &ContactMessage) -> Result<(), SendError> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    /// The success notice is showing.
    Sent,
    Failed(SendError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactTimings {
    pub submit_latency: Duration,
    pub notice_duration: Duration,
}

impl Default for ContactTimings {
    fn default() -> Self {
        Self {
            submit_latency: DEFAULT_SUBMIT_LATENCY,
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormTask {
    CompleteSend,
    HideNotice,
}

pub struct ContactForm<T = SimulatedTransport> {
    fields: FormFields,
    phase: Phase,
    timings: ContactTimings,
    transport: T,
    tasks: TaskQueue<FormTask>,
    last_error: Option<ValidationError>,
}

impl<T: Transport> ContactForm<T> {
    pub fn new(timings: ContactTimings, transport: T) -> Self {
        Self {
            fields: FormFields::default(),
            phase: Phase::Idle,
            timings,
            transport,
            tasks: TaskQueue::new(),
            last_error: None,
        }
    }

    /// Replaces exactly one field. Editing also clears a stale validation
    /// message.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
        self.last_error = None;
    }

    pub fn submit(&mut self, now: Timestamp) -> Result<(), SubmitError> {
        if self.phase == Phase::Submitting {
            return Err(SubmitError::Busy);
        }
        if let Err(error) = validate(&self.fields) {
            self.last_error = Some(error);
            return Err(error.into());
        }

        self.last_error = None;
        self.tasks.cancel_where(|task| *task == FormTask::HideNotice);
        self.tasks
            .schedule(now, self.timings.submit_latency, FormTask::CompleteSend);
        self.phase = Phase::Submitting;
        Ok(())
    }

    /// Runs every task due at `now` and returns the phases entered, in order.
    pub fn advance(&mut self, now: Timestamp) -> Vec<Phase> {
        let mut entered = Vec::new();
        for task in self.tasks.drain_due(now) {
            match task {
                FormTask::CompleteSend => {
                    let message = ContactMessage::from_fields(&self.fields);
                    match self.transport.send(&message) {
                        Ok(()) => {
                            self.fields = FormFields::default();
                            self.phase = Phase::Sent;
                            self.tasks.schedule(
                                now,
                                self.timings.notice_duration,
                                FormTask::HideNotice,
                            );
                        }
                        Err(error) => self.phase = Phase::Failed(error),
                    }
                }
                FormTask::HideNotice => {
                    if self.phase == Phase::Sent {
                        self.phase = Phase::Idle;
                    }
                }
            }
            entered.push(self.phase.clone());
        }
        entered
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.tasks.next_due()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_error(&self) -> Option<ValidationError> {
        self.last_error
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_locked() {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Drops pending sends and notice timers so nothing fires after unmount.
    pub fn dispose(&mut self) -> usize {
        self.tasks.clear()
    }
}
