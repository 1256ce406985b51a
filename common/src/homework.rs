use serde_json::Value;

use crate::error::PollError;

/// Review status as reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Reviewing,
        HomeworkStatus::Approved,
        HomeworkStatus::Rejected,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sentence for the notification.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single homework item from the `homeworks` array.
///
/// `status` keeps the raw wire value so unrecognised statuses can still be
/// compared and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub status: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, PollError> {
        let object = value.as_object().ok_or(PollError::SubmissionShape)?;
        let name = object
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(PollError::MissingField("homework_name"))?;
        let status = object
            .get("status")
            .and_then(Value::as_str)
            .ok_or(PollError::MissingField("status"))?;
        Ok(Self::new(name, status))
    }

    pub fn known_status(&self) -> Option<HomeworkStatus> {
        HomeworkStatus::parse(&self.status)
    }
}
