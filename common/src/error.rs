use thiserror::Error;

/// Everything that can go wrong during one poll cycle.
///
/// The display strings are sent verbatim to the operator chat as part of
/// the failure notice, so they read as user-facing text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("Эндпоинт API недоступен: {0}")]
    Network(String),

    #[error("Код ответа API отличен от 200: {0}")]
    Upstream(u16),

    #[error("Ответ API не преобразуется в JSON: {0}")]
    Decode(String),

    #[error("API вернул не словарь")]
    Shape,

    #[error("В ответе API нет ключа \"{0}\"")]
    MissingField(&'static str),

    #[error("API выдал пустой список домашних работ")]
    Empty,

    #[error("Ключ \"homeworks\" в ответе API не является списком")]
    Type,

    #[error("Данные о домашней работе не в виде словаря")]
    SubmissionShape,

    #[error("Неизвестный статус домашней работы: \"{0}\"")]
    UnknownStatus(String),

    #[error("Сообщение не отправлено: {0}")]
    Notification(String),
}

impl PollError {
    /// Short machine-readable tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Network(_) => "network",
            PollError::Upstream(_) => "upstream",
            PollError::Decode(_) => "decode",
            PollError::Shape => "shape",
            PollError::MissingField(_) => "missing_field",
            PollError::Empty => "empty",
            PollError::Type => "type",
            PollError::SubmissionShape => "submission_shape",
            PollError::UnknownStatus(_) => "unknown_status",
            PollError::Notification(_) => "notification",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_detail() {
        assert_eq!(
            PollError::Upstream(503).to_string(),
            "Код ответа API отличен от 200: 503"
        );
        assert_eq!(
            PollError::MissingField("homeworks").to_string(),
            "В ответе API нет ключа \"homeworks\""
        );
        assert!(PollError::UnknownStatus("lost".into()).to_string().contains("lost"));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(PollError::Empty.kind(), "empty");
        assert_eq!(PollError::Notification("down".into()).kind(), "notification");
    }
}
