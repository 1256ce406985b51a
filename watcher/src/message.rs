//! Response validation and notification text.

use common::error::PollError;
use common::homework::{HomeworkStatus, Submission};
use serde_json::Value;
use tracing::debug;

/// Check the top-level structure of an API response and return its
/// `homeworks` sequence.
pub fn validate(response: Value) -> Result<Vec<Value>, PollError> {
    let Value::Object(mut object) = response else {
        return Err(PollError::Shape);
    };
    match object.remove("homeworks") {
        None => Err(PollError::MissingField("homeworks")),
        Some(Value::Array(homeworks)) if homeworks.is_empty() => Err(PollError::Empty),
        Some(Value::Array(homeworks)) => Ok(homeworks),
        Some(_) => Err(PollError::Type),
    }
}

/// Parse the most recent homework. Only the head of the list is consulted.
pub fn latest_submission(homeworks: &[Value]) -> Result<Submission, PollError> {
    let head = homeworks.first().ok_or(PollError::Empty)?;
    if homeworks.len() > 1 {
        debug!(
            skipped = homeworks.len() - 1,
            "API returned several homeworks, only the latest is checked"
        );
    }
    Submission::from_value(head)
}

pub fn render_status(submission: &Submission) -> Result<(String, HomeworkStatus), PollError> {
    let status = submission
        .known_status()
        .ok_or_else(|| PollError::UnknownStatus(submission.status.clone()))?;
    let text = format!(
        "Изменился статус проверки работы \"{}\". {}",
        submission.name,
        status.verdict()
    );
    Ok((text, status))
}

pub fn render_failure(error: &PollError) -> String {
    format!("Сбой в работе программы: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_returns_homeworks() {
        let homeworks = validate(json!({
            "homeworks": [
                {"homework_name": "proj2", "status": "reviewing"},
                {"homework_name": "proj1", "status": "approved"},
            ],
            "current_date": 1_700_000_000,
        }))
        .unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(latest_submission(&homeworks).unwrap(), Submission::new("proj2", "reviewing"));
    }

    #[test]
    fn test_validate_error_taxonomy() {
        assert_eq!(validate(json!([1, 2, 3])), Err(PollError::Shape));
        assert_eq!(validate(json!("homeworks")), Err(PollError::Shape));
        assert_eq!(
            validate(json!({"current_date": 0})),
            Err(PollError::MissingField("homeworks"))
        );
        assert_eq!(validate(json!({"homeworks": []})), Err(PollError::Empty));
        assert_eq!(validate(json!({"homeworks": {"proj1": "approved"}})), Err(PollError::Type));
        assert_eq!(validate(json!({"homeworks": null})), Err(PollError::Type));
    }

    #[test]
    fn test_render_every_known_status() {
        let cases = [
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ];
        for (raw, verdict) in cases {
            let (text, status) = render_status(&Submission::new("proj1", raw)).unwrap();
            assert_eq!(
                text,
                format!("Изменился статус проверки работы \"proj1\". {verdict}")
            );
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_render_unknown_status() {
        let err = render_status(&Submission::new("proj1", "graded")).unwrap_err();
        assert_eq!(err, PollError::UnknownStatus("graded".to_string()));
    }

    #[test]
    fn test_render_failure_prefix() {
        assert_eq!(
            render_failure(&PollError::Empty),
            "Сбой в работе программы: API выдал пустой список домашних работ"
        );
    }
}
