use common::protocol::ItemState;

use crate::error::WatchError;

/// Review statuses the endpoint reports, with the verdict sent for each.
pub const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

pub fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, verdict)| *verdict)
}

/// Turn an entry into the notification text announcing its status.
pub fn translate(item: &ItemState) -> Result<String, WatchError> {
    if item.id.is_empty() {
        return Err(WatchError::MissingName);
    }
    let verdict = verdict_for(&item.status).ok_or_else(|| WatchError::UnknownStatus {
        status: item.status.clone(),
    })?;
    Ok(format!(r#"Changed review status for "{}": {}"#, item.id, verdict))
}
