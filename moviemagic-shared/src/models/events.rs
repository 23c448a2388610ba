/// Outbound e-mail request as published on the notification topic.
/// Consumers fan it out to the address carried in `email`.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    pub email: String,
    pub subject: String,
    pub body: String,
}

impl EmailNotification {
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
