use serde::{Deserialize, Serialize};

pub mod send_booking_reminders {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub api_key: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications_sent: usize,
    }

    impl APIResponse {
        pub fn new(notifications_sent: usize) -> Self {
            Self { notifications_sent }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::send_booking_reminders::APIResponse;
    use serde_json::json;

    #[test]
    fn response_uses_camel_case_on_the_wire() {
        let response = serde_json::to_value(APIResponse::new(3)).unwrap();
        assert_eq!(response, json!({ "notificationsSent": 3 }));
    }
}
