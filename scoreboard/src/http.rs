use leaderboard_core::{ControlError, ControlRequest, ControlResponse};

/// Sends a control request as a bodiless `POST` and reports the status code.
pub async fn send(request: ControlRequest) -> ControlResponse {
    let client = reqwest::Client::new();
    let response = client
        .post(&request.url)
        .send()
        .await
        .map_err(|e| ControlError::Request(e.to_string()))?;
    Ok(response.status().as_u16())
}
