use axum::http::HeaderMap;

/// Client identification for the record; empty when the header is missing or not ASCII.
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Host part of the webhook URL, for logs. Never log the full URL: it embeds the deployment id.
pub fn redacted_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "<invalid url>".to_string())
}
