use anyhow::Result;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub fn build_http_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Splits a response into its status and JSON body
pub async fn parse_response(response: Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let data = response.json::<Value>().await?;
    Ok((status, data))
}
