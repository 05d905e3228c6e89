use anyhow::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    api_key: &str,
) -> Result<Value> {
    let url = format!("{}/{}&apikey={}", base_url, endpoint, api_key);
    let res = client.get(&url).send().await?;

    if !res.status().is_success() {
        return Err(Error::msg(format!("Request failed: {}", res.status())));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

/// Decodes a JSON array response. An empty array is a valid answer (the
/// query matched nothing), so emptiness is left to the caller.
pub fn parse_response_array<T>(data: Value) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    match data {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Err(Error::msg("Unexpected API response format: not an array")),
    }
}
