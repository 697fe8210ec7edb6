use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// 所有對外請求共用：固定逾時，逾時即視為失敗
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?;
    Ok(client)
}
