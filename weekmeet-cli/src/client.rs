//! HTTP client for communicating with weekmeet-server

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::profile::Profile;
use weekmeet_core::slot::{SlotCoord, SlotTable, WeekCalendar};

/// HTTP client for weekmeet-server
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Request and response types matching the server API

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    user_id: &'a str,
    user_name: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSlotRequest<'a> {
    week_key: &'a str,
    day: u8,
    time_index: u8,
    user_id: &'a str,
    user_name: &'a str,
    color: &'a str,
    is_selected: bool,
}

#[derive(Deserialize)]
struct SaveProfileResponse {
    user: Profile,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl Client {
    pub fn from_config(config: &WeekmeetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.server_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /users
    pub async fn list_users(&self) -> Result<Vec<Profile>> {
        let resp = self
            .http
            .get(format!("{}/users", self.base_url))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }

    /// POST /users
    pub async fn save_profile(&self, profile: &Profile) -> Result<Profile> {
        let resp = self
            .http
            .post(format!("{}/users", self.base_url))
            .json(profile)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        let saved: SaveProfileResponse = resp.json().await?;
        Ok(saved.user)
    }

    /// PUT /users
    pub async fn update_profile(&self, user_id: &str, user_name: &str, color: &str) -> Result<()> {
        let resp = self
            .http
            .put(format!("{}/users", self.base_url))
            .json(&UpdateProfileRequest {
                user_id,
                user_name,
                color,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(())
    }

    /// DELETE /users?userId=
    pub async fn delete_profile(&self, user_id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/users", self.base_url))
            .query(&[("userId", user_id)])
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(())
    }

    /// GET /calendar?weekKey=
    pub async fn week_table(&self, week_key: &str) -> Result<SlotTable> {
        let resp = self
            .http
            .get(format!("{}/calendar", self.base_url))
            .query(&[("weekKey", week_key)])
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }

    /// GET /calendar
    pub async fn all_weeks(&self) -> Result<WeekCalendar> {
        let resp = self
            .http
            .get(format!("{}/calendar", self.base_url))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }

    /// PUT /calendar
    pub async fn update_slot(
        &self,
        week_key: &str,
        coord: SlotCoord,
        profile: &Profile,
        is_selected: bool,
    ) -> Result<()> {
        let resp = self
            .http
            .put(format!("{}/calendar", self.base_url))
            .json(&UpdateSlotRequest {
                week_key,
                day: coord.day(),
                time_index: coord.time_index(),
                user_id: &profile.id,
                user_name: &profile.name,
                color: &profile.color,
                is_selected,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(())
    }
}
