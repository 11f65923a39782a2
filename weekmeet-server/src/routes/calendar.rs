//! Availability endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use weekmeet_core::WeekmeetError;
use weekmeet_core::slot::{SlotCoord, SlotEntry, SlotTable, WeekCalendar};
use weekmeet_core::week;

use crate::routes::{Ack, AppError, required};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/calendar",
        get(get_calendar).post(replace_week).put(update_slot),
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub week_key: Option<String>,
}

/// One week's table, or every stored week when no weekKey was given
#[derive(Serialize)]
#[serde(untagged)]
pub enum CalendarResponse {
    Table(SlotTable),
    All(WeekCalendar),
}

/// GET /calendar?weekKey= - Fetch one week's table (or all weeks)
async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    match query.week_key {
        Some(week_key) => {
            week::parse_week_key(&week_key)?;
            let table = state.calendar.table(&week_key).await?;
            Ok(Json(CalendarResponse::Table(table)))
        }
        None => Ok(Json(CalendarResponse::All(
            state.calendar.all_tables().await?,
        ))),
    }
}

/// Request body replacing one week's table
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceWeekRequest {
    pub week_key: Option<String>,
    pub data: Option<SlotTable>,
}

/// POST /calendar - Replace one week's table wholesale
async fn replace_week(
    State(state): State<AppState>,
    Json(req): Json<ReplaceWeekRequest>,
) -> Result<Json<Ack>, AppError> {
    let week_key = required(req.week_key, "weekKey")?;
    week::parse_week_key(&week_key)?;

    let mut data = req
        .data
        .ok_or_else(|| WeekmeetError::Validation("Missing required field: data".into()))?;

    for key in data.keys() {
        SlotCoord::parse_key(key)?;
    }
    // Slot keys never store empty participant lists
    data.retain(|_, entries| !entries.is_empty());

    state.calendar.put_table(&week_key, data).await?;
    tracing::info!(%week_key, "week replaced");

    Ok(Json(Ack::ok()))
}

/// Request body marking or clearing one cell
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    pub week_key: Option<String>,
    pub day: Option<i64>,
    pub time_index: Option<i64>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub color: Option<String>,
    pub is_selected: Option<bool>,
}

/// PUT /calendar - Mark or clear one cell for one participant
async fn update_slot(
    State(state): State<AppState>,
    Json(req): Json<UpdateSlotRequest>,
) -> Result<Json<Ack>, AppError> {
    let week_key = required(req.week_key, "weekKey")?;
    week::parse_week_key(&week_key)?;

    let day = required_index(req.day, "day")?;
    let time_index = required_index(req.time_index, "timeIndex")?;
    let coord = SlotCoord::new(day, time_index)?;

    let user_id = required(req.user_id, "userId")?;
    let is_selected = req.is_selected.ok_or_else(|| {
        WeekmeetError::Validation("Missing required field: isSelected".into())
    })?;

    if is_selected {
        let entry = SlotEntry {
            user_id,
            user_name: required(req.user_name, "userName")?,
            color: required(req.color, "color")?,
        };
        state.calendar.upsert_slot(&week_key, coord, entry).await?;
    } else {
        state
            .calendar
            .remove_slot(&week_key, coord, &user_id)
            .await?;
    }
    tracing::debug!(%week_key, day, time_index, is_selected, "slot updated");

    Ok(Json(Ack::ok()))
}

fn required_index(field: Option<i64>, name: &str) -> Result<u8, WeekmeetError> {
    let value = field
        .ok_or_else(|| WeekmeetError::Validation(format!("Missing required field: {name}")))?;

    u8::try_from(value)
        .map_err(|_| WeekmeetError::Validation(format!("Field {name} is out of range: {value}")))
}
