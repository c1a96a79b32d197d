use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterParticipantRequest {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub profession: String,
    pub description: String,
    /// Display-only slot descriptor, e.g. "Mon-Fri 9am-5pm".
    pub slots: String,
}

#[derive(Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

#[derive(Deserialize)]
pub struct SelectSlotRequest {
    pub date: NaiveDate,
    pub slot: String,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}
