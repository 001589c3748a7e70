use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::AppError;

// ============ Student ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            other => Err(AppError::BadRequest(format!("Unknown gender '{}'", other))),
        }
    }
}

/// A registered student.
///
/// `joke` and `booking_id` stay `None` until the student has been enriched
/// by the booking and joke services at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Generated on first save.
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub joke: Option<String>,
    pub booking_id: Option<i32>,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            gender,
            joke: None,
            booking_id: None,
        }
    }
}

/// Request body for `POST /api/v1/students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Basic email shape check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }
    EMAIL_REGEX.is_match(email)
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Student name is required".to_string()));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(AppError::BadRequest(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

impl From<NewStudent> for Student {
    fn from(new: NewStudent) -> Self {
        Student::new(new.name.trim(), new.email.trim(), new.gender)
    }
}

/// Row shape of the `students` table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub joke: Option<String>,
    pub booking_id: Option<i32>,
}

impl TryFrom<StudentRow> for Student {
    type Error = AppError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let gender = row.gender.parse::<Gender>().map_err(|_| {
            AppError::InternalError(format!(
                "Student {} has unknown gender '{}' in storage",
                row.id, row.gender
            ))
        })?;

        Ok(Student {
            id: Some(row.id),
            name: row.name,
            email: row.email,
            gender,
            joke: row.joke,
            booking_id: row.booking_id,
        })
    }
}

// ============ Joke API ============

/// Payload of the joke API. Only `value` is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeResponse {
    pub value: String,
}

// ============ Booking API ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// Booking record sent to the booking API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    pub additionalneeds: String,
}

impl BookingRequest {
    /// Builds the booking request sent when a student registers.
    /// Only the first name carries meaning; the rest are neutral defaults.
    pub fn for_student(name: &str, date: NaiveDate) -> Self {
        Self {
            firstname: name.to_string(),
            lastname: String::new(),
            totalprice: 0,
            depositpaid: false,
            bookingdates: BookingDates {
                checkin: date,
                checkout: date,
            },
            additionalneeds: String::new(),
        }
    }
}

/// Booking record echoed back by the booking API.
///
/// Only `firstname` is required; the remaining fields may be missing or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRecord {
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub totalprice: Option<i64>,
    #[serde(default)]
    pub depositpaid: Option<bool>,
    #[serde(default)]
    pub bookingdates: Option<BookedDates>,
    #[serde(default)]
    pub additionalneeds: Option<String>,
}

/// Dates as echoed back; kept as raw strings since they are not consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedDates {
    #[serde(default)]
    pub checkin: Option<String>,
    #[serde(default)]
    pub checkout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    #[serde(rename = "bookingid")]
    pub booking_id: i32,
    pub booking: BookedRecord,
}
