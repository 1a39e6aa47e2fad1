use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use serde::Serialize;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Student not found with id {}", id))]
    MissingStudent { id: i64 },
    #[snafu(display("Invalid student: {}", errors.iter().map(|e| format!("{} {}", e.field, e.message)).collect::<Vec<_>>().join(", ")))]
    InvalidStudent { errors: Vec<FieldError> },
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    status: u16,
    error: &'static str,
    errors: &'a [FieldError],
}

impl RosterError {
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { .. } | Self::CommitTransaction { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::InvalidStudent { .. } => BI,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        error!(?self, "Error!");

        match self {
            Self::MissingStudent { .. } => (status_code, self.to_string()).into_response(),
            Self::InvalidStudent { ref errors } => (
                status_code,
                Json(ValidationBody {
                    status: status_code.as_u16(),
                    error: "Bad Request",
                    errors,
                }),
            )
                .into_response(),
            _ => {
                let basic_error = html! {
                    div role="alert" {
                        strong {"Roster Error"}
                        " "
                        span {(self.to_string())}
                    }
                };
                (status_code, Html(basic_error)).into_response()
            }
        }
    }
}
