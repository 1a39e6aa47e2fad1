use crate::{
    data::student::{Student, StudentDto},
    error::RosterResult,
    maud_conveniences::render_table,
    state::RosterState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use maud::{Markup, html};

pub async fn get_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<StudentDto>>> {
    let students = state.students().find_all().await?;
    Ok(Json(students.into_iter().map(StudentDto::from).collect()))
}

pub async fn get_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<Json<StudentDto>> {
    let student = state.students().find_by_id(id).await?;
    Ok(Json(student.into()))
}

pub async fn post_student(
    State(state): State<RosterState>,
    Json(dto): Json<StudentDto>,
) -> RosterResult<Json<StudentDto>> {
    dto.validate()?;

    // ids are always assigned by storage on create
    let student = Student {
        id: None,
        ..Student::from(dto)
    };
    let saved = state.students().save(student).await?;
    info!(id = ?saved.id, "Created student");

    Ok(Json(saved.into()))
}

pub async fn put_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
    Json(dto): Json<StudentDto>,
) -> RosterResult<Json<StudentDto>> {
    dto.validate()?;

    let student = Student {
        id: Some(id),
        ..Student::from(dto)
    };
    let saved = state.students().save(student).await?;
    info!(id, "Saved student");

    Ok(Json(saved.into()))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<()> {
    state.students().delete(id).await?;
    info!(id, "Deleted student");
    Ok(())
}

pub async fn get_students_view(State(state): State<RosterState>) -> RosterResult<Markup> {
    let rows = state
        .students()
        .find_all()
        .await?
        .into_iter()
        .map(|student| {
            [
                html! {
                    @if let Some(id) = student.id {
                        (id)
                    }
                },
                html! {(student.name)},
                html! {
                    @if let Some(major) = student.major {
                        (major)
                    } @else {
                        span class="italic" {"-"}
                    }
                },
                html! {(student.age)},
            ]
        })
        .collect();

    Ok(state.render(
        "Students",
        html! {
            div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full" {
                (render_table(
                    "Student List",
                    ["ID", "Name", "Major", "Age"],
                    rows,
                    "No students yet",
                ))
            }
        },
    ))
}
