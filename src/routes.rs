use crate::{
    routes::students::{
        delete_student, get_student, get_students, get_students_view, post_student, put_student,
    },
    state::RosterState,
};
use axum::{Router, routing::get};

pub mod students;

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/api/students", get(get_students).post(post_student))
        .route("/api/students/view", get(get_students_view))
        .route(
            "/api/students/{id}",
            get(get_student).put(put_student).delete(delete_student),
        )
        .with_state(state)
}
