use crate::{
    config::RuntimeConfiguration,
    data::{StudentStore, postgres::PgStudentStore},
    error::{MigrateSnafu, OpenDatabaseSnafu, RosterResult},
    service::StudentService,
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RosterState {
    students: StudentService,
}

impl RosterState {
    pub async fn new(options: PgPoolOptions, config: RuntimeConfiguration) -> RosterResult<Self> {
        let pool = options
            .connect(&config.db_config().get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::with_store(Arc::new(PgStudentStore::new(pool))))
    }

    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self {
            students: StudentService::new(store),
        }
    }

    pub const fn students(&self) -> &StudentService {
        &self.students
    }

    /// Wraps `markup` in a full page titled `title`, with a link back to the JSON listing.
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn render(&self, title: &str, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { (title) " | Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    header class="mb-6 text-gray-300" {
                        "Roster: " (title) " ("
                        a class="hover:text-blue-300 underline" href="/api/students" {"JSON"}
                        ")"
                    }
                    (markup)
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        self.students.close().await;
    }
}
