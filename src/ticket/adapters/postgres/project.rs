//! `PostgreSQL` repository implementation for projects.

use super::{
    blocking::{PersistenceFailure, TicketPgPool, with_connection},
    models::ProjectRow,
    schema::projects,
};
use crate::ticket::{
    domain::{
        PersistedProjectData, Project, ProjectId, ProjectName, ProjectStatus, SupportHourLimit,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: TicketPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TicketPgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for ProjectRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_row(project)?;

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        with_connection(&self.pool, move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }
}

fn to_row(project: &Project) -> ProjectRepositoryResult<ProjectRow> {
    let support_limit_seconds = project
        .support_limit()
        .map(|limit| i64::try_from(limit.as_seconds()))
        .transpose()
        .map_err(ProjectRepositoryError::persistence)?;

    Ok(ProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        status: project.status().as_str().to_owned(),
        support_limit_seconds,
        created_at: project.created_at(),
    })
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let support_limit = row
        .support_limit_seconds
        .map(u64::try_from)
        .transpose()
        .map_err(ProjectRepositoryError::persistence)?
        .map(SupportHourLimit::from_seconds);

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: ProjectName::new(row.name).map_err(ProjectRepositoryError::persistence)?,
        status: ProjectStatus::try_from(row.status.as_str())
            .map_err(ProjectRepositoryError::persistence)?,
        support_limit,
        created_at: row.created_at,
    }))
}
