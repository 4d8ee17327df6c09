//! Builders for the HTTP state from the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::info;

use exercise_tracker::domain::ports::{ExerciseRepository, UserRepository};
use exercise_tracker::domain::{ExerciseLogService, UserDirectoryService};
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use exercise_tracker::outbound::persistence::{
    DbPool, DieselExerciseRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire services over a shared pair of repositories.
///
/// The directory and the logbook must see the same user store so exercises
/// can be attached to users registered through the directory.
fn wire<U, E>(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    HttpState::new(
        Arc::new(UserDirectoryService::new(Arc::clone(&users))),
        Arc::new(ExerciseLogService::new(users, exercises, clock)),
    )
}

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    wire(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselExerciseRepository::new(pool.clone())),
        clock,
    )
}

fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    wire(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryExerciseRepository::new()),
        clock,
    )
}

/// Build HTTP state using PostgreSQL when a pool is configured, otherwise
/// in-process storage that lives as long as the server.
pub(super) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "storage backend selected");
            diesel_state(pool, clock)
        }
        None => {
            info!(storage = "memory", "storage backend selected");
            in_memory_state(clock)
        }
    };
    web::Data::new(state)
}
