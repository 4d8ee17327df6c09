//! Shared fixtures for unit tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{ExerciseLogService, UserDirectoryService};
use crate::inbound::http::{configure, cors_headers};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub(crate) fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Midday on 2024-03-15 UTC.
pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::at(
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    ))
}

/// HTTP state wired to fresh in-memory repositories.
pub(crate) fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let exercises = Arc::new(InMemoryExerciseRepository::new());
    HttpState::new(
        Arc::new(UserDirectoryService::new(Arc::clone(&users))),
        Arc::new(ExerciseLogService::new(users, exercises, clock)),
    )
}

/// Application with the full route table and middleware stack over `state`.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(cors_headers())
        .wrap(crate::Trace)
        .configure(configure)
}
