use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::SimulateParams;
use crate::api::dtos::responses::{SimulationResponse, SimulationResults};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::registration::BookingOutcome;
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

/// Fires N concurrent booking attempts at one event and reports how they
/// settled. The simulation is just another caller of the booking engine; it
/// gets no special access to seat counts.
pub async fn simulate_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
    Query(params): Query<SimulateParams>,
) -> Result<impl IntoResponse, AppError> {
    user.require(&[Role::Admin])?;

    if params.users <= 0 {
        return Err(AppError::Validation("invalid parameter: users".into()));
    }

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    // Throwaway audience users so each attempt carries a distinct identity.
    // The batch tag keeps emails unique across repeated runs.
    let sim_batch = Uuid::new_v4().to_string()[..8].to_string();
    let mut user_ids = Vec::with_capacity(params.users as usize);

    for i in 0..params.users {
        let sim_user = User::new(
            format!("Sim User {}", i),
            format!("sim{}_{}@sim.local", i, sim_batch),
            "not-a-login".into(),
            Role::Audience,
        );
        let created = state.user_repo.create(&sim_user).await?;
        user_ids.push(created.id);
    }

    info!("Simulating {} concurrent bookings for event {}", params.users, event.id);

    let mut set = JoinSet::new();
    for user_id in user_ids {
        let booking_repo = state.booking_repo.clone();
        let target_event = event.id.clone();
        set.spawn(async move {
            booking_repo.book_event(&user_id, &target_event).await
        });
    }

    let mut success_count = 0i64;
    let mut waitlisted_count = 0i64;
    let mut failed_count = 0i64;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(BookingOutcome::Confirmed(_))) => success_count += 1,
            Ok(Ok(BookingOutcome::Waitlisted(_))) => waitlisted_count += 1,
            Ok(Err(e)) => {
                warn!("Simulated booking failed: {}", e);
                failed_count += 1;
            }
            Err(_) => failed_count += 1,
        }
    }

    let final_event = state.event_repo.find_by_id(&event.id).await?
        .ok_or(AppError::Internal)?;

    Ok(Json(SimulationResponse {
        simulation_results: SimulationResults {
            total_attempted: params.users,
            success_count,
            waitlisted_count,
            failed_count,
            final_seats_remaining: final_event.seats_remaining,
        }
    }))
}
