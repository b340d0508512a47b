use serde::Serialize;

#[derive(Serialize)]
pub struct SimulationResults {
    pub total_attempted: i64,
    pub success_count: i64,
    pub waitlisted_count: i64,
    pub failed_count: i64,
    pub final_seats_remaining: i64,
}

#[derive(Serialize)]
pub struct SimulationResponse {
    pub simulation_results: SimulationResults,
}
