pub mod api;
pub mod config;
pub mod naming;
pub mod poller;
pub mod render;
pub mod routes;
pub mod state;

use crate::state::AppState;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use std::sync::Arc;

/// Assemble the service. Polling starts on liftoff and stops on shutdown.
pub fn build(app_state: Arc<AppState>) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes::dashboard::routes())
        .mount("/", routes::force_charge::routes())
        .manage(app_state)
        .attach(AdHoc::on_liftoff("Start polling", |rocket| {
            Box::pin(async move {
                if let Some(state) = rocket.state::<Arc<AppState>>() {
                    state.start_polling().await;
                }
            })
        }))
        .attach(AdHoc::on_shutdown("Stop polling", |rocket| {
            Box::pin(async move {
                if let Some(state) = rocket.state::<Arc<AppState>>() {
                    state.stop_polling().await;
                }
            })
        }))
}
