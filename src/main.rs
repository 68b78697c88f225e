use hostel_client::framework::EntityStore;
use hostel_client::lifecycle::{setup_tracing, HostelSystem};
use hostel_client::model::Credentials;
use std::path::PathBuf;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hostel.toml"));

    let system = HostelSystem::load(&config_path).map_err(|e| e.to_string())?;

    if let (Some(username), Some(password)) = (args.next(), args.next()) {
        let span = tracing::info_span!("sign_in");
        let signed_in = system
            .auth
            .login(&Credentials::new(username, password))
            .instrument(span)
            .await;
        if !signed_in {
            for e in system.auth.errors() {
                error!(error = %e, "Sign-in failed");
            }
            return Err("sign-in failed".to_string());
        }
    }

    let span = tracing::info_span!("overview");
    async {
        system.hotels.fetch_hotels().await;
        system.reservations.fetch_reservations().await;
    }
    .instrument(span)
    .await;

    for e in system.hotels.errors().iter().chain(system.reservations.errors().iter()) {
        error!(error = %e, "Request failed");
    }

    for hotel in system.hotels.hotels() {
        info!(id = ?hotel.id, name = %hotel.name, address = %hotel.address, "Hotel");
    }
    info!(
        hotels = system.hotels.hotels().len(),
        reservations = system.reservations.reservations().len(),
        authenticated = system.auth.is_authenticated(),
        "Done"
    );
    Ok(())
}
