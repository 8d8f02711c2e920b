use planer_client::auth;
use planer_client::client::Client;
use planer_client::Provider;
use planer_client::Session;

/// Logs in with the credentials from `PLANER_EMAIL`/`PLANER_PASSWORD`,
/// fetches every note and prints the resulting task store.
#[tokio::main]
async fn main() {
    env_logger::init();

    let email = std::env::var("PLANER_EMAIL").expect("PLANER_EMAIL is not set");
    let password = std::env::var("PLANER_PASSWORD").expect("PLANER_PASSWORD is not set");

    let session_file = Session::session_file();
    let session = match Session::from_file(&session_file) {
        Ok(session) => session,
        Err(_) => auth::login(&planer_client::config::base_url(), &session_file, &email, &password)
            .await
            .unwrap(),
    };
    println!("Logged in as {}", session.user_email());

    let client = Client::from_session(&session).unwrap();
    let mut provider = Provider::new(client);
    let fetched = provider.fetch_tasks(None).await.unwrap();
    println!("Fetched {} new task(s)", fetched);

    planer_client::utils::print_task_store(provider.store());
}
