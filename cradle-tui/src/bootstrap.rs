use cradle_client::CradleClient;

use crate::app::App;

/// Initial population of both tables. Failures are warnings: the app still
/// opens and the user can retry with a refresh.
pub async fn initialize_app_state(app: &mut App, client: &CradleClient) {
    app.is_loading = true;

    match client.list_feedings().await {
        Ok(entries) => app.replace_feedings(entries),
        Err(e) => eprintln!("Warning: Could not load feedings: {}", e),
    }

    match client.list_sleep().await {
        Ok(entries) => app.replace_sleeps(entries),
        Err(e) => eprintln!("Warning: Could not load sleep entries: {}", e),
    }

    app.is_loading = false;
}
