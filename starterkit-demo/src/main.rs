mod component;

use std::fs::File;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};
use starterkit::prelude::*;

/// Stand-in for the backend's token endpoint.
struct LocalRefresher;

#[async_trait]
impl TokenRefresher for LocalRefresher {
    async fn refresh(&self, token: &UserToken) -> Result<UserToken, AuthError> {
        Ok(UserToken::new(format!("{}.renewed", token.access_token), token.user.clone()))
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("starterkit-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let starter = Starter::new(
        StarterConfig::default().with_default_locale("en"),
        Arc::new(MemoryStorage::new()),
    );
    starter
        .locales
        .add_locale(
            "en",
            "English",
            json!({ "confirm": { "title": "Are you sure?" }, "saved": "Saved" }),
            json!({ "confirm": { "delete": "Delete this project?" } }),
        )
        .add_locale(
            "fr",
            "Français",
            json!({ "confirm": { "title": "Êtes-vous sûr ?" }, "saved": "Enregistré" }),
            json!({ "confirm": { "delete": "Supprimer ce projet ?" } }),
        );

    // Open before the component mounts; the registry reconciles the order.
    let reply = starter.modals.open::<bool>(
        "confirm",
        ConfirmOptions::new(starter.locales.translate("confirm.delete"))
            .title(starter.locales.translate("confirm.title"))
            .color(ConfirmColor::Error)
            .into(),
    );
    let component = component::mount(starter.modals.clone(), "confirm", true);

    match reply.await {
        Some(true) => starter.toasts.success(starter.locales.translate("saved")),
        Some(false) => starter.toasts.info("Cancelled"),
        None => starter.toasts.warning("Dismissed"),
    }
    if let Err(e) = component.await {
        eprintln!("Error: {}", e);
    }

    println!("{}", describe(&starter.guard_route(RouteAuth::Required, "/projects")));

    let user = UserInfo {
        id: 1,
        email: "demo@example.com".into(),
        first_name: "Demo".into(),
        last_name: "User".into(),
        is_admin: false,
    };
    if let Err(e) = starter.session.save_user_token(UserToken::new("demo-token", user)) {
        starter.toasts.error(e.to_string());
    }
    if let Err(e) = starter.session.refresh(&LocalRefresher).await {
        starter.toasts.error(e.to_string());
    }

    println!("{}", describe(&starter.guard_route(RouteAuth::Required, "/projects")));
    println!("{}", describe(&starter.guard_admin()));
    println!("session: {:?}", starter.session.bearer());

    starter.locales.set_locale("fr");
    println!("{}", starter.locales.translate("confirm.title"));

    for toast in starter.toasts.drain() {
        println!("[{:?}] {}", toast.level, toast.message);
    }
}

fn describe(outcome: &GuardOutcome) -> String {
    match outcome {
        GuardOutcome::Allow => "allowed".to_string(),
        GuardOutcome::Redirect { path, redirect: Some(back) } => format!("redirect to {path} (then {back})"),
        GuardOutcome::Redirect { path, redirect: None } => format!("redirect to {path}"),
    }
}
