//! Plugin scopes, prefixes and deferred setup.

use std::time::Duration;

use marci::prelude::*;
use marci::{BuildError, ShutdownSignal, StatusCode};
use marci_test::TestClient;
use serde_json::{json, Value};

async fn users(_ctx: RequestContext) -> MarciResult<Value> {
    Ok(json!([]))
}

#[tokio::test]
async fn prefix_applies_to_plugin_routes_only() {
    let app = App::new();
    app.register(
        |api| {
            api.get("/users", users);
        },
        PluginOptions::prefix("/api"),
    );
    let client = TestClient::new(app.build().await.unwrap());

    client.get("/api/users").send().await.assert_status(StatusCode::OK);
    client.get("/users").send().await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn nested_prefixes_concatenate() {
    let app = App::new();
    app.register(
        |api| {
            api.register(
                |v1| {
                    v1.get("/", users);
                },
                PluginOptions::prefix("/v1/"),
            );
        },
        PluginOptions::prefix("/api"),
    );
    let client = TestClient::new(app.build().await.unwrap());

    client.get("/api/v1").send().await.assert_json(&json!([]));
    client.get("/api").send().await.assert_status(StatusCode::NOT_FOUND);
}

#[derive(Debug, Default)]
struct Auth {
    user: Option<String>,
}

#[tokio::test]
async fn hooks_added_in_a_plugin_are_app_wide() {
    let app = App::<Auth>::new();
    app.register(
        |scope| {
            scope.add_hook(HookPhase::OnRequest, |mut ctx: RequestContext<Auth>| async move {
                ctx.user = Some("test".into());
                Ok(ctx)
            });
        },
        PluginOptions::prefix("/auth"),
    );
    app.get("/me", |ctx: RequestContext<Auth>| async move {
        Ok::<_, MarciError>(json!({ "user": ctx.user }))
    });
    let client = TestClient::new(app.build().await.unwrap());

    client
        .get("/me")
        .send()
        .await
        .assert_json(&json!({ "user": "test" }));
}

#[tokio::test(start_paused = true)]
async fn build_waits_for_deferred_setup() {
    let app = App::new();
    app.register_async(
        |scope| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            scope.get("/late", users);
            Ok(())
        },
        PluginOptions::prefix("/api"),
    );

    let build = tokio::spawn(app.build());

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert!(!build.is_finished());

    let table = build.await.unwrap().unwrap();
    TestClient::new(table)
        .get("/api/late")
        .send()
        .await
        .assert_json(&json!([]));
}

#[tokio::test]
async fn setups_started_while_settling_are_awaited() {
    let app = App::new();
    app.register_async(
        |outer| async move {
            tokio::task::yield_now().await;
            outer.register_async(
                |inner| async move {
                    inner.get("/deep", users);
                    Ok(())
                },
                PluginOptions::prefix("/inner"),
            );
            Ok(())
        },
        PluginOptions::prefix("/outer"),
    );

    let client = TestClient::new(app.build().await.unwrap());
    client
        .get("/outer/inner/deep")
        .send()
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn failing_setup_aborts_build() {
    let app = App::new();
    app.get("/", users);
    app.register_async(
        |_scope| async { Err(anyhow::anyhow!("could not load config")) },
        PluginOptions::default(),
    );

    match app.build().await {
        Err(BuildError::Setup(err)) => assert_eq!(err.to_string(), "could not load config"),
        _ => panic!("expected a setup error"),
    }
}

#[tokio::test]
async fn listen_with_shutdown_stops_cleanly() {
    let app = App::new();
    app.get("/", users);

    let shutdown = ShutdownSignal::new();
    shutdown.trigger();
    let config = ServerConfig::builder().host("127.0.0.1").port(0).build();

    app.listen_with_shutdown(config, shutdown).await.unwrap();
}
