//! The users plugin.

use marci::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Caller fields filled in by [`use_auth`].
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    /// Authenticated user name.
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserParams {
    #[serde(rename = "userId")]
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
}

#[derive(Debug, Serialize)]
struct User {
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Marks every request as coming from the `test` user.
pub async fn use_auth(mut ctx: RequestContext<AuthContext>) -> MarciResult<RequestContext<AuthContext>> {
    ctx.user = Some("test".to_owned());
    Ok(ctx)
}

async fn status(_ctx: RequestContext<AuthContext>) -> MarciResult<Value> {
    Ok(json!({ "status": "up" }))
}

async fn list_users(_ctx: RequestContext<AuthContext>) -> MarciResult<Value> {
    Ok(json!([]))
}

async fn get_user(ctx: RequestContext<AuthContext>) -> MarciResult<Json<User>> {
    let UserParams { user_id } = ctx.params_as()?;
    Ok(Json(User {
        id: user_id,
        name: None,
    }))
}

async fn create_user(ctx: RequestContext<AuthContext>) -> MarciResult<Json<User>> {
    let UserParams { user_id } = ctx.params_as()?;
    let NewUser { name } = ctx.body_as()?;
    tracing::info!(user = ?ctx.user, user_id, "creating user");
    Ok(Json(User {
        id: user_id,
        name: Some(name),
    }))
}

/// Registers the auth hook and the users routes.
pub fn routes(scope: &Scope<AuthContext>) {
    let user_params = schema(json!({ "userId": "integer" }));
    let new_user = schema(json!({ "name": { "type": "string" } }));

    scope
        .add_hook(HookPhase::OnRequest, use_auth)
        .get("/", status)
        .get("/users", list_users)
        .route_with_schemas(Method::GET, "/users/:userId", [user_params.clone()], get_user)
        .route_with_schemas(Method::POST, "/users/:userId", [user_params, new_user], create_user);
}
