use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub mod store;

pub use store::{Store, INBOX_ID, TEST_EMAIL, TEST_PASSWORD, TEST_TOKEN, TIMEZONES};

pub type Db = Arc<RwLock<Store>>;

type Params = HashMap<String, String>;
type Reply = (StatusCode, Json<Value>);

const UNAUTHENTICATED: &[&str] = &["login", "register", "getTimezones"];

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/API/{method}", get(dispatch))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(
    State(db): State<Db>,
    Path(method): Path<String>,
    Query(params): Query<Params>,
) -> Reply {
    let mut store = db.write().await;
    let (status, body) = handle(&mut store, &method, &params);
    tracing::info!(method = %method, status = status.as_u16(), "handled API call");
    (status, Json(body))
}

/// Answer one API call the way the real endpoint does, sentinel strings included.
pub fn handle(store: &mut Store, method: &str, params: &Params) -> (StatusCode, Value) {
    if !UNAUTHENTICATED.contains(&method) {
        let token = params.get("token").map(String::as_str).unwrap_or_default();
        if store.account_by_token(token).is_none() {
            return (StatusCode::UNAUTHORIZED, json!("Unauthorized"));
        }
    }

    let result = match method {
        "login" => login(store, params),
        "register" => register(store, params),
        "getTimezones" => Ok(json!(TIMEZONES
            .iter()
            .map(|(tz, label)| json!([tz, label]))
            .collect::<Vec<_>>())),
        "getProjects" => Ok(json!(store.projects)),
        "getLabels" => Ok(json!(store.labels)),
        "getProject" => project_id(params).map(|id| match store.project(id) {
            Some(project) => json!(project),
            None => json!("ERROR_PROJECT_NOT_FOUND"),
        }),
        "getUncompletedItems" => project_items(store, params, false),
        "getCompletedItems" => project_items(store, params, true),
        "getItemsById" => id_list(params).map(|ids| {
            json!(store
                .items
                .iter()
                .filter(|i| ids.contains(&i.id))
                .collect::<Vec<_>>())
        }),
        "query" => search(store, params),
        "addItem" => add_item(store, params),
        "updateItem" => update_item(store, params),
        "completeItems" => id_list(params).map(|ids| {
            for item in store.items.iter_mut().filter(|i| ids.contains(&i.id)) {
                item.checked = true;
            }
            json!("ok")
        }),
        "deleteItems" => project_id(params).and_then(|project| {
            let ids = id_list(params)?;
            store
                .items
                .retain(|i| !(i.project_id == project && ids.contains(&i.id)));
            Ok(json!("ok"))
        }),
        _ => return (StatusCode::NOT_FOUND, json!("Unknown method")),
    };

    match result {
        Ok(body) => (StatusCode::OK, body),
        Err(message) => (StatusCode::BAD_REQUEST, json!(message)),
    }
}

fn required<'a>(params: &'a Params, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| format!("missing parameter: {key}"))
}

fn number(params: &Params, key: &str) -> Result<u64, String> {
    required(params, key)?
        .parse()
        .map_err(|_| format!("invalid parameter: {key}"))
}

fn project_id(params: &Params) -> Result<u64, String> {
    number(params, "project_id")
}

fn id_list(params: &Params) -> Result<Vec<u64>, String> {
    serde_json::from_str(required(params, "ids")?).map_err(|_| "invalid parameter: ids".to_string())
}

fn login(store: &Store, params: &Params) -> Result<Value, String> {
    let email = required(params, "email")?;
    let password = required(params, "password")?;
    Ok(store
        .accounts
        .iter()
        .find(|a| a.email == email && a.password == password)
        .map(|a| json!(a))
        .unwrap_or_else(|| json!("LOGIN_ERROR")))
}

fn register(store: &mut Store, params: &Params) -> Result<Value, String> {
    let email = required(params, "email")?;
    let full_name = required(params, "full_name")?;
    let password = required(params, "password")?;
    let timezone = required(params, "timezone")?;

    let sentinel = if store.accounts.iter().any(|a| a.email == email) {
        Some("ALREADY_REGISTERED")
    } else if password.len() < 5 {
        Some("TOO_SHORT_PASSWORD")
    } else if !email.contains('@') {
        Some("INVALID_EMAIL")
    } else if !TIMEZONES.iter().any(|(tz, _)| *tz == timezone) {
        Some("INVALID_TIMEZONE")
    } else if full_name.trim().is_empty() {
        Some("INVALID_FULL_NAME")
    } else {
        None
    };

    Ok(match sentinel {
        Some(sentinel) => json!(sentinel),
        None => json!(store.register(email, full_name, password, timezone)),
    })
}

fn project_items(store: &Store, params: &Params, checked: bool) -> Result<Value, String> {
    let project = project_id(params)?;
    if store.project(project).is_none() {
        return Ok(json!("ERROR_PROJECT_NOT_FOUND"));
    }
    let offset = match params.get("offset") {
        Some(raw) => raw.parse().map_err(|_| "invalid parameter: offset".to_string())?,
        None => 0,
    };
    Ok(json!(store
        .items
        .iter()
        .filter(|i| i.project_id == project && i.checked == checked)
        .skip(offset)
        .collect::<Vec<_>>()))
}

fn search(store: &Store, params: &Params) -> Result<Value, String> {
    let queries: Vec<String> = serde_json::from_str(required(params, "queries")?)
        .map_err(|_| "invalid parameter: queries".to_string())?;
    Ok(json!(queries
        .iter()
        .map(|query| {
            let needle = query.to_lowercase();
            let data: Vec<_> = store
                .items
                .iter()
                .filter(|i| !i.checked && i.content.to_lowercase().contains(&needle))
                .collect();
            json!({"query": query, "type": "search", "data": data})
        })
        .collect::<Vec<_>>()))
}

fn priority(params: &Params) -> Result<Option<i64>, String> {
    params
        .get("priority")
        .map(|raw| match raw.parse::<i64>() {
            Ok(p) if (1..=4).contains(&p) => Ok(p),
            _ => Err("invalid parameter: priority".to_string()),
        })
        .transpose()
}

fn add_item(store: &mut Store, params: &Params) -> Result<Value, String> {
    let project = project_id(params)?;
    let content = required(params, "content")?.to_string();
    let priority = priority(params)?.unwrap_or(1);
    if store.project(project).is_none() {
        return Ok(json!("ERROR_PROJECT_NOT_FOUND"));
    }
    let item = store::Item {
        id: store.next_id(),
        project_id: project,
        content,
        date_string: params.get("date_string").cloned(),
        priority,
        checked: false,
    };
    store.items.push(item.clone());
    Ok(json!(item))
}

fn update_item(store: &mut Store, params: &Params) -> Result<Value, String> {
    let id = number(params, "id")?;
    let priority = priority(params)?;
    let Some(item) = store.item_mut(id) else {
        return Ok(json!("ERROR_ITEM_NOT_FOUND"));
    };
    if let Some(content) = params.get("content") {
        item.content = content.clone();
    }
    if let Some(date_string) = params.get("date_string") {
        item.date_string = Some(date_string.clone());
    }
    if let Some(priority) = priority {
        item.priority = priority;
    }
    Ok(json!(item))
}
