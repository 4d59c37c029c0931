//! Verify request construction against the vectors in `test-vectors/`.
//!
//! Each case names an operation, its input, and the exact query pairs the
//! request must carry, in order. Decoded pairs are compared rather than raw
//! URLs so escaping differences do not produce false negatives.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use todoist_core::{
    HttpRequest, HttpResponse, ItemFields, Offset, TodoistClient, Transport, TransportFailure,
};
use url::Url;

/// Records each request and answers `"ok"`.
#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(HttpResponse::ok(r#""ok""#))
    }
}

fn ids(input: &Value) -> Vec<u64> {
    serde_json::from_value(input["ids"].clone()).unwrap()
}

fn project_id(input: &Value) -> u64 {
    input["project_id"].as_u64().unwrap()
}

fn run(client: &TodoistClient, operation: &str, input: &Value) {
    let result = match operation {
        "getProjects" => client.get_projects(),
        "getProject" => client.get_project(project_id(input)),
        "getCompletedItems" => {
            let offset: Option<Offset> = serde_json::from_value(input["offset"].clone()).unwrap();
            client.get_completed_items(project_id(input), offset)
        }
        "getItemsById" => client.get_items_by_id(&ids(input)),
        "query" => {
            let queries: Vec<String> = serde_json::from_value(input["queries"].clone()).unwrap();
            client.query(queries.as_slice())
        }
        "addItem" => {
            let item: ItemFields = serde_json::from_value(input["item"].clone()).unwrap();
            client.add_item(project_id(input), &item)
        }
        "updateItem" => {
            let id = input["id"].as_u64().unwrap();
            match &input["item"] {
                Value::String(content) => client.update_item(id, content.as_str()),
                fields => {
                    let item: ItemFields = serde_json::from_value(fields.clone()).unwrap();
                    client.update_item(id, item)
                }
            }
        }
        "completeItems" => client.complete_items(&ids(input)),
        "deleteItems" => client.delete_items(project_id(input), &ids(input)),
        other => panic!("unknown operation: {other}"),
    };
    result.unwrap();
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let token = vectors["token"].as_str().unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();

        let recorder = Arc::new(Recorder::default());
        let client = TodoistClient::new(token, recorder.clone()).unwrap();
        run(&client, operation, &case["input"]);

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "{name}: exactly one request");
        let request = &requests[0];
        assert_eq!(request.method, operation, "{name}: method");

        let url = Url::parse(&request.url).unwrap();
        assert_eq!(
            url.as_str().split('?').next().unwrap(),
            format!("{base_url}{operation}"),
            "{name}: endpoint"
        );

        let actual: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: Vec<(String, String)> =
            serde_json::from_value(case["expected_params"].clone()).unwrap();
        assert_eq!(actual, expected, "{name}: params");
    }
}
