//! Mock subgraph and image endpoints

use blitnaut_dl::{Config, ImageConfig, SubgraphConfig};
use serde_json::{Value, json};
use std::path::Path;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GRAPHQL_PATH: &str = "/subgraphs/name/knav-eth/blitnauts";
pub const IMAGE_PATH: &str = "/api/v1/img";

pub fn blitnaut_json(numeric_id: i64) -> Value {
    json!({
        "id": format!("0x{:x}", numeric_id),
        "numericId": numeric_id,
        "owner": "0x00000000000000000000000000000000000000bb",
        "name": format!("Blitnaut #{}", numeric_id),
        "frameId": 1,
        "base": "astronaut",
        "edition": "genesis",
        "blitmapId": numeric_id,
        "colorIds": [0, 1],
        "colors": ["#101010", "#f0f0f0"],
        "backgroundColorId": 0,
        "backgroundColor": "#101010"
    })
}

pub fn list_body(ids: &[i64]) -> Value {
    let blitnauts: Vec<Value> = ids.iter().copied().map(blitnaut_json).collect();
    json!({ "data": { "blitnauts": blitnauts } })
}

pub fn image_bytes(id: i64) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    bytes.extend(format!("blitnaut-{id}").into_bytes());
    bytes
}

/// Config pointing both endpoints at `server` and images into `output_dir`
pub fn config_for(server: &MockServer, output_dir: &Path) -> Config {
    Config {
        subgraph: SubgraphConfig {
            url: format!("{}{}", server.uri(), GRAPHQL_PATH),
            ..Default::default()
        },
        images: ImageConfig {
            base_url: format!("{}{}", server.uri(), IMAGE_PATH),
            output_dir: output_dir.to_path_buf(),
        },
    }
}

/// Serve `ids` as a single page at skip 0 and an empty page at skip 1000
pub async fn mount_collection(server: &MockServer, ids: &[i64]) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "skip": 0 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(ids)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "skip": 1000 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[])))
        .mount(server)
        .await;
}

pub async fn mount_image(server: &MockServer, id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}", IMAGE_PATH, id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes(id)))
        .mount(server)
        .await;
}

/// Number of image GETs the server has seen
pub async fn image_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(IMAGE_PATH))
        .count()
}
