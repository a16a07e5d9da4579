use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use serde_json::{json, Value};
use site::{app, app_state_with, atlas, AtlasFetch, Datasets};
use std::sync::Arc;

mock! {
    pub AtlasFetcher {}

    #[async_trait]
    impl AtlasFetch for AtlasFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, atlas::Error>;
    }
}

pub struct TestApp {
    pub app: Router,
    pub datasets: Datasets,
}

pub fn spawn_app(fetcher: MockAtlasFetcher) -> TestApp {
    let datasets = Datasets::bundled().expect("bundled datasets parse");
    let app_state = app_state_with("./static".to_owned(), Arc::new(fetcher), datasets.clone());
    TestApp {
        app: app(app_state),
        datasets,
    }
}

pub fn mock_topology() -> Value {
    json!({"type": "Topology", "objects": {}})
}
