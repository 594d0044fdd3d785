//! Shared fixtures for integration tests.
//!
//! [`TestCatalog`] writes a small video table into a temporary directory and
//! builds an [`AppContext`] reading it, the same way the server does.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use http_body_util::BodyExt;
use tempfile::TempDir;

use coursereel::config::Config;
use coursereel::server::{create_router, AppContext};

pub const BASE_URL: &str = "https://videos.example.test/";

/// Key phrases longer than the 200-character preview.
pub fn long_key_phrases() -> String {
    "gradient descent ".repeat(20)
}

pub fn fixture_csv() -> String {
    format!(
        "video,transcription,key_phrases\n\
         Mod01_WhatIsML.mp4,Welcome to the course.,Supervised learning basics\n\
         Mod01 Data Prep.mp4,Cleaning data.,\"Cleaning, splitting and scaling data\"\n\
         Mod02 Gradient Descent.mp4,Optimisation.,{}\n\
         Mod10 Ensembles.mp4,Many models.,Bagging and boosting for SUPERVISED tasks\n\
         Bonus.mp4,Extra.,Extra material\n",
        long_key_phrases()
    )
}

/// A catalog file on disk plus a config pointing at it.
pub struct TestCatalog {
    pub dir: TempDir,
    pub config: Config,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::with_csv(&fixture_csv())
    }

    pub fn with_csv(csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = dir.path().join("videos.csv");
        std::fs::write(&data_file, csv).expect("failed to write fixture csv");

        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.catalog.data_file = data_file;
        config.catalog.storage_base_url = BASE_URL.to_string();

        Self { dir, config }
    }

    /// Config whose data file does not exist.
    pub fn missing_file() -> Self {
        let catalog = Self::new();
        let mut config = catalog.config.clone();
        config.catalog.data_file = catalog.dir.path().join("absent.csv");
        Self {
            dir: catalog.dir,
            config,
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.config.catalog.data_file.clone()
    }

    pub fn context(&self) -> AppContext {
        AppContext::new(self.config.clone())
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.context())
    }

    /// Start an Axum server on a random port and return its address.
    pub async fn serve(&self) -> SocketAddr {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

/// Helper to get response body as bytes
pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Helper to get response body as JSON
pub async fn body_json(body: Body) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}
