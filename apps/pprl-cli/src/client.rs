// [apps/pprl-cli/src/client.rs]
//! Thin blocking HTTP client over `pprl-service`'s three engine endpoints.
//! Every call is a single synchronous POST: the CLI is a batch tool, not a
//! long-running service, so there is no benefit to an async runtime here.

use std::time::Duration;

use anyhow::Result;
use pprl_model::{EntityMaskRequest, EntityMaskResponse, EntityTransformRequest, EntityTransformResponse, VectorMatchRequest, VectorMatchResponse};
use serde::Deserialize;

use crate::error::CliError;

/// A configured connection to one `pprl-service` instance.
pub struct ServiceClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    detail: String,
}

impl ServiceClient {
    /// Builds a client bound to `base_url` with the given per-request
    /// timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn post<Req: serde::Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &'static str,
        body: &Req,
    ) -> Result<Resp> {
        let response = self.http.post(format!("{}{endpoint}", self.base_url)).json(body).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<Resp>()?)
        } else {
            let detail = response
                .json::<ErrorEnvelope>()
                .map(|e| e.detail)
                .unwrap_or_else(|_| "<unparseable error body>".to_string());
            Err(CliError::ServiceError {
                endpoint,
                status: status.as_u16(),
                detail,
            }
            .into())
        }
    }

    /// `POST /transform`.
    pub fn transform(&self, request: &EntityTransformRequest) -> Result<EntityTransformResponse> {
        self.post("/transform", request)
    }

    /// `POST /mask`.
    pub fn mask(&self, request: &EntityMaskRequest) -> Result<EntityMaskResponse> {
        self.post("/mask", request)
    }

    /// `POST /match`.
    pub fn run_match(&self, request: &VectorMatchRequest) -> Result<VectorMatchResponse> {
        self.post("/match", request)
    }
}
