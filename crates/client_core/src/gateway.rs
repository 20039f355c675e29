use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::{
    domain::Chart,
    error::ApiError,
    protocol::{
        CalculateChartRequest, ChartEnvelope, ChartListEnvelope, ChartPage, CALCULATE_CHART_PATH,
        CHARTS_PATH,
    },
};
use tracing::warn;

use crate::{
    error::GatewayFailure,
    transport::{HttpReply, HttpTransport},
};

/// Success xor failure of one gateway call.
pub type Outcome<T> = Result<T, GatewayFailure>;

/// Chart service calls with every failure normalized into [`GatewayFailure`].
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn HttpTransport>,
}

impl ApiGateway {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_charts(&self) -> Outcome<ChartPage> {
        let reply = self.transport.get(CHARTS_PATH).await?;
        decode_reply(CHARTS_PATH, &reply, ChartListEnvelope::into_result)
    }

    pub async fn calculate_chart(&self, request: &CalculateChartRequest) -> Outcome<Chart> {
        let body = serde_json::to_value(request).map_err(|err| {
            GatewayFailure::transport(format!("failed to encode chart request: {err}"))
        })?;
        let reply = self.transport.post(CALCULATE_CHART_PATH, &body).await?;
        decode_reply(CALCULATE_CHART_PATH, &reply, ChartEnvelope::into_result)
    }
}

fn decode_reply<E, T>(
    path: &str,
    reply: &HttpReply,
    into_result: impl FnOnce(E) -> Result<T, ApiError>,
) -> Outcome<T>
where
    E: DeserializeOwned,
{
    let envelope = serde_json::from_str::<E>(&reply.body);

    if reply.is_success() {
        return match envelope {
            Ok(envelope) => into_result(envelope).map_err(|error| GatewayFailure::Rejected {
                error,
                http_message: None,
            }),
            Err(err) => {
                warn!(path, status = reply.status, "undecodable chart api body: {err}");
                Err(GatewayFailure::transport(format!(
                    "Http failure during parsing for {path}"
                )))
            }
        };
    }

    let http_message = http_failure_message(path, reply.status);
    warn!(path, status = reply.status, "chart api returned an error status");
    match envelope.map(into_result) {
        Ok(Err(error)) => Err(GatewayFailure::Rejected {
            error,
            http_message: Some(http_message),
        }),
        Ok(Ok(_)) | Err(_) => Err(GatewayFailure::transport(http_message)),
    }
}

fn http_failure_message(path: &str, status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Error");
    format!("Http failure response for {path}: {status} {reason}")
}
