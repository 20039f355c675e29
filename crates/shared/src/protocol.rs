use serde::{Deserialize, Serialize};

use crate::{domain::Chart, error::ApiError};

pub const CHARTS_PATH: &str = "/api/charts";
pub const CALCULATE_CHART_PATH: &str = "/api/charts/calculate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateChartRequest {
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
}

/// One entry of a server-side validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            msg: Some(msg.into()),
            message: None,
            param: Some(param.into()),
        }
    }

    pub fn text(&self) -> &str {
        self.msg
            .as_deref()
            .filter(|msg| !msg.is_empty())
            .or(self.message.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartListEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Chart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ChartListEnvelope {
    pub fn into_result(self) -> Result<ChartPage, ApiError> {
        if !self.success {
            return Err(ApiError::from_envelope(self.error, self.errors));
        }
        let Some(charts) = self.data else {
            return Err(ApiError::missing_data());
        };
        Ok(ChartPage {
            count: self.count.unwrap_or(charts.len() as u64),
            charts,
            total: self.total,
            page: self.page,
            pages: self.pages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Chart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ChartEnvelope {
    pub fn into_result(self) -> Result<Chart, ApiError> {
        if !self.success {
            return Err(ApiError::from_envelope(self.error, self.errors));
        }
        self.data.ok_or_else(ApiError::missing_data)
    }
}

/// A list payload together with its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPage {
    pub charts: Vec<Chart>,
    pub count: u64,
    pub total: Option<u64>,
    pub page: Option<u64>,
    pub pages: Option<u64>,
}

impl ChartPage {
    pub fn new(charts: Vec<Chart>) -> Self {
        Self {
            count: charts.len() as u64,
            charts,
            total: None,
            page: None,
            pages: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
