//! Body Intelligence MCP Server Implementation
//!
//! Exposes the analysis engine as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::AnalysisConfig;
use crate::tools::analysis;
use crate::tools::status::StatusTracker;

/// Body Intelligence MCP Service
#[derive(Clone)]
pub struct BodyIntelligenceService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: AnalysisConfig,
    tool_router: ToolRouter<BodyIntelligenceService>,
}

impl BodyIntelligenceService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            config,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn invalid(message: String) -> McpError {
    McpError::invalid_params(message, None)
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ServingMultiplierParams {
    /// Logged amount, in `unit`
    pub quantity: f64,
    /// serving, g, ml or oz
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Grams per serving of the food; 100 when absent
    pub serving_size_grams: Option<f64>,
}

fn default_unit() -> String { "serving".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyConsumptionParams {
    /// History object with foods and daily_logs
    pub history: serde_json::Value,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RollingWeightParams {
    /// Array of {date, weight_kg}
    pub weigh_ins: serde_json::Value,
    /// Last day of the window, YYYY-MM-DD
    pub date: String,
    pub window_days: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BodyIntelligenceReportParams {
    /// History object: foods, daily_logs, weigh_ins, scans
    pub history: serde_json::Value,
    /// Current date, YYYY-MM-DD
    pub today: String,
    /// Basal metabolic rate in kcal/day
    pub bmr: f64,
    pub period_days: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TdeeCalibrationParams {
    /// History object: foods, daily_logs (with health_metrics), weigh_ins
    pub history: serde_json::Value,
    /// Current date, YYYY-MM-DD
    pub today: String,
    pub period_days: Option<u32>,
    /// Thermic-effect multiplier between 1.0 and 1.25
    pub tef_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyTdeeParams {
    pub resting_energy: f64,
    pub active_energy: f64,
    pub tef_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InterpretStatusParams {
    /// response, quality, metabolic or confidence
    pub kind: String,
    /// Status value as it appears in a report, e.g. insufficient-data
    pub status: String,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl BodyIntelligenceService {
    // --- Status ---

    #[tool(description = "Get the current status of the body intelligence service including build info, analysis defaults, and process information")]
    async fn bodyintel_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get instructions for shaping history JSON and reading analysis results. Call this before the first analysis in a session.")]
    fn engine_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ENGINE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ENGINE_INSTRUCTIONS)]))
    }

    // --- Nutrition ---

    #[tool(description = "Convert a logged quantity and unit into a number of servings")]
    fn serving_multiplier(&self, Parameters(p): Parameters<ServingMultiplierParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::serving_multiplier(p.quantity, &p.unit, p.serving_size_grams).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Total calories and macros eaten on one date, skipping deleted or unknown foods")]
    fn daily_consumption(&self, Parameters(p): Parameters<DailyConsumptionParams>) -> Result<CallToolResult, McpError> {
        let history = analysis::parse_history(p.history).map_err(|e| invalid(e.to_string()))?;
        let result = analysis::daily_consumption(&history, &p.date).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Mean weight over a trailing window ending on a date. Null when fewer than two weigh-ins fall in the window.")]
    fn rolling_weight_average(&self, Parameters(p): Parameters<RollingWeightParams>) -> Result<CallToolResult, McpError> {
        let weigh_ins = analysis::parse_weigh_ins(p.weigh_ins).map_err(|e| invalid(e.to_string()))?;
        let result = analysis::rolling_weight_average(&weigh_ins, &p.date, p.window_days, &self.config).map_err(invalid)?;
        to_json(&result)
    }

    // --- Analysis ---

    #[tool(description = "Full body intelligence report: accumulated deficit, weight response, loss quality, metabolic adaptation and data confidence, with display text for each")]
    fn body_intelligence_report(&self, Parameters(p): Parameters<BodyIntelligenceReportParams>) -> Result<CallToolResult, McpError> {
        let history = analysis::parse_history(p.history).map_err(|e| invalid(e.to_string()))?;
        let result = analysis::body_intelligence_report(&history, &p.today, p.bmr, p.period_days, &self.config)
            .map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Compare wearable-estimated TDEE with TDEE observed from intake and weight trend, and suggest a thermic-effect multiplier")]
    fn tdee_calibration(&self, Parameters(p): Parameters<TdeeCalibrationParams>) -> Result<CallToolResult, McpError> {
        let history = analysis::parse_history(p.history).map_err(|e| invalid(e.to_string()))?;
        let result = analysis::tdee_calibration(&history, &p.today, p.period_days, p.tef_multiplier, &self.config)
            .map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Single-day TDEE from resting and active energy with the thermic-effect multiplier applied")]
    fn daily_tdee(&self, Parameters(p): Parameters<DailyTdeeParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::daily_tdee(p.resting_energy, p.active_energy, p.tef_multiplier, &self.config)
            .map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Get the display label and message for a response, quality, metabolic or confidence status")]
    fn interpret_status(&self, Parameters(p): Parameters<InterpretStatusParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::interpret_status(&p.kind, &p.status).map_err(invalid)?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for BodyIntelligenceService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bodyintel".into(),
                version: crate::tools::status::VERSION.into(),
                title: Some("Body Intelligence Engine".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Body Intelligence Engine - stateless analysis of food, weight and body-composition history. \
                 IMPORTANT: Call engine_instructions first for the history JSON shape. \
                 Always pass the real current date as today. \
                 Analysis: body_intelligence_report, tdee_calibration. \
                 Helpers: daily_consumption, rolling_weight_average, serving_multiplier, daily_tdee, interpret_status. \
                 Status: bodyintel_status."
                    .into(),
            ),
        }
    }
}
