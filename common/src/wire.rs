//! JSON request/response bodies shared between the generator's handlers
//! and its integration tests. The mixer's authenticated endpoints carry raw
//! binary bodies and are not represented here (see `spec.md` §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_sources: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<u32>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            n_sources: None,
            required: None,
        }
    }

    pub fn seeding(n_sources: u32, required: u32) -> Self {
        Self {
            status: "seeding",
            n_sources: Some(n_sources),
            required: Some(required),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DrawNumbersRequest {
    pub ranges: Vec<[i64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct DrawNumbersResponse {
    pub status: &'static str,
    pub drawn_numbers: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SymbolSpec {
    pub name: String,
    pub weight: i64,
}

fn default_num_draws() -> u32 {
    15
}

#[derive(Debug, Deserialize)]
pub struct DrawSymbolsRequest {
    pub symbols: Vec<SymbolSpec>,
    #[serde(default = "default_num_draws")]
    pub num_draws: u32,
}

#[derive(Debug, Serialize)]
pub struct DrawSymbolsResponse {
    pub status: &'static str,
    pub drawn_symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub game: &'static str,
    pub drawn_numbers: Vec<u32>,
    pub status: &'static str,
}
