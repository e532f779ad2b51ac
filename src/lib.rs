//! # SkillRadar
//!
//! Weekly technology-trend reports tailored to one reader.
//!
//! Articles are collected from Hacker News, Reddit and NewsAPI, tagged
//! against a fixed technology vocabulary, and turned into a [`TrendReport`]:
//! the week's top trends, a personalised must-read list, learning
//! recommendations and keyword frequencies. Prose comes from an
//! OpenAI-compatible LLM through `awful_aj` and falls back to deterministic
//! text whenever the model is unavailable, slow or failing.
//!
//! [`TrendReport`]: models::TrendReport

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod generate;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod translate;
pub mod utils;
