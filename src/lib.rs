//! Tea-leaf disease diagnosis: locate a trained classifier, preprocess a
//! photograph to the model's input contract, run inference and turn the
//! class probabilities into a ranked, treatment-annotated report.

pub mod cli;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod label_table;
pub mod library;
pub mod model;
pub mod model_locator;
pub mod preprocess;
pub mod result_formatter;
