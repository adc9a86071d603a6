//! Discovery pipeline: conversion, orchestration and aggregation.

pub mod aggregate;
pub mod convert;
pub mod orchestrator;

pub use aggregate::ResultAggregator;
pub use convert::to_entity;
pub use orchestrator::SearchOrchestrator;
