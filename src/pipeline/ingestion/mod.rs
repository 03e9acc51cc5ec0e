// Ingestion: seed list input and page capture

pub mod crawler;
pub mod seeds;
