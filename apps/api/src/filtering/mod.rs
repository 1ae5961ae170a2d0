pub mod context;
pub mod engine;
pub mod exemplars;
pub mod feedback;
pub mod handlers;
pub mod rules;
pub mod settings_store;
pub mod similarity;
pub mod taxonomy;
