pub mod intent;
pub mod models;

pub use intent::{detect, Intent};
pub use models::{create_model, KeywordModel, DEFAULT_MODEL};

