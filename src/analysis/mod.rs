pub mod client;
pub use client::AnalysisClient;

pub mod model;
pub use model::AnalysisRequest;
pub use model::AnalysisResponse;
pub use model::Field;
pub use model::ImageRef;
pub use model::Series;
