pub mod response;

pub use response::{AnalysisResult, ServiceReply};
