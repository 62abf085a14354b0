pub mod extract;
pub mod normalize;
pub mod prefilter;
pub mod routes;

pub use extract::{extract_first_json_span, merge_over_default, parse_json_span, parse_or_default, JsonShape};
pub use prefilter::{pre_analyze, PreAnalysisVerdict};
pub use routes::{Route, RoutePolicy};
