pub mod analyzer; // sentiment aggregation + aspect extraction engine
pub mod api; // HTTP review API
pub mod config;
pub mod eval; // dataset evaluation driver
pub mod grammar; // deterministic grammar repair
pub mod store; // flat-file review store
