pub mod champion_stats;
pub mod classifier;
pub mod lane_stats;
pub mod queue;
