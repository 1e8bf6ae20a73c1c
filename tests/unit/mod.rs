//! Unit test modules.

mod achievement_test;
mod leveling_test;
mod quest_tracker_test;
