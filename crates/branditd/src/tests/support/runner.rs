//! Mock of the runner contract for dispatch tests.

use brandit_runner::{ActionDescriptor, MatchResult, RunnerService};
use mockall::mock;

mock! {
    pub Runner {}
    impl RunnerService for Runner {
        fn match_query(&self, query: &str) -> Vec<MatchResult>;
        fn actions(&self) -> Vec<ActionDescriptor>;
        fn run(&self, data: &str, action_id: &str);
        fn teardown(&self);
        fn reload_config(&self);
    }
}
