mod persistence_tests;
mod scenario_tests;
mod sequencer_tests;
