mod http_tests;
mod states_tests;
mod tracker_tests;
