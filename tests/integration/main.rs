//! Integration test target; see `api_tests` for the tests themselves.

mod api_tests;
