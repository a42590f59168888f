//! Integration tests for the proof-gated token ledger.

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod ledger_tests;
