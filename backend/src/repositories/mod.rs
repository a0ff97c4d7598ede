pub mod account_repository;
#[cfg(test)]
pub mod memory_account_store;
