pub mod etherscan;
pub mod gas_station;
pub mod mock;
