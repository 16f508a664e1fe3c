pub mod hooks;
pub mod table_flow;
pub mod watchdog;
