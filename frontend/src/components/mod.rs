pub mod change_password;
pub mod dashboard;
pub mod grn;
pub mod idle_watcher;
pub mod labels;
pub mod login;
pub mod master;
pub mod report;
pub mod sidebar;
pub mod stock_transfer;
pub mod table;
pub mod toast;
pub mod top_bar;
pub mod top_sheet;
